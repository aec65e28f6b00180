//! Rule set
//!
//! Built-in rule categories, each a candidate selection plus a per-element
//! predicate. Predicates are pure reads of the tree; none depends on
//! another's outcome.

use axscan_dom::{forms, DomTree, ElementQuery, NodeId};

use crate::diagnostic::DiagnosticKind;
use crate::text::has_accessible_text;
use crate::visibility::is_hidden;

/// `input` types checked for a label
pub const TEXT_INPUT_TYPES: &[&str] = &["text", "url", "search", "number"];

/// Built-in categories, in the order a scan evaluates them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleCategory {
    Images,
    Links,
    Buttons,
    Labels,
    TextInputs,
    Frames,
}

impl RuleCategory {
    pub const ORDER: [RuleCategory; 6] = [
        Self::Images,
        Self::Links,
        Self::Buttons,
        Self::Labels,
        Self::TextInputs,
        Self::Frames,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Images => "images",
            Self::Links => "links",
            Self::Buttons => "buttons",
            Self::Labels => "labels",
            Self::TextInputs => "text-inputs",
            Self::Frames => "frames",
        }
    }

    /// Candidate elements under `root` (inclusive), in document order
    pub fn candidates(self, tree: &DomTree, root: NodeId) -> Vec<NodeId> {
        match self {
            Self::Images => tree.get_elements_by_tag_name(root, "img"),
            Self::Links => tree.get_elements_by_tag_name(root, "a"),
            Self::Buttons => tree.get_elements_by_tag_name(root, "button"),
            Self::Labels => tree.get_elements_by_tag_name(root, "label"),
            Self::TextInputs => tree
                .descendants(root)
                .filter(|&id| is_text_input(tree, id))
                .collect(),
            Self::Frames => tree.get_elements_by_tag_name(root, "iframe"),
        }
    }

    /// Evaluate this category's rule on one candidate
    pub fn check(self, tree: &DomTree, element: NodeId) -> Option<DiagnosticKind> {
        match self {
            Self::Images => check_image(tree, element),
            Self::Links => check_link(tree, element),
            Self::Buttons => check_button(tree, element),
            Self::Labels => check_label(tree, element),
            Self::TextInputs => check_text_input(tree, element),
            Self::Frames => check_iframe(tree, element),
        }
    }
}

/// `input[type=text|url|search|number]` or `textarea`
pub fn is_text_input(tree: &DomTree, element: NodeId) -> bool {
    match tree.tag_name(element) {
        Some("textarea") => true,
        Some("input") => tree.attribute(element, "type").is_some_and(|t| {
            TEXT_INPUT_TYPES
                .iter()
                .any(|kind| t.eq_ignore_ascii_case(kind))
        }),
        _ => false,
    }
}

fn check_image(tree: &DomTree, img: NodeId) -> Option<DiagnosticKind> {
    (!tree.has_attribute(img, "alt")).then_some(DiagnosticKind::ImageWithoutAltAttribute)
}

/// Named anchors and hidden links are exempt. Otherwise a link needs a
/// role first and a label second; only the first failure is reported.
fn check_link(tree: &DomTree, link: NodeId) -> Option<DiagnosticKind> {
    if tree.has_attribute(link, "name") || is_hidden(tree, link) {
        return None;
    }

    if !tree.has_attribute(link, "href") && tree.attribute(link, "role") != Some("button") {
        Some(DiagnosticKind::LinkWithoutLabelOrRole)
    } else if !has_accessible_text(tree, link) {
        Some(DiagnosticKind::ElementWithoutLabel)
    } else {
        None
    }
}

fn check_button(tree: &DomTree, button: NodeId) -> Option<DiagnosticKind> {
    if has_accessible_text(tree, button) || is_hidden(tree, button) {
        return None;
    }
    Some(DiagnosticKind::ButtonWithoutLabel)
}

fn check_label(tree: &DomTree, label: NodeId) -> Option<DiagnosticKind> {
    if label_has_control(tree, label) || is_hidden(tree, label) {
        return None;
    }
    Some(DiagnosticKind::LabelMissingControl)
}

fn check_text_input(tree: &DomTree, input: NodeId) -> Option<DiagnosticKind> {
    if input_has_label(tree, input)
        || tree.has_attribute(input, "aria-label")
        || is_hidden(tree, input)
    {
        return None;
    }
    Some(DiagnosticKind::InputMissingLabel)
}

fn check_iframe(tree: &DomTree, iframe: NodeId) -> Option<DiagnosticKind> {
    tree.attribute(iframe, "scrolling")
        .is_some_and(|v| v.trim().eq_ignore_ascii_case("no"))
        .then_some(DiagnosticKind::IframeWithoutScroll)
}

/// A label is associated when the HTML rules resolve a control, when its
/// `for` names any element in the document, or when it wraps an `input`.
pub fn label_has_control(tree: &DomTree, label: NodeId) -> bool {
    if forms::label_control(tree, label).is_some() {
        return true;
    }

    let targets_element = tree
        .attribute(label, "for")
        .is_some_and(|id| tree.get_element_by_id_in(tree.tree_root(label), id).is_some());

    targets_element
        || tree
            .descendants(label)
            .skip(1)
            .any(|id| tree.is_element_named(id, "input"))
}

/// An input is labelled when the HTML rules associate a label with it,
/// when it sits inside a `label`, or when some `label[for]` names its id.
pub fn input_has_label(tree: &DomTree, input: NodeId) -> bool {
    if !forms::labels(tree, input).is_empty() {
        return true;
    }

    let wrapped = tree
        .ancestors(input)
        .skip(1)
        .any(|id| tree.is_element_named(id, "label"));
    if wrapped {
        return true;
    }

    let Some(id) = tree
        .element(input)
        .and_then(|e| e.id.as_deref())
        .filter(|id| !id.is_empty())
    else {
        return false;
    };
    tree.get_elements_by_tag_name(tree.tree_root(input), "label")
        .into_iter()
        .any(|label| tree.attribute(label, "for") == Some(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axscan_html::HtmlParser;

    fn first(tree: &DomTree, selector: &str) -> NodeId {
        tree.query_selector(tree.root(), selector).unwrap().unwrap()
    }

    fn check(html: &str, category: RuleCategory, selector: &str) -> Option<DiagnosticKind> {
        let doc = HtmlParser::new().parse(html);
        let el = first(doc.tree(), selector);
        category.check(doc.tree(), el)
    }

    #[test]
    fn test_images() {
        assert_eq!(
            check("<img src='a.png'>", RuleCategory::Images, "img"),
            Some(DiagnosticKind::ImageWithoutAltAttribute)
        );
        assert_eq!(check("<img alt=''>", RuleCategory::Images, "img"), None);
    }

    #[test]
    fn test_links() {
        use DiagnosticKind::*;
        let cases = [
            ("<a>home</a>", Some(LinkWithoutLabelOrRole)),
            ("<a href='/'></a>", Some(ElementWithoutLabel)),
            ("<a role='button'> </a>", Some(ElementWithoutLabel)),
            ("<a href='/'>home</a>", None),
            ("<a role='button' aria-label='Open'></a>", None),
            ("<a name='top'></a>", None),
            ("<a hidden></a>", None),
            ("<div style='display:none'><a></a></div>", None),
        ];
        for (html, expected) in cases {
            assert_eq!(check(html, RuleCategory::Links, "a"), expected, "{html}");
        }
    }

    #[test]
    fn test_buttons() {
        use DiagnosticKind::ButtonWithoutLabel;
        assert_eq!(check("<button></button>", RuleCategory::Buttons, "button"), Some(ButtonWithoutLabel));
        assert_eq!(
            check("<button><img src='x'></button>", RuleCategory::Buttons, "button"),
            Some(ButtonWithoutLabel)
        );
        assert_eq!(check("<button title='Close'></button>", RuleCategory::Buttons, "button"), None);
        assert_eq!(check("<button aria-hidden='true'></button>", RuleCategory::Buttons, "button"), None);
    }

    #[test]
    fn test_labels() {
        use DiagnosticKind::LabelMissingControl;
        assert_eq!(check("<label>Name</label>", RuleCategory::Labels, "label"), Some(LabelMissingControl));
        assert_eq!(check("<label><select></select></label>", RuleCategory::Labels, "label"), None);
        assert_eq!(
            check("<label for='x'>Name</label><input id='x' type='text'>", RuleCategory::Labels, "label"),
            None
        );
        // `for` pointing at a non-labelable element still counts
        assert_eq!(check("<label for='d'>Name</label><div id='d'></div>", RuleCategory::Labels, "label"), None);
        // a wrapped hidden input has no native control but still counts
        assert_eq!(check("<label><input type='hidden'></label>", RuleCategory::Labels, "label"), None);
        assert_eq!(
            check("<label for='gone'>Name</label>", RuleCategory::Labels, "label"),
            Some(LabelMissingControl)
        );
        assert_eq!(check("<label hidden>Name</label>", RuleCategory::Labels, "label"), None);
        assert_eq!(
            check("<label for=''>Name</label><input id='' type='checkbox'>", RuleCategory::Labels, "label"),
            Some(LabelMissingControl)
        );
    }

    #[test]
    fn test_text_input_selection() {
        let doc = HtmlParser::new().parse(
            "<input type='text'><input type='URL'><input type='search'><input type='number'>\
             <textarea></textarea><input type='checkbox'><input type='hidden'><input>",
        );
        let tree = doc.tree();
        let picked = RuleCategory::TextInputs.candidates(tree, tree.root());
        assert_eq!(picked.len(), 5);
        assert!(picked.iter().all(|&id| is_text_input(tree, id)));
    }

    #[test]
    fn test_text_inputs() {
        use DiagnosticKind::InputMissingLabel;
        let input = "input";
        assert_eq!(check("<input type='text'>", RuleCategory::TextInputs, input), Some(InputMissingLabel));
        assert_eq!(check("<input type='text' aria-label='Name'>", RuleCategory::TextInputs, input), None);
        assert_eq!(check("<label>Name <input type='text'></label>", RuleCategory::TextInputs, input), None);
        assert_eq!(
            check("<label for='n'>Name</label><input id='n' type='text'>", RuleCategory::TextInputs, input),
            None
        );
        assert_eq!(
            check("<textarea></textarea>", RuleCategory::TextInputs, "textarea"),
            Some(InputMissingLabel)
        );
        assert_eq!(check("<div hidden><input type='text'></div>", RuleCategory::TextInputs, input), None);
    }

    #[test]
    fn test_input_with_several_labels() {
        let doc = HtmlParser::new()
            .parse("<label for='n'>Name</label><input id='n' type='text'><label for='n'>Again</label>");
        let tree = doc.tree();
        let input = first(tree, "input");
        assert!(input_has_label(tree, input));
    }

    #[test]
    fn test_frames() {
        use DiagnosticKind::IframeWithoutScroll;
        assert_eq!(check("<iframe scrolling='no'></iframe>", RuleCategory::Frames, "iframe"), Some(IframeWithoutScroll));
        assert_eq!(check("<iframe scrolling='NO'></iframe>", RuleCategory::Frames, "iframe"), Some(IframeWithoutScroll));
        assert_eq!(check("<iframe scrolling='auto'></iframe>", RuleCategory::Frames, "iframe"), None);
        assert_eq!(check("<iframe></iframe>", RuleCategory::Frames, "iframe"), None);
    }
}
