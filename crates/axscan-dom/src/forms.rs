//! Label and Labelable Elements
//!
//! The label/control association a browser exposes as `label.control` and
//! `input.labels`, following the HTML rules: a `for` attribute names the
//! control by id (and nothing else), otherwise the first labelable
//! descendant of the label is its control.

use crate::{DomTree, ElementQuery, NodeId};

/// Elements that can be associated with a label
pub const LABELABLE_ELEMENTS: &[&str] = &[
    "button", "input", "meter", "output", "progress", "select", "textarea",
];

/// Check whether an element can be labelled.
/// `<input type="hidden">` is the one input that cannot.
pub fn is_labelable(tree: &DomTree, element: NodeId) -> bool {
    let Some(tag) = tree.tag_name(element) else {
        return false;
    };
    if tag == "input" {
        return !tree
            .attribute(element, "type")
            .is_some_and(|t| t.eq_ignore_ascii_case("hidden"));
    }
    LABELABLE_ELEMENTS.contains(&tag)
}

/// The control a `label` element is associated with (`label.control`)
pub fn label_control(tree: &DomTree, label: NodeId) -> Option<NodeId> {
    if !tree.is_element_named(label, "label") {
        return None;
    }

    if let Some(for_id) = tree.attribute(label, "for") {
        return tree
            .get_element_by_id_in(tree.tree_root(label), for_id)
            .filter(|&control| is_labelable(tree, control));
    }

    tree.descendants(label)
        .skip(1)
        .find(|&node| is_labelable(tree, node))
}

/// Labels associated with a control (`input.labels`), in document order
pub fn labels(tree: &DomTree, control: NodeId) -> Vec<NodeId> {
    if !is_labelable(tree, control) {
        return Vec::new();
    }

    tree.get_elements_by_tag_name(tree.tree_root(control), "label")
        .into_iter()
        .filter(|&label| label_control(tree, label) == Some(control))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(tree: &mut DomTree, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let id = tree.create_element(tag);
        for (name, value) in attrs {
            tree.set_attribute(id, name, value).unwrap();
        }
        tree.append_child(parent, id).unwrap();
        id
    }

    #[test]
    fn test_for_attribute() {
        let mut tree = DomTree::new();
        let root = tree.root();
        let label = element(&mut tree, root, "label", &[("for", "name")]);
        let input = element(&mut tree, root, "input", &[("id", "name"), ("type", "text")]);

        assert_eq!(label_control(&tree, label), Some(input));
        assert_eq!(labels(&tree, input), vec![label]);
    }

    #[test]
    fn test_for_attribute_wins_over_descendant() {
        let mut tree = DomTree::new();
        let root = tree.root();
        let label = element(&mut tree, root, "label", &[("for", "nowhere")]);
        let nested = element(&mut tree, label, "input", &[]);

        assert_eq!(label_control(&tree, label), None);
        assert!(labels(&tree, nested).is_empty());
    }

    #[test]
    fn test_empty_for_names_nothing() {
        let mut tree = DomTree::new();
        let root = tree.root();
        let label = element(&mut tree, root, "label", &[("for", "")]);
        let input = element(&mut tree, root, "input", &[("id", ""), ("type", "text")]);

        assert_eq!(label_control(&tree, label), None);
        assert!(labels(&tree, input).is_empty());
    }

    #[test]
    fn test_for_non_labelable_target() {
        let mut tree = DomTree::new();
        let root = tree.root();
        let label = element(&mut tree, root, "label", &[("for", "box")]);
        element(&mut tree, root, "div", &[("id", "box")]);

        assert_eq!(label_control(&tree, label), None);
    }

    #[test]
    fn test_wrapped_control() {
        let mut tree = DomTree::new();
        let root = tree.root();
        let label = element(&mut tree, root, "label", &[]);
        let span = element(&mut tree, label, "span", &[]);
        element(&mut tree, span, "input", &[("type", "hidden")]);
        let select = element(&mut tree, label, "select", &[]);

        assert_eq!(label_control(&tree, label), Some(select));
        assert_eq!(labels(&tree, select), vec![label]);
    }

    #[test]
    fn test_labelable() {
        let mut tree = DomTree::new();
        let root = tree.root();
        let hidden = element(&mut tree, root, "input", &[("type", "HIDDEN")]);
        let text = element(&mut tree, root, "input", &[]);
        let area = element(&mut tree, root, "textarea", &[]);
        let div = element(&mut tree, root, "div", &[]);

        assert!(!is_labelable(&tree, hidden));
        assert!(is_labelable(&tree, text));
        assert!(is_labelable(&tree, area));
        assert!(!is_labelable(&tree, div));
        assert!(!is_labelable(&tree, root));
    }
}
