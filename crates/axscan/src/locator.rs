//! Element locators
//!
//! Turns a node into something a person can find in their markup: a short
//! CSS-like path from the nearest id-bearing ancestor (or from just under
//! `body`) down to the element, followed by the element's own tag with its
//! content elided.

use axscan_dom::{DomTree, NodeId};
use axscan_html::get_elided_html;

/// Class prefix marking scripting hooks (`js-menu-target`)
pub const DEFAULT_HOOK_PREFIX: &str = "js-";

/// Selector-like component for one element: `tag#id.js-a.js-b`
///
/// Only classes starting with `hook_prefix` are included.
pub fn selector_component(tree: &DomTree, element: NodeId, hook_prefix: &str) -> String {
    let Some(elem) = tree.element(element) else {
        return String::new();
    };

    let mut component = tree.resolve(elem.name).to_ascii_lowercase();
    if let Some(id) = elem.id.as_deref().filter(|id| !id.is_empty()) {
        component.push('#');
        component.push_str(id);
    }
    for class in elem.classes.iter().filter(|c| c.starts_with(hook_prefix)) {
        component.push('.');
        component.push_str(class);
    }
    component
}

/// Path from the nearest id-bearing ancestor (inclusive) or the child of
/// `body` down to `element`, joined with `" > "`
pub fn locator_path(tree: &DomTree, element: NodeId, hook_prefix: &str) -> String {
    let mut parts = Vec::new();

    for id in tree.ancestors(element) {
        match tree.tag_name(id) {
            None | Some("body") => break,
            Some(_) => {}
        }
        parts.push(selector_component(tree, id, hook_prefix));

        let has_id = tree
            .element(id)
            .and_then(|e| e.id.as_deref())
            .is_some_and(|v| !v.is_empty());
        if has_id {
            break;
        }
    }

    parts.reverse();
    parts.join(" > ")
}

/// Full locator embedded in diagnostic messages:
/// the quoted path, a blank line, then the elided element markup
pub fn inspect(tree: &DomTree, element: NodeId, hook_prefix: &str) -> String {
    format!(
        "\"{}\". \n\n{}",
        locator_path(tree, element, hook_prefix),
        get_elided_html(tree, element)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axscan_html::HtmlParser;
    use axscan_dom::ElementQuery;

    fn find(tree: &DomTree, selector: &str) -> NodeId {
        tree.query_selector(tree.root(), selector).unwrap().unwrap()
    }

    #[test]
    fn test_component() {
        let doc = HtmlParser::new().parse(
            r#"<button id="save" class="btn js-save primary js-track">Save</button>"#,
        );
        let button = find(doc.tree(), "button");
        assert_eq!(
            selector_component(doc.tree(), button, DEFAULT_HOOK_PREFIX),
            "button#save.js-save.js-track"
        );
        assert_eq!(
            selector_component(doc.tree(), button, ""),
            "button#save.btn.js-save.primary.js-track"
        );
    }

    #[test]
    fn test_path_stops_at_body() {
        let doc = HtmlParser::new().parse("<div class='js-nav'><ul><li><a>x</a></li></ul></div>");
        let a = find(doc.tree(), "a");
        assert_eq!(locator_path(doc.tree(), a, "js-"), "div.js-nav > ul > li > a");
    }

    #[test]
    fn test_path_stops_at_first_id() {
        let doc = HtmlParser::new()
            .parse("<div id='outer'><section id='inner'><p><img></p></section></div>");
        let img = find(doc.tree(), "img");
        assert_eq!(locator_path(doc.tree(), img, "js-"), "section#inner > p > img");

        let section = find(doc.tree(), "section");
        assert_eq!(locator_path(doc.tree(), section, "js-"), "section#inner");
    }

    #[test]
    fn test_empty_id_does_not_stop_walk() {
        let doc = HtmlParser::new().parse("<div><span id=''><img></span></div>");
        let img = find(doc.tree(), "img");
        assert_eq!(locator_path(doc.tree(), img, "js-"), "div > span > img");
    }

    #[test]
    fn test_detached_element() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let img = tree.create_element("img");
        tree.append_child(div, img).unwrap();
        assert_eq!(locator_path(&tree, img, "js-"), "div > img");
    }

    #[test]
    fn test_inspect_elides_content() {
        let doc = HtmlParser::new()
            .parse(r#"<button type="button"><img src="x.png"><span>deep</span></button>"#);
        let button = find(doc.tree(), "button");
        assert_eq!(
            inspect(doc.tree(), button, "js-"),
            "\"button\". \n\n<button type=\"button\">...</button>"
        );
    }
}
