//! Visibility
//!
//! Hidden content is exempt from the labelling rules. An element is hidden
//! when it, or any ancestor, is marked `aria-hidden="true"`, carries the
//! `hidden` attribute, or has an inline `display: none`.

use axscan_dom::{DomTree, ElementQuery, NodeId};

/// True if `element` sits inside (or is) a hidden subtree
pub fn is_hidden(tree: &DomTree, element: NodeId) -> bool {
    tree.closest_by(element, |id| hides_subtree(tree, id)).is_some()
}

/// True if this element, on its own, hides itself and its descendants
pub fn hides_subtree(tree: &DomTree, element: NodeId) -> bool {
    tree.attribute(element, "aria-hidden") == Some("true")
        || tree.has_attribute(element, "hidden")
        || tree
            .attribute(element, "style")
            .is_some_and(declares_display_none)
}

/// Parse an inline style and report whether its effective `display` is `none`
///
/// Later declarations override earlier ones unless the earlier one is
/// `!important` and the later one is not.
pub fn declares_display_none(style: &str) -> bool {
    let mut effective: Option<(String, bool)> = None;

    for declaration in style.split(';') {
        let Some((property, value)) = declaration.split_once(':') else {
            continue;
        };
        if !property.trim().eq_ignore_ascii_case("display") {
            continue;
        }

        let (value, important) = strip_important(value.trim());
        let overridden = matches!(&effective, Some((_, true))) && !important;
        if !overridden {
            effective = Some((value.to_ascii_lowercase(), important));
        }
    }

    effective.is_some_and(|(value, _)| value == "none")
}

fn strip_important(value: &str) -> (&str, bool) {
    match value.rfind('!') {
        Some(bang) if value[bang + 1..].trim().eq_ignore_ascii_case("important") => {
            (value[..bang].trim_end(), true)
        }
        _ => (value, false),
    }
}
