//! Accessible text
//!
//! Whether a node exposes anything a screen reader could announce.

use axscan_dom::{DomTree, NodeData, NodeId};

/// Attributes that label an element outright
pub const LABEL_ATTRIBUTES: &[&str] = &["alt", "aria-label", "title"];

/// True if `node` or something beneath it is perceivable text.
///
/// An element labelled by a non-blank `alt`, `aria-label`, or `title`
/// counts without looking at its children. Otherwise children are
/// searched in order, stopping at the first hit. Text counts when it is not
/// blank; comments and doctypes never do.
pub fn has_accessible_text(tree: &DomTree, node: NodeId) -> bool {
    let Some(n) = tree.get(node) else {
        return false;
    };

    match &n.data {
        NodeData::Element(_) => {
            let labelled = LABEL_ATTRIBUTES
                .iter()
                .any(|attr| tree.attribute(node, attr).is_some_and(is_not_blank));
            labelled
                || tree
                    .children(node)
                    .any(|(child, _)| has_accessible_text(tree, child))
        }
        NodeData::Text(text) => is_not_blank(&text.content),
        _ => false,
    }
}

fn is_not_blank(s: &str) -> bool {
    !s.trim().is_empty()
}
