//! HTML Serialization (innerHTML/outerHTML)
//!
//! Serializes arena nodes back to markup. Besides full inner/outer HTML it
//! renders the compact "elided" form diagnostics embed: the element's own
//! tags with any content replaced by `...`.

use axscan_dom::{DomTree, NodeData, NodeId};

/// Void elements (no end tag)
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input",
    "link", "meta", "param", "source", "track", "wbr",
];

/// Raw text elements (no escaping for content)
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Marker substituted for elided element content
pub const ELLIPSIS: &str = "...";

/// HTML serializer
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlSerializer;

impl HtmlSerializer {
    pub fn new() -> Self {
        Self
    }

    /// Serialize innerHTML of a node (children only)
    pub fn serialize_inner(&self, tree: &DomTree, node_id: NodeId) -> String {
        let mut output = String::new();
        self.serialize_children(tree, node_id, &mut output);
        output
    }

    /// Serialize outerHTML of a node (including the node itself)
    pub fn serialize_outer(&self, tree: &DomTree, node_id: NodeId) -> String {
        let mut output = String::new();
        self.serialize_node(tree, node_id, &mut output);
        output
    }

    /// outerHTML with non-empty content replaced by `...`
    ///
    /// `<button class="x"><img></button>` becomes `<button class="x">...</button>`;
    /// elements without content serialize unchanged.
    pub fn serialize_elided(&self, tree: &DomTree, node_id: NodeId) -> String {
        let Some(elem) = tree.element(node_id) else {
            return self.serialize_outer(tree, node_id);
        };
        let tag = tree.resolve(elem.name);

        let mut output = String::new();
        self.start_tag(tree, node_id, &mut output);
        if VOID_ELEMENTS.contains(&tag) {
            return output;
        }
        if tree.children(node_id).next().is_some() {
            output.push_str(ELLIPSIS);
        }
        end_tag(tag, &mut output);
        output
    }

    fn start_tag(&self, tree: &DomTree, node_id: NodeId, output: &mut String) {
        let Some(tag) = tree.tag_name(node_id) else {
            return;
        };

        output.push('<');
        output.push_str(tag);
        for (name, value) in tree.attributes(node_id) {
            output.push(' ');
            output.push_str(name);
            if !value.is_empty() {
                output.push_str("=\"");
                escape_attribute(value, output);
                output.push('"');
            }
        }
        output.push('>');
    }

    /// Serialize a node and its descendants
    fn serialize_node(&self, tree: &DomTree, node_id: NodeId, output: &mut String) {
        let Some(node) = tree.get(node_id) else {
            return;
        };

        match &node.data {
            NodeData::Document => {
                self.serialize_children(tree, node_id, output);
            }
            NodeData::Element(elem) => {
                let tag = tree.resolve(elem.name);
                self.start_tag(tree, node_id, output);
                if VOID_ELEMENTS.contains(&tag) {
                    return;
                }

                if RAW_TEXT_ELEMENTS.contains(&tag) {
                    self.serialize_children_raw(tree, node_id, output);
                } else {
                    self.serialize_children(tree, node_id, output);
                }
                end_tag(tag, output);
            }
            NodeData::Text(text) => {
                escape_text(&text.content, output);
            }
            NodeData::Comment(text) => {
                output.push_str("<!--");
                output.push_str(text);
                output.push_str("-->");
            }
            NodeData::Doctype { name, .. } => {
                output.push_str("<!DOCTYPE ");
                output.push_str(tree.resolve(*name));
                output.push('>');
            }
        }
    }

    fn serialize_children(&self, tree: &DomTree, parent_id: NodeId, output: &mut String) {
        for (child_id, _) in tree.children(parent_id) {
            self.serialize_node(tree, child_id, output);
        }
    }

    fn serialize_children_raw(&self, tree: &DomTree, parent_id: NodeId, output: &mut String) {
        for (_, child) in tree.children(parent_id) {
            if let Some(text) = child.as_text() {
                output.push_str(text);
            }
        }
    }
}

fn end_tag(tag: &str, output: &mut String) {
    output.push_str("</");
    output.push_str(tag);
    output.push('>');
}

/// Escape text content for HTML
fn escape_text(text: &str, output: &mut String) {
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            _ => output.push(c),
        }
    }
}

/// Escape attribute value
fn escape_attribute(text: &str, output: &mut String) {
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '"' => output.push_str("&quot;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            _ => output.push(c),
        }
    }
}

/// Utility: Get innerHTML of an element
pub fn get_inner_html(tree: &DomTree, node_id: NodeId) -> String {
    HtmlSerializer::new().serialize_inner(tree, node_id)
}

/// Utility: Get outerHTML of an element
pub fn get_outer_html(tree: &DomTree, node_id: NodeId) -> String {
    HtmlSerializer::new().serialize_outer(tree, node_id)
}

/// Utility: Get the elided outerHTML of an element
pub fn get_elided_html(tree: &DomTree, node_id: NodeId) -> String {
    HtmlSerializer::new().serialize_elided(tree, node_id)
}
