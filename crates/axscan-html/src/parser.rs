//! HTML5 Parser implementation
//!
//! Uses html5ever's RcDom and converts it to the arena DOM. Every text node
//! is kept, whitespace included, so serializing the arena reproduces the
//! parsed document.

use std::io::Read;
use std::path::Path;

use axscan_dom::{Document, DomTree, ElementData, Node, NodeId};
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

use crate::ParseError;

/// HTML5 parser
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlParser;

impl HtmlParser {
    /// Create a new HTML parser
    pub fn new() -> Self {
        Self
    }

    /// Parse HTML string into a Document
    pub fn parse(&self, html: &str) -> Document {
        self.parse_with_url(html, "about:blank")
    }

    /// Parse HTML with a base URL
    pub fn parse_with_url(&self, html: &str, url: &str) -> Document {
        tracing::debug!("Parsing HTML document: {}", url);
        let dom = parse_document(RcDom::default(), Default::default()).one(html);
        self.build(&dom, url)
    }

    /// Parse UTF-8 HTML from a reader
    pub fn parse_reader<R: Read>(&self, mut reader: R, url: &str) -> Result<Document, ParseError> {
        tracing::debug!("Parsing HTML stream: {}", url);
        let dom = parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(&mut reader)
            .map_err(|source| ParseError::Io {
                source_name: url.to_string(),
                source,
            })?;
        Ok(self.build(&dom, url))
    }

    /// Parse an HTML file; the path doubles as the document URL
    pub fn parse_file(&self, path: &Path) -> Result<Document, ParseError> {
        let name = path.display().to_string();
        let file = std::fs::File::open(path).map_err(|source| ParseError::Io {
            source_name: name.clone(),
            source,
        })?;
        self.parse_reader(std::io::BufReader::new(file), &name)
    }

    fn build(&self, dom: &RcDom, url: &str) -> Document {
        let mut document = Document::empty(url);
        let root = document.tree().root();
        self.convert_node(&dom.document, document.tree_mut(), root);
        document.finalize();

        tracing::debug!("Parsed {} nodes", document.tree().len());
        document
    }

    /// Convert an RcDom node (and its subtree) into the arena under `parent`
    fn convert_node(&self, handle: &Handle, tree: &mut DomTree, parent: NodeId) {
        match &handle.data {
            RcNodeData::Document => {
                for child in handle.children.borrow().iter() {
                    self.convert_node(child, tree, parent);
                }
            }
            RcNodeData::Doctype {
                name,
                public_id,
                system_id,
            } => {
                let name = tree.interner_mut().intern(name);
                let id = tree.push_node(Node::doctype(
                    name,
                    public_id.to_string(),
                    system_id.to_string(),
                ));
                link(tree, parent, id);
            }
            RcNodeData::Text { contents } => {
                let id = tree.create_text(&contents.borrow());
                link(tree, parent, id);
            }
            RcNodeData::Comment { contents } => {
                let id = tree.create_comment(contents);
                link(tree, parent, id);
            }
            RcNodeData::Element { name, attrs, .. } => {
                let local = tree.interner_mut().intern(&name.local);
                let mut elem = ElementData::new(local);

                for attr in attrs.borrow().iter() {
                    let attr_name = tree.interner_mut().intern(&attr.name.local);
                    let value = attr.value.to_string();

                    // Cache id and class
                    match &*attr.name.local {
                        "id" => elem.id = Some(value.clone()),
                        "class" => {
                            elem.classes = value.split_whitespace().map(str::to_string).collect();
                        }
                        _ => {}
                    }

                    elem.set_attr(attr_name, value);
                }

                let id = tree.push_node(Node::from_element(elem));
                link(tree, parent, id);

                for child in handle.children.borrow().iter() {
                    self.convert_node(child, tree, id);
                }
            }
            RcNodeData::ProcessingInstruction { .. } => {
                // Not part of HTML documents; html5ever only emits these for XML-ish input
            }
        }
    }
}

/// Attach a freshly pushed node. Both ids come straight from the arena and
/// the child has no children yet, so the only failure is a logic error.
fn link(tree: &mut DomTree, parent: NodeId, child: NodeId) {
    if let Err(err) = tree.append_child(parent, child) {
        tracing::warn!("Dropping node during conversion: {}", err);
    }
}
