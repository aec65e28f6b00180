//! Document - High-level document API

use crate::{DomTree, ElementQuery, NodeId};

/// HTML Document
#[derive(Debug, Clone)]
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    /// Document URL
    url: String,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
}

impl Document {
    /// Create a new document with an empty html/head/body skeleton
    pub fn new(url: &str) -> Self {
        let mut doc = Self::empty(url);
        let tree = &mut doc.tree;

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        // Freshly created nodes under a valid root cannot fail to link
        let linked = tree
            .append_child(tree.root(), html)
            .and_then(|_| tree.append_child(html, head))
            .and_then(|_| tree.append_child(html, body));
        debug_assert!(linked.is_ok());

        doc.finalize();
        doc
    }

    /// Create an empty document (no structure)
    pub fn empty(url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            url: url.to_string(),
            html_element: NodeId::NONE,
            head_element: NodeId::NONE,
            body_element: NodeId::NONE,
        }
    }

    /// Locate the html, head and body elements after the tree was built
    pub fn finalize(&mut self) {
        let tree = &self.tree;
        self.html_element = tree
            .children(tree.root())
            .map(|(id, _)| id)
            .find(|&id| tree.is_element_named(id, "html"))
            .unwrap_or(NodeId::NONE);

        let child_named = |tag: &str| {
            tree.children(self.html_element)
                .map(|(id, _)| id)
                .find(|&id| tree.is_element_named(id, tag))
                .unwrap_or(NodeId::NONE)
        };
        self.head_element = child_named("head");
        self.body_element = child_named("body");

        tracing::trace!(
            html = ?self.html_element,
            head = ?self.head_element,
            body = ?self.body_element,
            "document skeleton located"
        );
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Text of the first <title> in <head>
    pub fn title(&self) -> String {
        if !self.head_element.is_valid() {
            return String::new();
        }

        self.tree
            .get_elements_by_tag_name(self.head_element, "title")
            .first()
            .map(|&title| self.tree.text_content(title).trim().to_string())
            .unwrap_or_default()
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <head> element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Get element by ID
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree.get_element_by_id(id)
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    /// Take ownership of the tree
    pub fn into_tree(self) -> DomTree {
        self.tree
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}
