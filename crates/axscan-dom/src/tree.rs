//! DOM Tree (arena-based allocation)
//!
//! All nodes of a document live in one `Vec`, addressed by `NodeId`. Index 0
//! is always the document node. Mutation goes through `&mut DomTree`, so a
//! reader holding `&DomTree` (an audit, a serializer) sees a frozen tree.

use crate::{
    DomError, DomResult, ElementData, InternedString, Node, NodeId, StringInterner,
};

/// Arena-based DOM tree
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<Node>,
    interner: StringInterner,
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
            interner: StringInterner::new(),
        }
    }

    /// The document node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    /// Get a mutable node by ID
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0 as usize)
    }

    /// Number of nodes in the tree, detached ones included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always holds its document node, so this is never true
    /// for a tree built through `new`
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Check that an ID addresses a node of this tree
    #[inline]
    pub fn contains_node(&self, id: NodeId) -> bool {
        (id.0 as usize) < self.nodes.len()
    }

    /// Access the string interner
    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    /// Access the string interner mutably
    pub fn interner_mut(&mut self) -> &mut StringInterner {
        &mut self.interner
    }

    /// Resolve an interned name
    #[inline]
    pub fn resolve(&self, id: InternedString) -> &str {
        self.interner.get(id)
    }

    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Add a detached node to the arena
    pub fn push_node(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached element; the tag name is lowercased
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let name = self.interner.intern(&tag.to_ascii_lowercase());
        self.push_node(Node::element(name))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push_node(Node::text(text.to_string()))
    }

    /// Create a detached comment node
    pub fn create_comment(&mut self, text: &str) -> NodeId {
        self.push_node(Node::comment(text.to_string()))
    }

    /// Append `child` as the last child of `parent`, detaching it from
    /// wherever it was first
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        if !self.contains_node(parent) {
            return Err(DomError::NotFound(parent));
        }
        if !self.contains_node(child) {
            return Err(DomError::NotFound(child));
        }
        if child == NodeId::ROOT || self.ancestors(parent).any(|a| a == child) {
            return Err(DomError::HierarchyRequest { parent, child });
        }

        self.detach(child);

        let last = self.nodes[parent.0 as usize].last_child;
        {
            let node = &mut self.nodes[child.0 as usize];
            node.parent = parent;
            node.prev_sibling = last;
            node.next_sibling = NodeId::NONE;
        }
        if last.is_valid() {
            self.nodes[last.0 as usize].next_sibling = child;
        } else {
            self.nodes[parent.0 as usize].first_child = child;
        }
        self.nodes[parent.0 as usize].last_child = child;

        Ok(child)
    }

    /// Remove `child` from `parent`; the node stays in the arena, detached
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        let node = self.get(child).ok_or(DomError::NotFound(child))?;
        if node.parent != parent {
            return Err(DomError::NotAChild { parent, child });
        }
        self.detach(child);
        Ok(child)
    }

    fn detach(&mut self, id: NodeId) {
        let (parent, prev, next) = {
            let node = &self.nodes[id.0 as usize];
            (node.parent, node.prev_sibling, node.next_sibling)
        };
        if !parent.is_valid() {
            return;
        }

        if prev.is_valid() {
            self.nodes[prev.0 as usize].next_sibling = next;
        } else {
            self.nodes[parent.0 as usize].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.0 as usize].prev_sibling = prev;
        } else {
            self.nodes[parent.0 as usize].last_child = prev;
        }

        let node = &mut self.nodes[id.0 as usize];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
    }

    // ------------------------------------------------------------------
    // Attributes
    // ------------------------------------------------------------------

    /// Set an attribute on an element. Names are lowercased; `id` and
    /// `class` refresh the element's cached lookups.
    pub fn set_attribute(&mut self, element: NodeId, name: &str, value: &str) -> DomResult<()> {
        let name = name.to_ascii_lowercase();
        let interned = self.interner.intern(&name);
        let elem = self.element_mut(element)?;

        elem.set_attr(interned, value.to_string());
        match name.as_str() {
            "id" => elem.id = Some(value.to_string()),
            "class" => {
                elem.classes = value.split_whitespace().map(str::to_string).collect();
            }
            _ => {}
        }
        Ok(())
    }

    /// Remove an attribute, returning its old value
    pub fn remove_attribute(&mut self, element: NodeId, name: &str) -> DomResult<Option<String>> {
        let name = name.to_ascii_lowercase();
        let Some(interned) = self.interner.lookup(&name) else {
            return Ok(None);
        };
        let elem = self.element_mut(element)?;

        let old = elem.remove_attr(interned);
        match name.as_str() {
            "id" => elem.id = None,
            "class" => elem.classes.clear(),
            _ => {}
        }
        Ok(old)
    }

    fn element_mut(&mut self, id: NodeId) -> DomResult<&mut ElementData> {
        self.nodes
            .get_mut(id.0 as usize)
            .ok_or(DomError::NotFound(id))?
            .as_element_mut()
            .ok_or(DomError::InvalidNodeType(id))
    }

    /// Element data of a node, if it is an element
    #[inline]
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id)?.as_element()
    }

    /// Lowercase tag name of an element
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|e| self.resolve(e.name))
    }

    /// Check an element's tag name
    pub fn is_element_named(&self, id: NodeId, tag: &str) -> bool {
        self.tag_name(id).is_some_and(|t| t.eq_ignore_ascii_case(tag))
    }

    /// Attribute value by name
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        let interned = self.interner.lookup(name)?;
        self.element(id)?.get_attr(interned)
    }

    /// Attribute presence by name
    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.attribute(id, name).is_some()
    }

    /// Attribute (name, value) pairs of an element, in source order
    pub fn attributes(&self, id: NodeId) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.element(id)
            .into_iter()
            .flat_map(|e| e.attrs.iter())
            .map(|a| (self.resolve(a.name), a.value.as_str()))
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Parent of a node
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).map(|n| n.parent).filter(|p| p.is_valid())
    }

    /// Iterate over the children of a node
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.get(id).map_or(NodeId::NONE, |n| n.first_child),
        }
    }

    /// The node itself, then each ancestor up to the document node
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: if self.contains_node(id) { id } else { NodeId::NONE },
        }
    }

    /// The node itself, then every descendant in document (pre-)order
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            root: id,
            next: if self.contains_node(id) { id } else { NodeId::NONE },
        }
    }

    /// Topmost ancestor of a node: the document node when attached,
    /// otherwise the root of the detached fragment
    pub fn tree_root(&self, id: NodeId) -> NodeId {
        self.ancestors(id).last().unwrap_or(id)
    }

    /// Check whether `node` is `ancestor` or lies beneath it
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.ancestors(node).any(|a| a == ancestor)
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        for node in self.descendants(id) {
            if let Some(text) = self.get(node).and_then(Node::as_text) {
                out.push_str(text);
            }
        }
        out
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Child iterator
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling;
        Some((id, node))
    }
}

/// Inclusive ancestor iterator
pub struct Ancestors<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.next;
        let node = self.tree.get(id)?;
        self.next = node.parent;
        Some(id)
    }
}

/// Inclusive pre-order descendant iterator
pub struct Descendants<'a> {
    tree: &'a DomTree,
    root: NodeId,
    next: NodeId,
}

impl Descendants<'_> {
    /// Next node after `id`'s subtree, without leaving `root`
    fn following(&self, mut id: NodeId) -> NodeId {
        loop {
            if id == self.root {
                return NodeId::NONE;
            }
            let Some(node) = self.tree.get(id) else {
                return NodeId::NONE;
            };
            if node.next_sibling.is_valid() {
                return node.next_sibling;
            }
            id = node.parent;
        }
    }
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next;
        let node = self.tree.get(current)?;
        self.next = if node.first_child.is_valid() {
            node.first_child
        } else {
            self.following(current)
        };
        Some(current)
    }
}
