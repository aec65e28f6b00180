//! Element Query and Methods
//!
//! querySelectorAll, getElementsByTagName, getElementById, closest, matches.
//!
//! Subtree queries include the root itself when it matches, so auditing a
//! single element and auditing its container behave the same way.

use crate::{DomTree, NodeId, SelectorError, SelectorList};

/// Element query trait
pub trait ElementQuery {
    /// All elements in `root`'s subtree (inclusive) matching a compiled selector
    fn select(&self, root: NodeId, selector: &SelectorList) -> Vec<NodeId>;

    /// Query all elements by CSS selector
    fn query_selector_all(&self, root: NodeId, selector: &str) -> Result<Vec<NodeId>, SelectorError>;

    /// Query first element by CSS selector
    fn query_selector(&self, root: NodeId, selector: &str) -> Result<Option<NodeId>, SelectorError>;

    /// Get elements by tag name, in document order
    fn get_elements_by_tag_name(&self, root: NodeId, tag: &str) -> Vec<NodeId>;

    /// First element in the document whose id equals `id`. An empty id
    /// matches nothing.
    fn get_element_by_id(&self, id: &str) -> Option<NodeId>;

    /// First element under `scope` (inclusive) whose id equals `id`
    fn get_element_by_id_in(&self, scope: NodeId, id: &str) -> Option<NodeId>;

    /// Find closest inclusive ancestor satisfying a predicate
    fn closest_by<F>(&self, element: NodeId, predicate: F) -> Option<NodeId>
    where
        F: FnMut(NodeId) -> bool;

    /// Find closest inclusive ancestor matching selector
    fn closest(&self, element: NodeId, selector: &str) -> Result<Option<NodeId>, SelectorError>;

    /// Check if element matches selector
    fn matches(&self, element: NodeId, selector: &str) -> Result<bool, SelectorError>;
}

impl ElementQuery for DomTree {
    fn select(&self, root: NodeId, selector: &SelectorList) -> Vec<NodeId> {
        self.descendants(root)
            .filter(|&id| selector.matches(self, id))
            .collect()
    }

    fn query_selector_all(&self, root: NodeId, selector: &str) -> Result<Vec<NodeId>, SelectorError> {
        let selector = SelectorList::parse(selector)?;
        Ok(self.select(root, &selector))
    }

    fn query_selector(&self, root: NodeId, selector: &str) -> Result<Option<NodeId>, SelectorError> {
        let selector = SelectorList::parse(selector)?;
        Ok(self.descendants(root).find(|&id| selector.matches(self, id)))
    }

    fn get_elements_by_tag_name(&self, root: NodeId, tag: &str) -> Vec<NodeId> {
        self.descendants(root)
            .filter(|&id| self.is_element_named(id, tag))
            .collect()
    }

    fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.get_element_by_id_in(self.root(), id)
    }

    fn get_element_by_id_in(&self, scope: NodeId, id: &str) -> Option<NodeId> {
        if id.is_empty() {
            return None;
        }
        self.descendants(scope).find(|&node| {
            self.element(node)
                .is_some_and(|e| e.id.as_deref() == Some(id))
        })
    }

    fn closest_by<F>(&self, element: NodeId, mut predicate: F) -> Option<NodeId>
    where
        F: FnMut(NodeId) -> bool,
    {
        self.ancestors(element)
            .filter(|&id| self.element(id).is_some())
            .find(|&id| predicate(id))
    }

    fn closest(&self, element: NodeId, selector: &str) -> Result<Option<NodeId>, SelectorError> {
        let selector = SelectorList::parse(selector)?;
        Ok(self.closest_by(element, |id| selector.matches(self, id)))
    }

    fn matches(&self, element: NodeId, selector: &str) -> Result<bool, SelectorError> {
        Ok(SelectorList::parse(selector)?.matches(self, element))
    }
}
