//! axscan DOM - Document Object Model
//!
//! Arena-backed DOM tree the audit engine reads from: nodes, attributes,
//! parent/child navigation, CSS selector queries, and label/control
//! association.

mod document;
mod element;
pub mod forms;
mod interner;
mod node;
mod operations;
pub mod selector;
mod tree;

pub use document::Document;
pub use element::ElementQuery;
pub use interner::{InternedString, StringInterner};
pub use node::{Attribute, ElementData, Node, NodeData, NodeType, TextData};
pub use operations::{DomError, DomResult};
pub use selector::{SelectorError, SelectorList};
pub use tree::{Ancestors, Children, Descendants, DomTree};

use serde::Serialize;

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root (document) node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check that this is not the `NONE` sentinel
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Arena index of the node
    #[inline]
    pub fn index(self) -> u32 {
        self.0
    }
}
