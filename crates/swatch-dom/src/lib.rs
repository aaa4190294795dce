//! Swatch DOM - Document tree
//!
//! Arena-allocated element tree: ordered children, per-element class lists,
//! attributes and text content.

mod node;
mod tree;
mod document;
mod operations;
mod serializer;

pub use node::{Node, NodeData, ElementData, Attribute};
pub use tree::{DomTree, Children};
pub use document::Document;
pub use operations::{DomError, DomResult};
pub use serializer::HtmlSerializer;

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root node ID
    pub const ROOT: NodeId = NodeId(0);
    /// Sentinel for "no node" in sibling/parent links
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check this id points at a node rather than `NONE`
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}
