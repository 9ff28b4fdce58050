//! Markup arena: slotmap-backed element tree, queries and HTML serialization.

pub mod node;
pub mod tree;
pub mod query;
pub mod serialize;

pub use node::{MarkupNode, NodeFlags, NodeId, NodeRole};
pub use serialize::{SerializeOptions, Surface};
pub use tree::MarkupTree;
