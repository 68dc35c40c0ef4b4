//! Node arena: slotmap-backed widget tree with dirty tracking and queries.

pub mod node;
pub mod tree;
pub mod query;

pub use node::{Align, Direction, ExplicitMask, NodeData, NodeId};
pub use tree::Dom;
