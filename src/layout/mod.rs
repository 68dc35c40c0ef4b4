//! Layout engine: a recursive top-down box-model pass with column, row and
//! absolute strategies, flex-grow distribution and alignment.

pub mod absolute;
pub mod engine;
pub mod flow;
pub mod measure;

pub use engine::{LayoutConfig, LayoutEngine};
