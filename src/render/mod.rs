//! Rendering pipeline: draw commands, command sink, tree walk, backend trait.

pub mod command;
pub mod frame;

pub use command::{CommandSink, DrawCommand};
pub use frame::{render_tree, Backend, RenderCx};
