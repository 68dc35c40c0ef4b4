//! Event system: input records, hit-testing, dispatch with bubbling.

pub mod handler;
pub mod hit_test;
pub mod input;

pub use handler::{Dispatch, EventCx, EventRouter, Handler};
pub use input::{keys, EventKind, InputRecord, PRESS_BIT};
