//! Widget system: the per-kind behaviour trait and the kind union.

pub mod kind;
pub mod traits;

pub use kind::WidgetKind;
pub use traits::{Intrinsic, Widget};
