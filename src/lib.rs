//! # loom-ui
//!
//! A retained-mode UI core for desktop hosts and small embedded targets.
//!
//! loom-ui keeps a tree of widget nodes, resolves imperative style rules
//! against it by selector specificity, lays it out with column, row and
//! absolute boxes, routes input by z-ordered hit-testing with bubbling, and
//! emits a flat stream of drawing commands for a backend to execute.
//!
//! ## Core Systems
//!
//! - **[`dom`]**: slotmap-backed node arena with dirty tracking and queries
//! - **[`style`]**: selector groups, additive specificity, rule tables
//! - **[`layout`]**: column/row/absolute layout with flex and alignment
//! - **[`event`]**: input records, hit-testing, dispatch with bubbling
//! - **[`widget`]**: the per-kind `Widget` trait and the `WidgetKind` union
//! - **[`widgets`]**: built-in kinds (Container, Text, Button, Canvas, Spacer,
//!   Checkbox, Input, Dropdown, Inline)
//! - **[`render`]**: command sink, render walk, `Backend` trait
//! - **[`screen`]**: one surface driving style, layout, render and input
//! - **[`config`]**: engine presets, storage mode, trace toggles
//! - **[`geometry`]** / **[`color`]**: Point, Size, Region, Spacing, Color

// Foundation
pub mod color;
pub mod error;
pub mod geometry;

// Core systems
pub mod config;
pub mod dom;
pub mod layout;
pub mod style;

// Widget system
pub mod widget;
pub mod widgets;

// Events
pub mod event;

// Rendering
pub mod render;

// Surface
pub mod screen;

pub use color::Color;
pub use config::{EngineConfig, StorageMode, TraceFlags};
pub use dom::{Align, Direction, Dom, ExplicitMask, NodeData, NodeId};
pub use error::{Result, UiError};
pub use event::{EventKind, EventRouter, InputRecord};
pub use geometry::{Point, Region, Size, Spacing};
pub use layout::{LayoutConfig, LayoutEngine};
pub use render::{Backend, CommandSink, DrawCommand};
pub use screen::Screen;
pub use style::{Property, SelectorGroup, StyleContext, StyleRule};
pub use widget::{Widget, WidgetKind};
