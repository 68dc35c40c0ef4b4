//! Widget trait: the per-kind behaviour attached to every node.
//!
//! Each built-in kind implements [`Widget`] once. The node tree stores the
//! concrete state in [`WidgetKind`](super::WidgetKind), so typed access never
//! needs a downcast. User kinds plug in through `WidgetKind::Custom`.

use crate::dom::{NodeData, NodeId};
use crate::event::{EventCx, InputRecord};
use crate::layout::LayoutConfig;
use crate::render::{CommandSink, RenderCx};

/// Intrinsic size estimate. `None` means "no preference on this axis".
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Intrinsic {
    pub width: Option<f32>,
    pub height: Option<f32>,
}

impl Intrinsic {
    pub const NONE: Intrinsic = Intrinsic { width: None, height: None };

    pub fn new(width: f32, height: f32) -> Self {
        Self { width: Some(width), height: Some(height) }
    }

    pub fn width(width: f32) -> Self {
        Self { width: Some(width), height: None }
    }
}

/// Behaviour of one widget kind.
///
/// Only [`kind_name`](Widget::kind_name) is required; every other hook has a
/// do-nothing default.
pub trait Widget {
    /// Name matched by type selectors (e.g. `"button"`).
    fn kind_name(&self) -> &'static str;

    /// Estimate the natural size of the node before layout.
    fn measure(&self, _node: &NodeData, _metrics: &LayoutConfig) -> Intrinsic {
        Intrinsic::NONE
    }

    /// Emit drawing commands for this node. Children are rendered separately.
    fn render(&self, cx: &RenderCx<'_>, sink: &mut CommandSink) {
        cx.paint_box(sink);
    }

    /// Handle an event addressed to this node. Returning `true` consumes it
    /// and stops bubbling.
    fn on_event(&mut self, _cx: &mut EventCx, _event: &InputRecord) -> bool {
        false
    }

    /// Called once when the node is destroyed, after all of its children.
    fn on_destroy(&mut self, _id: NodeId) {}

    /// Extra height added below the node's box for hit-testing.
    fn hit_extension(&self, _node: &NodeData) -> f32 {
        0.0
    }

    /// Answer a pseudo-class selector such as `hover` or `checked`.
    fn pseudo_class(&self, _name: &str) -> bool {
        false
    }

    /// Whether the node takes keyboard focus from a click or Tab.
    fn focusable(&self) -> bool {
        false
    }

    /// Flex-grow weight used when the node has none of its own.
    fn flex_grow_hint(&self) -> f32 {
        0.0
    }

    /// The text carried by this kind, if any.
    fn text(&self) -> Option<&str> {
        None
    }

    /// Replace the text. Returns `false` for kinds without text.
    fn set_text(&mut self, _text: &str) -> bool {
        false
    }
}
