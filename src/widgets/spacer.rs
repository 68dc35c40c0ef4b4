//! Spacer widget: invisible filler that soaks up leftover space.

use crate::dom::NodeData;
use crate::layout::LayoutConfig;
use crate::render::{CommandSink, RenderCx};
use crate::widget::{Intrinsic, Widget};

/// Empty space with a configured size and a flex-grow weight.
///
/// `Spacer::new()` grows with weight 1 and has no size of its own, so it
/// pushes its siblings apart. `Spacer::fixed` reserves a fixed gap instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Spacer {
    width: f32,
    height: f32,
    grow: f32,
}

impl Default for Spacer {
    fn default() -> Self {
        Self::new()
    }
}

impl Spacer {
    pub fn new() -> Self {
        Self { width: 0.0, height: 0.0, grow: 1.0 }
    }

    /// A non-growing spacer of exactly `width` × `height`.
    pub fn fixed(width: f32, height: f32) -> Self {
        Self { width, height, grow: 0.0 }
    }

    pub fn with_grow(mut self, grow: f32) -> Self {
        self.grow = grow;
        self
    }
}

impl Widget for Spacer {
    fn kind_name(&self) -> &'static str {
        "spacer"
    }

    fn measure(&self, _node: &NodeData, _metrics: &LayoutConfig) -> Intrinsic {
        Intrinsic::new(self.width, self.height)
    }

    fn render(&self, _cx: &RenderCx<'_>, _sink: &mut CommandSink) {}

    fn flex_grow_hint(&self) -> f32 {
        self.grow
    }
}
