//! Canvas widget: user-drawn content.
//!
//! The draw callback receives the render context and pushes its own commands,
//! clipped to the node's box. Timer events drive the update callback for
//! animation.

use crate::dom::{NodeData, NodeId};
use crate::event::{EventCx, EventKind, InputRecord};
use crate::geometry::Size;
use crate::layout::LayoutConfig;
use crate::render::{CommandSink, RenderCx};
use crate::widget::{Intrinsic, Widget};

type DrawFn = Box<dyn Fn(&RenderCx<'_>, &mut CommandSink)>;
type UpdateFn = Box<dyn FnMut(NodeId, u32)>;

/// A drawing surface.
#[derive(Default)]
pub struct Canvas {
    size: Option<Size>,
    on_draw: Option<DrawFn>,
    on_update: Option<UpdateFn>,
}

impl Canvas {
    /// A canvas that takes whatever space layout gives it.
    pub fn new() -> Self {
        Self::default()
    }

    /// A canvas with a fixed intrinsic size.
    pub fn sized(width: f32, height: f32) -> Self {
        Self { size: Some(Size::new(width, height)), ..Self::default() }
    }

    pub fn on_draw(mut self, f: impl Fn(&RenderCx<'_>, &mut CommandSink) + 'static) -> Self {
        self.on_draw = Some(Box::new(f));
        self
    }

    /// Called with the node and the event timestamp on every timer tick.
    pub fn on_update(mut self, f: impl FnMut(NodeId, u32) + 'static) -> Self {
        self.on_update = Some(Box::new(f));
        self
    }

    pub fn size(&self) -> Option<Size> {
        self.size
    }
}

impl Widget for Canvas {
    fn kind_name(&self) -> &'static str {
        "canvas"
    }

    fn measure(&self, _node: &NodeData, _metrics: &LayoutConfig) -> Intrinsic {
        self.size.map_or(Intrinsic::NONE, |s| Intrinsic::new(s.width, s.height))
    }

    fn render(&self, cx: &RenderCx<'_>, sink: &mut CommandSink) {
        cx.paint_box(sink);
        if let Some(draw) = &self.on_draw {
            sink.push_clip(cx.bounds());
            draw(cx, sink);
            sink.pop_clip();
        }
    }

    fn on_event(&mut self, cx: &mut EventCx, event: &InputRecord) -> bool {
        if event.kind != EventKind::Timer {
            return false;
        }
        if let Some(update) = self.on_update.as_mut() {
            update(cx.id(), event.timestamp);
            cx.request_repaint();
        }
        true
    }
}
