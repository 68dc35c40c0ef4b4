//! Render walk: visits the laid-out tree and lets each widget kind emit
//! commands, then hands the sink to a [`Backend`].
//!
//! Children are painted in child order, stably reordered by z-index so a
//! higher z-index paints on top. Invisible nodes skip their whole subtree.

use crate::color::Color;
use crate::dom::{Dom, NodeData, NodeId};
use crate::geometry::{Point, Region, Size};
use crate::layout::LayoutConfig;

use super::command::{CommandSink, DrawCommand};

// ---------------------------------------------------------------------------
// RenderCx
// ---------------------------------------------------------------------------

/// What a widget kind sees while rendering.
pub struct RenderCx<'a> {
    dom: &'a Dom,
    id: NodeId,
    node: &'a NodeData,
    bounds: Region,
    metrics: &'a LayoutConfig,
}

impl<'a> RenderCx<'a> {
    /// Build a context for `id`, computing its absolute box.
    pub fn new(dom: &'a Dom, id: NodeId, metrics: &'a LayoutConfig) -> Option<Self> {
        let node = dom.get(id)?;
        let bounds = dom.absolute_bounds(id)?;
        Some(Self { dom, id, node, bounds, metrics })
    }

    fn at(
        dom: &'a Dom,
        id: NodeId,
        node: &'a NodeData,
        parent_origin: Point,
        metrics: &'a LayoutConfig,
    ) -> Self {
        Self {
            dom,
            id,
            node,
            bounds: node.bounds.translate(parent_origin),
            metrics,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn node(&self) -> &'a NodeData {
        self.node
    }

    pub fn dom(&self) -> &'a Dom {
        self.dom
    }

    /// The node's box in absolute coordinates.
    pub fn bounds(&self) -> Region {
        self.bounds
    }

    /// Text metrics shared with layout.
    pub fn metrics(&self) -> &'a LayoutConfig {
        self.metrics
    }

    /// The box inside the padding.
    pub fn content(&self) -> Region {
        self.bounds.shrink(self.node.padding)
    }

    /// Inherited text color.
    pub fn text_color(&self) -> Color {
        self.dom.effective_text_color(self.id)
    }

    /// Paint the node's own background and border, if set.
    pub fn paint_box(&self, sink: &mut CommandSink) {
        self.paint_box_with(sink, self.node.background_color);
    }

    /// Like [`paint_box`](Self::paint_box) with an explicit fill color.
    pub fn paint_box_with(&self, sink: &mut CommandSink, fill: Color) {
        if fill.is_set() {
            sink.fill_rect(self.bounds, fill);
        }
        if self.node.border_width > 0.0 && self.node.border_color.is_set() {
            sink.stroke_rect(self.bounds, self.node.border_color, self.node.border_width);
        }
    }
}

// ---------------------------------------------------------------------------
// Backend
// ---------------------------------------------------------------------------

/// Executes command streams. Implemented by framebuffer or GPU renderers.
pub trait Backend {
    fn begin_frame(&mut self, _size: Size) {}

    fn execute(&mut self, commands: &[DrawCommand]);

    fn end_frame(&mut self) {}
}

// ---------------------------------------------------------------------------
// Walk
// ---------------------------------------------------------------------------

/// Render the subtree under `root` into `sink`.
pub fn render_tree(dom: &Dom, root: NodeId, metrics: &LayoutConfig, sink: &mut CommandSink) {
    let Some(node) = dom.get(root) else { return };
    let parent_origin = dom.absolute_origin(root) - node.bounds.origin();
    render_node(dom, root, parent_origin, metrics, sink);
}

fn render_node(
    dom: &Dom,
    id: NodeId,
    parent_origin: Point,
    metrics: &LayoutConfig,
    sink: &mut CommandSink,
) {
    let Some(node) = dom.get(id) else { return };
    if !node.visible {
        return;
    }
    let cx = RenderCx::at(dom, id, node, parent_origin, metrics);
    node.widget.behavior().render(&cx, sink);

    let origin = cx.bounds().origin();
    // Z-index overrides child order. The sort is stable, so equal z keeps it.
    let mut children = dom.children(id).to_vec();
    children.sort_by_key(|&c| dom.get(c).map_or(0, |n| n.z_index));
    for child in children {
        render_node(dom, child, origin, metrics, sink);
    }
}

// ===========================================================================
// Tests
// ===========================================================================
