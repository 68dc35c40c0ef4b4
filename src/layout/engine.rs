//! Recursive box-model layout.
//!
//! [`LayoutEngine`] computes every node's local box in a single top-down pass.
//! The caller supplies an available size for the root (usually the surface);
//! each node then lays out its visible children with its own strategy
//! (column, row or absolute) and recurses into the ones that are dirty.

use crate::config::TraceFlags;
use crate::dom::{Direction, Dom, ExplicitMask, NodeId};
use crate::geometry::{Region, Size};
use crate::widget::Intrinsic;

use super::{absolute, flow, measure};

// ---------------------------------------------------------------------------
// LayoutConfig
// ---------------------------------------------------------------------------

/// Metrics used for intrinsic size estimates.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Advance of one character at the default font size.
    pub char_width: f32,
    /// Height of a single text line.
    pub line_height: f32,
    /// Width reported by containers with nothing better to say.
    pub container_width: f32,
    /// Minimum button height.
    pub button_height: f32,
    /// Horizontal button padding used when the node sets none.
    pub button_padding: f32,
    pub input_size: Size,
    pub dropdown_size: Size,
    /// Edge length of a checkbox square.
    pub checkbox_size: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            char_width: 8.0,
            line_height: 20.0,
            container_width: 100.0,
            button_height: 30.0,
            button_padding: 20.0,
            input_size: Size::new(200.0, 30.0),
            dropdown_size: Size::new(150.0, 30.0),
            checkbox_size: 20.0,
        }
    }
}

impl LayoutConfig {
    /// Character advance for a font size and weight.
    ///
    /// Without a font size the configured `char_width` is used; otherwise the
    /// advance is half the font size. Bold widens by 20%, italic by 5%.
    pub fn char_advance(&self, font_size: Option<f32>, bold: bool, italic: bool) -> f32 {
        let mut advance = font_size.map_or(self.char_width, |size| size * 0.5);
        if bold {
            advance *= 1.2;
        }
        if italic {
            advance *= 1.05;
        }
        advance
    }

    /// Width of `text` at the default advance.
    pub fn text_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.char_width
    }
}

// ---------------------------------------------------------------------------
// LayoutEngine
// ---------------------------------------------------------------------------

/// Computes node boxes from available space, intrinsic sizes, explicit
/// overrides, flex weights and alignment.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
    trace: bool,
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config, trace: false }
    }

    /// Emit a `trace!` event per laid-out node when `flags.layout` is set.
    pub fn with_trace(mut self, flags: TraceFlags) -> Self {
        self.trace = flags.layout;
        self
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lay out the subtree under `root` inside `available`.
    ///
    /// The root is placed at (0, 0). Stale handles are ignored.
    pub fn compute(&self, dom: &mut Dom, root: NodeId, available: Size) {
        let Some(node) = dom.node_mut(root) else { return };
        node.bounds.x = 0.0;
        node.bounds.y = 0.0;
        self.layout_node(dom, root, available);
    }

    /// Intrinsic size of a node, including the content estimate for
    /// containers.
    pub fn intrinsic(&self, dom: &Dom, id: NodeId) -> Intrinsic {
        measure::intrinsic(dom, id, &self.config)
    }

    fn layout_node(&self, dom: &mut Dom, id: NodeId, available: Size) {
        let direction = {
            let Some(node) = dom.node_mut(id) else { return };
            if !node.explicit.contains(ExplicitMask::WIDTH) {
                node.bounds.width = available.width.max(0.0);
            }
            if !node.explicit.contains(ExplicitMask::HEIGHT) {
                node.bounds.height = available.height.max(0.0);
            }
            node.direction
        };

        match direction {
            Direction::Column => flow::layout_column(dom, id, &self.config),
            Direction::Row => flow::layout_row(dom, id, &self.config),
            Direction::Absolute => absolute::layout_absolute(dom, id, &self.config),
        }

        if self.trace {
            if let Some(node) = dom.get(id) {
                let b = node.bounds;
                tracing::trace!(
                    node = ?id,
                    kind = node.widget.kind_name(),
                    x = b.x,
                    y = b.y,
                    width = b.width,
                    height = b.height,
                    "layout"
                );
            }
        }

        let pending: Vec<(NodeId, Size)> = measure::visible_children(dom, id)
            .filter_map(|c| dom.get(c).filter(|n| n.dirty).map(|n| (c, n.bounds.size())))
            .collect();
        for (child, size) in pending {
            self.layout_node(dom, child, size);
        }

        // Hidden subtrees keep no geometry; showing one invalidates it again.
        let hidden: Vec<NodeId> = dom
            .children(id)
            .iter()
            .copied()
            .filter(|&c| dom.get(c).is_some_and(|n| !n.visible && n.dirty))
            .collect();
        for child in hidden {
            for n in dom.walk_depth_first(child) {
                dom.mark_clean(n);
            }
        }
        dom.mark_clean(id);
    }
}

/// Write a child's computed box.
///
/// A child whose size changes is flagged dirty so the pass descends into it
/// even if nothing inside it changed. Its parent is being laid out, so the
/// ancestor chain is already dirty.
pub(super) fn place(dom: &mut Dom, id: NodeId, region: Region) {
    if let Some(node) = dom.node_mut(id) {
        if node.bounds.size() != region.size() {
            node.dirty = true;
        }
        node.bounds = region;
    }
}

// ===========================================================================
// Tests
// ===========================================================================
