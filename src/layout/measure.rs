//! Intrinsic size estimation.
//!
//! Leaf kinds measure themselves through [`Widget::measure`]. A node that
//! reports no intrinsic height but has visible children is estimated from its
//! children's base sizes, stacked according to its direction.
//!
//! [`Widget::measure`]: crate::widget::Widget::measure

use super::engine::LayoutConfig;
use crate::dom::{Align, Direction, Dom, ExplicitMask, NodeId};
use crate::geometry::Spacing;
use crate::widget::Intrinsic;

/// Intrinsic size of `id` at its current width, falling back to a content
/// estimate for height.
pub fn intrinsic(dom: &Dom, id: NodeId, config: &LayoutConfig) -> Intrinsic {
    let width = dom.get(id).map_or(0.0, |n| n.bounds.width);
    intrinsic_within(dom, id, config, width)
}

/// Intrinsic size of `id` if it were given `width`. The width only matters
/// to the content estimate of wrapping rows.
pub fn intrinsic_within(dom: &Dom, id: NodeId, config: &LayoutConfig, width: f32) -> Intrinsic {
    let Some(node) = dom.get(id) else {
        return Intrinsic::NONE;
    };
    let mut size = node.widget.behavior().measure(node, config);
    if size.height.is_none() && has_visible_children(dom, id) {
        size.height = Some(content_height(dom, id, config, width));
    }
    size
}

/// Width before flex and stretch: explicit, else intrinsic.
pub fn base_width(dom: &Dom, id: NodeId, config: &LayoutConfig) -> Option<f32> {
    let node = dom.get(id)?;
    if node.explicit.contains(ExplicitMask::WIDTH) {
        return Some(node.bounds.width);
    }
    node.widget
        .behavior()
        .measure(node, config)
        .width
        .filter(|w| *w > 0.0)
}

/// Height before flex and stretch when laid out `width` wide: explicit,
/// else intrinsic, else zero.
pub fn base_height(dom: &Dom, id: NodeId, config: &LayoutConfig, width: f32) -> f32 {
    let Some(node) = dom.get(id) else { return 0.0 };
    if node.explicit.contains(ExplicitMask::HEIGHT) {
        return node.bounds.height;
    }
    intrinsic_within(dom, id, config, width)
        .height
        .unwrap_or(0.0)
        .max(0.0)
}

/// Width a column gives `child` before flex: explicit, else the full
/// `avail` when stretched or unmeasured, else intrinsic clamped to `avail`.
pub(crate) fn column_width(
    dom: &Dom,
    child: NodeId,
    align_items: Align,
    config: &LayoutConfig,
    avail: f32,
) -> f32 {
    let Some(node) = dom.get(child) else { return 0.0 };
    if node.explicit.contains(ExplicitMask::WIDTH) {
        return node.bounds.width;
    }
    if node.align_self.unwrap_or(align_items) == Align::Stretch {
        return avail;
    }
    match base_width(dom, child, config) {
        Some(w) if avail > 0.0 => w.min(avail),
        Some(w) => w,
        None => avail,
    }
}

/// Width a row gives `child` before flex: explicit, else intrinsic clamped
/// to `avail`, else zero.
pub(crate) fn row_width(dom: &Dom, child: NodeId, config: &LayoutConfig, avail: f32) -> f32 {
    let width = base_width(dom, child, config).unwrap_or(0.0);
    let explicit = dom
        .get(child)
        .is_some_and(|n| n.explicit.contains(ExplicitMask::WIDTH));
    if explicit || avail <= 0.0 {
        width
    } else {
        width.min(avail)
    }
}

/// Split items into lines of indices. A new line starts when the next item
/// would overflow `inner_width`; an unknown width never wraps.
pub(crate) fn break_lines(outer_widths: &[f32], inner_width: f32, gap: f32) -> Vec<Vec<usize>> {
    let mut lines = Vec::new();
    let mut line: Vec<usize> = Vec::new();
    let mut line_w = 0.0;
    for (index, &outer) in outer_widths.iter().enumerate() {
        if !line.is_empty() && inner_width > 0.0 && line_w + gap + outer > inner_width {
            lines.push(std::mem::take(&mut line));
            line_w = 0.0;
        }
        line_w += if line.is_empty() { outer } else { gap + outer };
        line.push(index);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Estimated height of the children of `id`, laid out `width` wide,
/// including padding and gaps.
pub fn content_height(dom: &Dom, id: NodeId, config: &LayoutConfig, width: f32) -> f32 {
    let Some(node) = dom.get(id) else { return 0.0 };
    let inner_w = (width - node.padding.horizontal()).max(0.0);
    let children: Vec<NodeId> = visible_children(dom, id).collect();
    let margin_of = |c: NodeId| dom.get(c).map_or(Spacing::ZERO, |n| n.margin);
    let body = match node.direction {
        Direction::Column => {
            let gaps = node.gap * children.len().saturating_sub(1) as f32;
            let stacked: f32 = children
                .iter()
                .map(|&c| {
                    let margin = margin_of(c);
                    let avail = (inner_w - margin.horizontal()).max(0.0);
                    let w = column_width(dom, c, node.align_items, config, avail);
                    base_height(dom, c, config, w) + margin.vertical()
                })
                .sum();
            stacked + gaps
        }
        Direction::Row => {
            let outer: Vec<(f32, f32)> = children
                .iter()
                .map(|&c| {
                    let margin = margin_of(c);
                    let avail = (inner_w - margin.horizontal()).max(0.0);
                    let w = row_width(dom, c, config, avail);
                    (
                        w + margin.horizontal(),
                        base_height(dom, c, config, w) + margin.vertical(),
                    )
                })
                .collect();
            let widths: Vec<f32> = outer.iter().map(|&(w, _)| w).collect();
            let lines = break_lines(&widths, inner_w, node.gap);
            let tallest: f32 = lines
                .iter()
                .map(|line| line.iter().map(|&i| outer[i].1).fold(0.0, f32::max))
                .sum();
            tallest + node.gap * lines.len().saturating_sub(1) as f32
        }
        Direction::Absolute => children
            .iter()
            .map(|&c| {
                let top = dom.get(c).map_or(0.0, |n| {
                    if n.explicit.contains(ExplicitMask::Y) {
                        n.explicit_offset.y
                    } else {
                        0.0
                    }
                });
                let w = base_width(dom, c, config).unwrap_or(0.0);
                top + base_height(dom, c, config, w) + margin_of(c).vertical()
            })
            .fold(0.0, f32::max),
    };
    node.padding.vertical() + body
}

pub(crate) fn visible_children(dom: &Dom, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
    dom.children(id)
        .iter()
        .copied()
        .filter(move |&c| dom.get(c).is_some_and(|n| n.visible))
}

fn has_visible_children(dom: &Dom, id: NodeId) -> bool {
    visible_children(dom, id).next().is_some()
}

// ===========================================================================
// Tests
// ===========================================================================
