//! Flow strategies: vertical column stacking and horizontal wrapping rows.

use crate::dom::{Align, Dom, ExplicitMask, NodeId};
use crate::geometry::{Point, Region, Spacing};

use super::engine::{place, LayoutConfig};
use super::measure;

/// A visible child measured against its parent's content box.
#[derive(Debug, Clone)]
struct Item {
    id: NodeId,
    width: f32,
    height: f32,
    margin: Spacing,
    grow: f32,
    align: Align,
    fixed_width: bool,
    fixed_height: bool,
    nudge: Point,
}

impl Item {
    fn outer_width(&self) -> f32 {
        self.width + self.margin.horizontal()
    }

    fn outer_height(&self) -> f32 {
        self.height + self.margin.vertical()
    }
}

/// Parent fields the strategies read, copied out so the tree can be mutated.
struct Frame {
    size: (f32, f32),
    explicit_height: bool,
    padding: Spacing,
    gap: f32,
    justify: Align,
    align_items: Align,
}

impl Frame {
    fn read(dom: &Dom, id: NodeId) -> Option<Self> {
        let node = dom.get(id)?;
        Some(Self {
            size: (node.bounds.width, node.bounds.height),
            explicit_height: node.explicit.contains(ExplicitMask::HEIGHT),
            padding: node.padding,
            gap: node.gap,
            justify: node.justify_content,
            align_items: node.align_items,
        })
    }

    fn inner_width(&self) -> f32 {
        (self.size.0 - self.padding.horizontal()).max(0.0)
    }

    fn inner_height(&self) -> f32 {
        (self.size.1 - self.padding.vertical()).max(0.0)
    }

    /// No explicit height and none handed down: size to content.
    fn auto_height(&self) -> bool {
        !self.explicit_height && self.size.1 <= 0.0
    }
}

fn collect(
    dom: &Dom,
    id: NodeId,
    frame: &Frame,
    size: impl Fn(&Dom, NodeId, f32) -> (f32, f32),
) -> Vec<Item> {
    measure::visible_children(dom, id)
        .filter_map(|child| {
            let node = dom.get(child)?;
            let avail = (frame.inner_width() - node.margin.horizontal()).max(0.0);
            let (width, height) = size(dom, child, avail);
            let nudge = Point::new(
                if node.explicit.contains(ExplicitMask::X) { node.explicit_offset.x } else { 0.0 },
                if node.explicit.contains(ExplicitMask::Y) { node.explicit_offset.y } else { 0.0 },
            );
            Some(Item {
                id: child,
                width,
                height,
                margin: node.margin,
                grow: node.effective_flex_grow(),
                align: node.align_self.unwrap_or(frame.align_items),
                fixed_width: node.explicit.contains(ExplicitMask::WIDTH),
                fixed_height: node.explicit.contains(ExplicitMask::HEIGHT),
                nudge,
            })
        })
        .collect()
}

/// Leading offset and spacing between consecutive items for a main-axis
/// alignment. `free` is the leftover space after content and gaps.
fn distribute(justify: Align, free: f32, count: usize, gap: f32) -> (f32, f32) {
    let free = free.max(0.0);
    let n = count as f32;
    match justify {
        Align::Center => (free / 2.0, gap),
        Align::End => (free, gap),
        Align::SpaceBetween if count > 1 => (0.0, gap + free / (n - 1.0)),
        Align::SpaceAround if count > 0 => {
            let unit = free / n;
            (unit / 2.0, gap + unit)
        }
        Align::SpaceEvenly if count > 0 => {
            let unit = free / (n + 1.0);
            (unit, gap + unit)
        }
        _ => (0.0, gap),
    }
}

/// Cross-axis offset for an item, possibly stretching `extent`.
fn cross_offset(align: Align, available: f32, extent: &mut f32, fixed: bool) -> f32 {
    match align {
        Align::Center => ((available - *extent) / 2.0).max(0.0),
        Align::End => (available - *extent).max(0.0),
        Align::Stretch => {
            if !fixed {
                *extent = available.max(0.0);
            }
            0.0
        }
        _ => 0.0,
    }
}

/// Share `surplus` among the `members` that `can_grow`, by weight.
///
/// Only growable items count toward the total weight, so fixed items never
/// swallow a share. Returns whether anything grew.
fn grow(
    items: &mut [Item],
    members: &[usize],
    surplus: f32,
    can_grow: impl Fn(&Item) -> bool,
    mut apply: impl FnMut(&mut Item, f32),
) -> bool {
    let view: &[Item] = &*items;
    let total: f32 = members
        .iter()
        .map(|&i| &view[i])
        .filter(|item| can_grow(*item))
        .map(|item| item.grow)
        .sum();
    if surplus <= 0.0 || total <= 0.0 {
        return false;
    }
    for &i in members {
        if can_grow(&items[i]) {
            let share = surplus * items[i].grow / total;
            apply(&mut items[i], share);
        }
    }
    true
}

// ---------------------------------------------------------------------------
// Column
// ---------------------------------------------------------------------------

/// Stack visible children top to bottom.
pub fn layout_column(dom: &mut Dom, id: NodeId, config: &LayoutConfig) {
    let Some(frame) = Frame::read(dom, id) else { return };
    let inner_w = frame.inner_width();

    let mut items = collect(dom, id, &frame, |dom, child, avail| {
        let width = measure::column_width(dom, child, frame.align_items, config, avail);
        (width, measure::base_height(dom, child, config, width))
    });

    let gaps = frame.gap * items.len().saturating_sub(1) as f32;
    let mut content: f32 = items.iter().map(Item::outer_height).sum::<f32>() + gaps;
    let target = if frame.auto_height() { content } else { frame.inner_height() };

    let members: Vec<usize> = (0..items.len()).collect();
    let grew = grow(
        &mut items,
        &members,
        target - content,
        |item| item.grow > 0.0 && !item.fixed_height,
        |item, share| {
            if !item.fixed_width {
                item.width = (inner_w - item.margin.horizontal()).max(0.0);
            }
            item.height += share;
        },
    );
    if grew {
        content = items.iter().map(Item::outer_height).sum::<f32>() + gaps;
    }

    let (lead, between) = distribute(frame.justify, target - content, items.len(), frame.gap);
    let mut cursor = frame.padding.top + lead;
    for item in &mut items {
        let avail = (inner_w - item.margin.horizontal()).max(0.0);
        let cross = cross_offset(item.align, avail, &mut item.width, item.fixed_width);
        let x = frame.padding.left + item.margin.left + cross + item.nudge.x;
        let y = cursor + item.margin.top + item.nudge.y;
        place(dom, item.id, Region::new(x, y, item.width, item.height));
        cursor += item.outer_height() + between;
    }

    if frame.auto_height() {
        let height = frame.padding.top + content + frame.padding.bottom;
        if let Some(node) = dom.node_mut(id) {
            node.bounds.height = height;
        }
    }
}

// ---------------------------------------------------------------------------
// Row
// ---------------------------------------------------------------------------

/// Place visible children left to right, wrapping onto a new line when the
/// next child would overflow the content width.
pub fn layout_row(dom: &mut Dom, id: NodeId, config: &LayoutConfig) {
    let Some(frame) = Frame::read(dom, id) else { return };
    let inner_w = frame.inner_width();

    let mut items = collect(dom, id, &frame, |dom, child, avail| {
        let width = measure::row_width(dom, child, config, avail);
        (width, measure::base_height(dom, child, config, width))
    });

    let outer_widths: Vec<f32> = items.iter().map(Item::outer_width).collect();
    let lines = measure::break_lines(&outer_widths, inner_w, frame.gap);

    let mut line_y = frame.padding.top;
    for (n, indices) in lines.iter().enumerate() {
        if n > 0 {
            line_y += frame.gap;
        }
        let gaps = frame.gap * indices.len().saturating_sub(1) as f32;
        let width_of = |items: &[Item]| indices.iter().map(|&i| items[i].outer_width()).sum::<f32>() + gaps;
        let mut used = width_of(&items);

        let grew = grow(
            &mut items,
            indices,
            inner_w - used,
            |item| item.grow > 0.0 && !item.fixed_width,
            |item, share| item.width += share,
        );
        if grew {
            used = width_of(&items);
        }

        let line_h = indices
            .iter()
            .map(|&i| items[i].outer_height())
            .fold(0.0, f32::max);
        let (lead, between) = distribute(frame.justify, inner_w - used, indices.len(), frame.gap);
        let mut cursor = frame.padding.left + lead;
        for &i in indices {
            let item = &mut items[i];
            let avail = (line_h - item.margin.vertical()).max(0.0);
            let cross = cross_offset(item.align, avail, &mut item.height, item.fixed_height);
            let x = cursor + item.margin.left + item.nudge.x;
            let y = line_y + item.margin.top + cross + item.nudge.y;
            place(dom, item.id, Region::new(x, y, item.width, item.height));
            cursor += item.outer_width() + between;
        }
        line_y += line_h;
    }

    if frame.auto_height() {
        let height = line_y + frame.padding.bottom;
        if let Some(node) = dom.node_mut(id) {
            node.bounds.height = height;
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
