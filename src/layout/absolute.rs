//! Absolute strategy: children sit at their explicit offsets.

use crate::dom::{Dom, ExplicitMask, NodeId};
use crate::geometry::Region;

use super::engine::{place, LayoutConfig};
use super::measure;

/// Position each visible child at its explicit x/y (else its left/top
/// margin), sized explicitly or intrinsically and clamped to the parent.
pub fn layout_absolute(dom: &mut Dom, id: NodeId, config: &LayoutConfig) {
    let Some(parent) = dom.get(id) else { return };
    let (width, height) = (parent.bounds.width, parent.bounds.height);
    let auto_height = height <= 0.0 && !parent.explicit.contains(ExplicitMask::HEIGHT);
    let padding_bottom = parent.padding.bottom;

    let placed: Vec<(NodeId, Region, f32)> = measure::visible_children(dom, id)
        .filter_map(|child| {
            let node = dom.get(child)?;
            let x = if node.explicit.contains(ExplicitMask::X) {
                node.explicit_offset.x
            } else {
                node.margin.left
            };
            let y = if node.explicit.contains(ExplicitMask::Y) {
                node.explicit_offset.y
            } else {
                node.margin.top
            };
            let mut w = measure::base_width(dom, child, config).unwrap_or(0.0);
            let mut h = measure::base_height(dom, child, config, w);
            if width > 0.0 && x + w > width {
                w = (width - x).max(0.0);
            }
            if height > 0.0 && y + h > height {
                h = (height - y).max(0.0);
            }
            Some((child, Region::new(x, y, w, h), node.margin.bottom))
        })
        .collect();

    let mut bottom: f32 = 0.0;
    for &(child, region, margin_bottom) in &placed {
        place(dom, child, region);
        bottom = bottom.max(region.bottom() + margin_bottom);
    }

    if auto_height {
        if let Some(node) = dom.node_mut(id) {
            node.bounds.height = bottom + padding_bottom;
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Direction, NodeData};
    use crate::geometry::{Size, Spacing};
    use crate::layout::LayoutEngine;
    use crate::widgets::{Container, Text};

    fn overlay(dom: &mut Dom) -> NodeId {
        dom.create(NodeData::new(Container::new()).with_direction(Direction::Absolute))
            .unwrap()
    }

    #[test]
    fn explicit_offsets_are_used() {
        let mut dom = Dom::new();
        let root = overlay(&mut dom);
        let a = dom
            .create(NodeData::new(Container::new()).with_offset(10.0, 20.0).with_size(30.0, 30.0))
            .unwrap();
        dom.attach(root, a).unwrap();
        LayoutEngine::default().compute(&mut dom, root, Size::new(200.0, 200.0));
        assert_eq!(dom.get(a).unwrap().bounds, Region::new(10.0, 20.0, 30.0, 30.0));
    }

    #[test]
    fn margin_positions_without_offset() {
        let mut dom = Dom::new();
        let root = overlay(&mut dom);
        let t = dom
            .create(NodeData::new(Text::new("hi")).with_margin(Spacing::new(4.0, 0.0, 0.0, 6.0)))
            .unwrap();
        dom.attach(root, t).unwrap();
        LayoutEngine::default().compute(&mut dom, root, Size::new(200.0, 200.0));
        assert_eq!(dom.get(t).unwrap().bounds, Region::new(6.0, 4.0, 16.0, 20.0));
    }

    #[test]
    fn children_are_clamped_to_parent() {
        let mut dom = Dom::new();
        let root = overlay(&mut dom);
        let a = dom
            .create(NodeData::new(Container::new()).with_offset(80.0, 90.0).with_size(50.0, 50.0))
            .unwrap();
        dom.attach(root, a).unwrap();
        LayoutEngine::default().compute(&mut dom, root, Size::new(100.0, 100.0));
        assert_eq!(dom.get(a).unwrap().bounds, Region::new(80.0, 90.0, 20.0, 10.0));
    }

    #[test]
    fn explicit_zero_height_is_not_auto_sized() {
        let mut dom = Dom::new();
        let root = dom
            .create(
                NodeData::new(Container::new())
                    .with_direction(Direction::Absolute)
                    .with_height(0.0),
            )
            .unwrap();
        let a = dom
            .create(NodeData::new(Text::new("x")).with_offset(0.0, 10.0))
            .unwrap();
        dom.attach(root, a).unwrap();
        LayoutEngine::default().compute(&mut dom, root, Size::new(100.0, 0.0));
        assert_eq!(dom.get(root).unwrap().bounds.height, 0.0);
    }

    #[test]
    fn auto_height_covers_lowest_child() {
        let mut dom = Dom::new();
        let root = overlay(&mut dom);
        let a = dom
            .create(NodeData::new(Text::new("x")).with_offset(0.0, 50.0))
            .unwrap();
        dom.attach(root, a).unwrap();
        LayoutEngine::default().compute(&mut dom, root, Size::new(100.0, 0.0));
        assert_eq!(dom.get(root).unwrap().bounds.height, 70.0);
    }
}
