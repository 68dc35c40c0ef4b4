//! Point hit-testing with z-index tie-breaking.
//!
//! A node's hit box is its laid-out box in absolute coordinates, extended
//! downward by whatever its widget kind reports (an open dropdown covers its
//! option strip). Invisible nodes and their subtrees never match.
//!
//! Extension strips are searched first across the whole visible tree, since
//! they routinely hang outside their ancestors' boxes. Everything else is
//! found by descending only into boxes that contain the point.

use crate::dom::{Dom, NodeId};
use crate::geometry::{Point, Region};

/// Find the target for a point under `root`.
///
/// Among children whose hit box contains the point, the one whose resolved
/// target has the highest z-index wins; equal z-indices keep the earliest
/// child. With no matching child, the node itself is the target.
pub fn find_target(dom: &Dom, root: NodeId, x: f32, y: f32, trace: bool) -> Option<NodeId> {
    let node = dom.get(root)?;
    let parent_origin = dom.absolute_origin(root) - node.bounds.origin();
    let target = find_overlay(dom, root, parent_origin, x, y)
        .map(|(id, _)| id)
        .or_else(|| find_in(dom, root, parent_origin, x, y));
    if trace {
        tracing::trace!(x, y, ?target, "hit test");
    }
    target
}

/// The absolute hit box of `id`, given its parent's absolute origin.
pub fn hit_box(dom: &Dom, id: NodeId, parent_origin: Point) -> Option<Region> {
    let node = dom.get(id)?;
    let mut region = node.bounds.translate(parent_origin);
    region.height += node.widget.behavior().hit_extension(node);
    Some(region)
}

/// Highest-z visible node whose extension strip (below its own box)
/// contains the point. Ancestor boxes do not clip the search.
fn find_overlay(dom: &Dom, id: NodeId, parent_origin: Point, x: f32, y: f32) -> Option<(NodeId, u16)> {
    let node = dom.get(id)?;
    if !node.visible {
        return None;
    }
    let region = node.bounds.translate(parent_origin);
    let extension = node.widget.behavior().hit_extension(node);

    let mut best = None;
    if extension > 0.0 && Region::new(region.x, region.bottom(), region.width, extension).contains(x, y) {
        best = Some((id, node.z_index));
    }
    for &child in dom.children(id) {
        let Some((hit, z)) = find_overlay(dom, child, region.origin(), x, y) else {
            continue;
        };
        match best {
            Some((_, best_z)) if z <= best_z => {}
            _ => best = Some((hit, z)),
        }
    }
    best
}

fn find_in(dom: &Dom, id: NodeId, parent_origin: Point, x: f32, y: f32) -> Option<NodeId> {
    if !dom.get(id)?.visible {
        return None;
    }
    let region = hit_box(dom, id, parent_origin)?;
    if !region.contains(x, y) {
        return None;
    }

    let origin = region.origin();
    let mut best: Option<(NodeId, u16)> = None;
    for &child in dom.children(id) {
        let Some(hit) = find_in(dom, child, origin, x, y) else {
            continue;
        };
        let z = dom.get(hit).map_or(0, |n| n.z_index);
        match best {
            Some((_, best_z)) if z <= best_z => {}
            _ => best = Some((hit, z)),
        }
    }
    Some(best.map_or(id, |(hit, _)| hit))
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::NodeData;
    use crate::widgets::{Container, Dropdown};

    fn boxed(dom: &mut Dom, parent: Option<NodeId>, x: f32, y: f32, w: f32, h: f32) -> NodeId {
        let id = dom.create(NodeData::new(Container::new())).unwrap();
        dom.set_bounds(id, x, y, w, h);
        if let Some(p) = parent {
            dom.attach(p, id).unwrap();
        }
        id
    }

    #[test]
    fn deepest_node_wins() {
        let mut dom = Dom::new();
        let root = boxed(&mut dom, None, 0.0, 0.0, 200.0, 200.0);
        let panel = boxed(&mut dom, Some(root), 50.0, 50.0, 100.0, 100.0);
        let leaf = boxed(&mut dom, Some(panel), 10.0, 10.0, 20.0, 20.0);

        assert_eq!(find_target(&dom, root, 65.0, 65.0, false), Some(leaf));
        assert_eq!(find_target(&dom, root, 140.0, 140.0, false), Some(panel));
        assert_eq!(find_target(&dom, root, 5.0, 5.0, false), Some(root));
        assert_eq!(find_target(&dom, root, 250.0, 5.0, false), None);
    }

    #[test]
    fn higher_z_wins_regardless_of_order() {
        for high_first in [false, true] {
            let mut dom = Dom::new();
            let root = boxed(&mut dom, None, 0.0, 0.0, 100.0, 100.0);
            let (first_z, second_z) = if high_first { (2, 1) } else { (1, 2) };
            let first = boxed(&mut dom, Some(root), 10.0, 10.0, 50.0, 50.0);
            let second = boxed(&mut dom, Some(root), 20.0, 20.0, 50.0, 50.0);
            dom.set_z_index(first, first_z);
            dom.set_z_index(second, second_z);

            let expected = if high_first { first } else { second };
            assert_eq!(find_target(&dom, root, 30.0, 30.0, false), Some(expected));
        }
    }

    #[test]
    fn equal_z_keeps_first_child() {
        let mut dom = Dom::new();
        let root = boxed(&mut dom, None, 0.0, 0.0, 100.0, 100.0);
        let first = boxed(&mut dom, Some(root), 0.0, 0.0, 50.0, 50.0);
        let _second = boxed(&mut dom, Some(root), 0.0, 0.0, 50.0, 50.0);
        assert_eq!(find_target(&dom, root, 10.0, 10.0, false), Some(first));
    }

    #[test]
    fn invisible_subtrees_are_skipped() {
        let mut dom = Dom::new();
        let root = boxed(&mut dom, None, 0.0, 0.0, 100.0, 100.0);
        let hidden = boxed(&mut dom, Some(root), 0.0, 0.0, 50.0, 50.0);
        let _inner = boxed(&mut dom, Some(hidden), 0.0, 0.0, 10.0, 10.0);
        dom.set_visible(hidden, false);
        assert_eq!(find_target(&dom, root, 5.0, 5.0, false), Some(root));

        dom.set_visible(root, false);
        assert_eq!(find_target(&dom, root, 5.0, 5.0, false), None);
    }

    #[test]
    fn child_outside_parent_is_unreachable() {
        let mut dom = Dom::new();
        let root = boxed(&mut dom, None, 0.0, 0.0, 50.0, 50.0);
        let _escapee = boxed(&mut dom, Some(root), 60.0, 0.0, 20.0, 20.0);
        assert_eq!(find_target(&dom, root, 65.0, 5.0, false), None);
    }

    #[test]
    fn open_dropdown_extends_downward() {
        let mut dom = Dom::new();
        let root = boxed(&mut dom, None, 0.0, 0.0, 300.0, 300.0);
        let dd = dom
            .create(NodeData::new(Dropdown::new(["a", "b", "c"])))
            .unwrap();
        dom.set_bounds(dd, 10.0, 10.0, 100.0, 20.0);
        dom.attach(root, dd).unwrap();

        // Closed: only the header box.
        assert_eq!(find_target(&dom, root, 20.0, 45.0, false), Some(root));

        dom.update_widget(dd, |w| {
            if let Some(d) = w.as_dropdown_mut() {
                d.set_open(true);
            }
        });
        // Open: 3 options × 20px below the header.
        assert_eq!(find_target(&dom, root, 20.0, 45.0, false), Some(dd));
        assert_eq!(find_target(&dom, root, 20.0, 89.0, false), Some(dd));
        assert_eq!(find_target(&dom, root, 20.0, 90.0, false), Some(root));
    }

    #[test]
    fn open_strip_escapes_a_short_parent() {
        let mut dom = Dom::new();
        let root = boxed(&mut dom, None, 0.0, 0.0, 300.0, 300.0);
        let bar = boxed(&mut dom, Some(root), 0.0, 0.0, 300.0, 20.0);
        let below = boxed(&mut dom, Some(root), 0.0, 20.0, 300.0, 200.0);
        let dd = dom.create(NodeData::new(Dropdown::new(["a", "b"]))).unwrap();
        dom.set_bounds(dd, 10.0, 0.0, 100.0, 20.0);
        dom.attach(bar, dd).unwrap();

        assert_eq!(find_target(&dom, root, 20.0, 45.0, false), Some(below));
        dom.update_widget(dd, |w| {
            if let Some(d) = w.as_dropdown_mut() {
                d.set_open(true);
            }
        });
        assert_eq!(find_target(&dom, root, 20.0, 45.0, false), Some(dd));
        // Beside the strip the sibling still wins.
        assert_eq!(find_target(&dom, root, 150.0, 45.0, false), Some(below));
        // A hidden bar hides its dropdown's strip too.
        dom.set_visible(bar, false);
        assert_eq!(find_target(&dom, root, 20.0, 45.0, false), Some(below));
    }

    #[test]
    fn hit_box_uses_parent_origin() {
        let mut dom = Dom::new();
        let root = boxed(&mut dom, None, 5.0, 5.0, 10.0, 10.0);
        let region = hit_box(&dom, root, Point::new(100.0, 0.0)).unwrap();
        assert_eq!(region, Region::new(105.0, 5.0, 10.0, 10.0));
    }
}
