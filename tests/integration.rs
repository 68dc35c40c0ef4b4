//! Integration tests for loom-ui.
//!
//! These tests drive the public API from outside the crate: tree structure,
//! dirty tracking, layout, styles, routing, and full screen frames.

use std::cell::RefCell;
use std::rc::Rc;

use loom_ui::event::Dispatch;
use loom_ui::style::{button_style, SelectorGroup};
use loom_ui::widgets::{Button, Container, Dropdown, Input, Spacer, Text};
use loom_ui::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn container() -> NodeData {
    NodeData::new(Container::new())
}

fn layout(dom: &mut Dom, root: NodeId, width: f32, height: f32) {
    LayoutEngine::default().compute(dom, root, Size::new(width, height));
}

// ---------------------------------------------------------------------------
// Tree structure
// ---------------------------------------------------------------------------

#[test]
fn attaching_a_parented_child_fails_and_changes_nothing() {
    let mut dom = Dom::new();
    let a = dom.create(container()).unwrap();
    let b = dom.create(container()).unwrap();
    let child = dom.create(container()).unwrap();
    dom.attach(a, child).unwrap();

    assert_eq!(dom.attach(b, child), Err(UiError::AlreadyParented(child)));
    assert_eq!(dom.children(a), &[child]);
    assert!(dom.children(b).is_empty());
    assert_eq!(dom.parent(child), Some(a));
}

struct Tracked {
    name: &'static str,
    log: Rc<RefCell<Vec<&'static str>>>,
}

impl Widget for Tracked {
    fn kind_name(&self) -> &'static str {
        "tracked"
    }

    fn on_destroy(&mut self, _id: NodeId) {
        self.log.borrow_mut().push(self.name);
    }
}

#[test]
fn destroy_runs_children_first() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let tracked = |name| NodeData::new(WidgetKind::custom(Tracked { name, log: Rc::clone(&log) }));

    let mut dom = Dom::new();
    let root = dom.create(tracked("root")).unwrap();
    let mid = dom.create(tracked("mid")).unwrap();
    let leaf_a = dom.create(tracked("leaf-a")).unwrap();
    let leaf_b = dom.create(tracked("leaf-b")).unwrap();
    dom.attach(root, mid).unwrap();
    dom.attach(mid, leaf_a).unwrap();
    dom.attach(mid, leaf_b).unwrap();

    dom.destroy(root);
    assert_eq!(*log.borrow(), vec!["leaf-a", "leaf-b", "mid", "root"]);
    assert!(dom.is_empty());
    assert_eq!(dom.root(), None);
}

#[test]
fn embedded_pool_limits_nodes_and_children() {
    let config = EngineConfig::embedded();
    let mut dom = Dom::from_config(&config);
    let root = dom.create(container()).unwrap();
    for _ in 0..32 {
        let child = dom.create(container()).unwrap();
        dom.attach(root, child).unwrap();
    }
    let extra = dom.create(container()).unwrap();
    assert_eq!(
        dom.attach(root, extra),
        Err(UiError::ChildLimit { parent: root, limit: 32 })
    );

    while dom.len() < 64 {
        dom.create(container()).unwrap();
    }
    assert_eq!(
        dom.create(container()).unwrap_err(),
        UiError::PoolExhausted { capacity: 64 }
    );

    // Freed slots are reusable.
    dom.destroy(extra);
    assert!(dom.create(container()).is_ok());
}

#[test]
fn stale_handles_are_noops() {
    let mut dom = Dom::new();
    let root = dom.create(container()).unwrap();
    let child = dom.create(NodeData::new(Text::new("x"))).unwrap();
    dom.attach(root, child).unwrap();
    dom.destroy(child);
    layout(&mut dom, root, 10.0, 10.0);

    dom.set_width(child, 5.0);
    dom.set_text_color(child, Color::WHITE);
    assert!(!dom.set_text(child, "y"));
    assert!(!dom.is_dirty(root));
    assert!(!dom.is_dirty(child));
    assert!(dom.get(child).is_none());
    assert!(!dom.detach(root, child));
    assert_eq!(dom.attach(root, child), Err(UiError::MissingNode(child)));

    let out = EventRouter::new().dispatch(&mut dom, child, &InputRecord::release(0.0, 0.0));
    assert_eq!(out, Dispatch { target: child, consumed_by: None });
}

// ---------------------------------------------------------------------------
// Geometry and colors
// ---------------------------------------------------------------------------

#[test]
fn explicit_mask_round_trips() {
    let mut dom = Dom::new();
    let id = dom.create(container()).unwrap();

    dom.set_bounds_mask(id, 5.0, 7.0, 10.0, 12.0, ExplicitMask::X | ExplicitMask::WIDTH);
    let node = dom.get(id).unwrap();
    assert_eq!(node.explicit, ExplicitMask::X | ExplicitMask::WIDTH);
    assert_eq!(node.explicit_offset, Point::new(5.0, 0.0));
    assert_eq!(node.bounds, Region::new(5.0, 7.0, 10.0, 12.0));

    dom.set_bounds_mask(id, 5.0, 7.0, 10.0, 12.0, ExplicitMask::WIDTH);
    let node = dom.get(id).unwrap();
    assert!(!node.explicit.contains(ExplicitMask::X));
    assert_eq!(node.explicit_offset, Point::ZERO);
}

#[test]
fn text_color_inherits_from_nearest_ancestor() {
    let mut dom = Dom::new();
    let root = dom.create(container()).unwrap();
    let panel = dom.create(container().with_text_color(Color::rgb(200, 10, 10))).unwrap();
    let label = dom.create(NodeData::new(Text::new("x"))).unwrap();
    let orphan = dom.create(NodeData::new(Text::new("y"))).unwrap();
    dom.attach(root, panel).unwrap();
    dom.attach(panel, label).unwrap();

    assert_eq!(dom.effective_text_color(label), Color::rgb(200, 10, 10));
    assert_eq!(dom.effective_text_color(orphan), Color::BLACK);
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

#[test]
fn column_flex_splits_leftover_one_to_two() {
    let mut dom = Dom::new();
    let root = dom.create(container().with_size(100.0, 100.0)).unwrap();
    let a = dom.create(container().with_flex_grow(1.0)).unwrap();
    let b = dom.create(container().with_flex_grow(2.0)).unwrap();
    dom.attach(root, a).unwrap();
    dom.attach(root, b).unwrap();
    layout(&mut dom, root, 100.0, 100.0);

    let ha = dom.get(a).unwrap().bounds.height;
    let hb = dom.get(b).unwrap().bounds.height;
    assert!((hb - 2.0 * ha).abs() < 0.01);
    assert!((ha + hb - 100.0).abs() < 0.01);
    assert!((dom.get(b).unwrap().bounds.y - ha).abs() < 0.01);
}

#[test]
fn flex_respects_measured_siblings() {
    let mut dom = Dom::new();
    let root = dom.create(container().with_size(100.0, 100.0)).unwrap();
    let title = dom.create(NodeData::new(Text::new("title"))).unwrap();
    let fill = dom.create(NodeData::new(Spacer::new())).unwrap();
    let ok = dom.create(NodeData::new(Button::new("OK"))).unwrap();
    for child in [title, fill, ok] {
        dom.attach(root, child).unwrap();
    }
    layout(&mut dom, root, 100.0, 100.0);

    let heights: f32 = [title, fill, ok].iter().map(|&c| dom.get(c).unwrap().bounds.height).sum();
    assert!((heights - 100.0).abs() < 0.01);
    assert_eq!(dom.get(ok).unwrap().bounds.y, 70.0);
}

#[test]
fn align_center_offsets_child() {
    let mut dom = Dom::new();
    let root = dom
        .create(container().with_size(100.0, 50.0).with_alignment(Align::Start, Align::Center))
        .unwrap();
    let child = dom.create(container().with_size(40.0, 10.0)).unwrap();
    dom.attach(root, child).unwrap();
    layout(&mut dom, root, 100.0, 50.0);
    assert_eq!(dom.get(child).unwrap().bounds.x, 30.0);
}

#[test]
fn row_direction_is_reachable() {
    let mut dom = Dom::new();
    let root = dom.create(container().with_size(100.0, 40.0)).unwrap();
    dom.set_direction(root, Direction::Row);
    let a = dom.create(container().with_size(30.0, 10.0)).unwrap();
    let b = dom.create(container().with_size(30.0, 10.0)).unwrap();
    dom.attach(root, a).unwrap();
    dom.attach(root, b).unwrap();
    layout(&mut dom, root, 100.0, 40.0);
    assert_eq!(dom.get(b).unwrap().bounds.origin(), Point::new(30.0, 0.0));
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

#[test]
fn higher_z_index_wins_hit_test() {
    let mut dom = Dom::new();
    let root = dom.create(container()).unwrap();
    dom.set_bounds(root, 0.0, 0.0, 100.0, 100.0);
    let front = dom.create(container().with_z_index(2)).unwrap();
    let back = dom.create(container().with_z_index(1)).unwrap();
    dom.attach(root, front).unwrap();
    dom.attach(root, back).unwrap();
    dom.set_bounds(front, 10.0, 10.0, 50.0, 50.0);
    dom.set_bounds(back, 10.0, 10.0, 50.0, 50.0);

    let router = EventRouter::new();
    assert_eq!(router.hit_test(&dom, root, 20.0, 20.0), Some(front));

    dom.set_z_index(front, 0);
    assert_eq!(router.hit_test(&dom, root, 20.0, 20.0), Some(back));
}

#[test]
fn unconsumed_click_bubbles_and_consumed_click_stops() {
    let mut dom = Dom::new();
    let root = dom.create(container()).unwrap();
    let panel = dom.create(container()).unwrap();
    let label = dom.create(NodeData::new(Text::new("hi"))).unwrap();
    let ok = dom.create(NodeData::new(Button::new("OK"))).unwrap();
    dom.attach(root, panel).unwrap();
    dom.attach(panel, label).unwrap();
    dom.attach(panel, ok).unwrap();

    let seen = Rc::new(RefCell::new(Vec::new()));
    for id in [root, panel, label, ok] {
        let seen = Rc::clone(&seen);
        dom.add_handler(id, move |node, _| seen.borrow_mut().push(node)).unwrap();
    }

    let router = EventRouter::new();
    let out = router.dispatch(&mut dom, label, &InputRecord::release(0.0, 0.0));
    assert!(!out.consumed());
    assert_eq!(*seen.borrow(), vec![label, panel, root]);

    seen.borrow_mut().clear();
    let out = router.dispatch(&mut dom, ok, &InputRecord::release(0.0, 0.0));
    assert_eq!(out.consumed_by, Some(ok));
    assert!(seen.borrow().is_empty());
}

#[test]
fn handler_capacity_is_enforced() {
    let mut dom = Dom::new().with_handler_limit(2);
    let id = dom.create(container()).unwrap();
    dom.add_handler(id, |_, _| {}).unwrap();
    dom.add_handler(id, |_, _| {}).unwrap();
    assert_eq!(
        dom.add_handler(id, |_, _| {}),
        Err(UiError::HandlerLimit { node: id, limit: 2 })
    );
    assert_eq!(dom.handler_count(id), 2);
}

#[test]
fn open_dropdown_extends_its_hit_box() {
    let chosen = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&chosen);
    let mut dom = Dom::new();
    let root = dom.create(container()).unwrap();
    let menu = dom
        .create(NodeData::new(
            Dropdown::new(["red", "green", "blue"]).on_change(move |i| *sink.borrow_mut() = Some(i)),
        ))
        .unwrap();
    dom.attach(root, menu).unwrap();
    layout(&mut dom, root, 300.0, 300.0);

    let router = EventRouter::new();
    assert_eq!(router.hit_test(&dom, root, 10.0, 75.0), Some(root));

    router.route(&mut dom, root, &InputRecord::release(10.0, 10.0));
    assert!(dom.widget(menu).and_then(WidgetKind::as_dropdown).is_some_and(Dropdown::is_open));
    assert_eq!(router.hit_test(&dom, root, 10.0, 75.0), Some(menu));

    router.route(&mut dom, root, &InputRecord::release(10.0, 75.0));
    let dropdown = dom.widget(menu).and_then(WidgetKind::as_dropdown).unwrap();
    assert_eq!(dropdown.selected_text(), Some("green"));
    assert!(!dropdown.is_open());
    assert_eq!(*chosen.borrow(), Some(1));
}

#[test]
fn dropdown_in_a_toolbar_takes_option_clicks_below_the_bar() {
    let mut dom = Dom::new();
    let root = dom.create(container()).unwrap();
    let toolbar = dom.create(container().with_direction(Direction::Row)).unwrap();
    let menu = dom.create(NodeData::new(Dropdown::new(["red", "green", "blue"]))).unwrap();
    let body = dom.create(container().with_height(200.0)).unwrap();
    dom.attach(root, toolbar).unwrap();
    dom.attach(toolbar, menu).unwrap();
    dom.attach(root, body).unwrap();
    layout(&mut dom, root, 300.0, 300.0);
    assert_eq!(dom.get(toolbar).unwrap().bounds.height, 30.0);

    let router = EventRouter::new();
    assert_eq!(router.hit_test(&dom, root, 10.0, 75.0), Some(body));
    router.route(&mut dom, root, &InputRecord::release(10.0, 10.0));
    assert_eq!(router.hit_test(&dom, root, 10.0, 75.0), Some(menu));

    let dispatch = router.route(&mut dom, root, &InputRecord::release(10.0, 75.0));
    assert!(dispatch.is_some_and(|d| d.consumed()));
    let dropdown = dom.widget(menu).and_then(WidgetKind::as_dropdown).unwrap();
    assert_eq!(dropdown.selected(), Some(1));
    assert!(!dropdown.is_open());
}

// ---------------------------------------------------------------------------
// Styles
// ---------------------------------------------------------------------------

#[test]
fn higher_specificity_wins() {
    let mut dom = Dom::new();
    let ok = dom.create(NodeData::new(Button::new("OK")).with_id("ok").with_class("cta")).unwrap();

    let mut styles = StyleContext::new();
    styles
        .add_rule(StyleRule::new(SelectorGroup::id("ok")).with(Property::BackgroundColor(Color::rgb(0, 0, 200))))
        .unwrap();
    styles
        .add_rule(button_style("cta", Color::rgb(200, 0, 0), Color::WHITE, 4.0, 80.0, 24.0))
        .unwrap();
    styles.resolve(&mut dom, ok);

    let node = dom.get(ok).unwrap();
    assert_eq!(node.background_color, Color::rgb(0, 0, 200));
    assert_eq!(node.bounds.size(), Size::new(80.0, 24.0));
}

#[test]
fn style_table_capacity_comes_from_config() {
    let config = EngineConfig::desktop().with_max_style_rules(1);
    let mut styles = StyleContext::from_config(&config);
    styles.add_rule(StyleRule::new(SelectorGroup::class("a"))).unwrap();
    assert_eq!(
        styles.add_rule(StyleRule::new(SelectorGroup::class("b"))),
        Err(UiError::StyleTableFull { limit: 1 })
    );
}

// ---------------------------------------------------------------------------
// Screen
// ---------------------------------------------------------------------------

#[test]
fn screen_frame_renders_command_stream() {
    let mut screen = Screen::new(EngineConfig::desktop().with_surface(100.0, 60.0));
    let dom = screen.dom_mut();
    let root = dom.create(container().with_background(Color::rgb(16, 16, 16))).unwrap();
    let ok = dom.create(NodeData::new(Button::new("OK"))).unwrap();
    dom.attach(root, ok).unwrap();

    insta::assert_snapshot!(screen.frame().dump(), @r###"
    rect 0,0 100x60 #101010ff
    rect 0,0 36x30 #404040ff
    text 10,5 #ffffffff f0 "OK"
    "###);
}

#[test]
fn sink_drops_commands_past_capacity() {
    let mut screen = Screen::new(EngineConfig::desktop().with_command_capacity(2));
    let dom = screen.dom_mut();
    let root = dom.create(container()).unwrap();
    for word in ["a", "b", "c"] {
        let label = dom.create(NodeData::new(Text::new(word))).unwrap();
        dom.attach(root, label).unwrap();
    }
    let sink = screen.frame();
    assert_eq!(sink.len(), 2);
    assert_eq!(sink.dropped(), 1);
}

#[test]
fn screen_types_into_clicked_input() {
    let submitted = Rc::new(RefCell::new(String::new()));
    let out = Rc::clone(&submitted);
    let mut screen = Screen::new(EngineConfig::desktop());
    let dom = screen.dom_mut();
    let root = dom.create(container()).unwrap();
    let field = dom
        .create(NodeData::new(Input::new().on_submit(move |v| out.borrow_mut().push_str(v))))
        .unwrap();
    dom.attach(root, field).unwrap();
    screen.frame();

    screen.handle_input(&InputRecord::release(5.0, 5.0));
    assert_eq!(screen.focused(), Some(field));
    for c in "hey".chars() {
        screen.handle_input(&InputRecord::key_press(c as u32));
    }
    screen.handle_input(&InputRecord::key_press(event::keys::ENTER));
    assert_eq!(submitted.borrow().as_str(), "hey");
}

// ---------------------------------------------------------------------------
// Dirty invariant
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
enum Op {
    Touch(usize),
    Retext(usize),
    Hide(usize),
    Show(usize),
    Detach(usize),
    Destroy(usize),
    Layout,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<usize>().prop_map(Op::Touch),
        any::<usize>().prop_map(Op::Retext),
        any::<usize>().prop_map(Op::Hide),
        any::<usize>().prop_map(Op::Show),
        any::<usize>().prop_map(Op::Detach),
        any::<usize>().prop_map(Op::Destroy),
        Just(Op::Layout),
    ]
}

/// Every dirty node has a dirty parent.
fn dirty_reaches_root(dom: &Dom, ids: &[NodeId]) -> bool {
    ids.iter()
        .filter(|&&id| dom.is_dirty(id))
        .all(|&id| dom.parent(id).is_none_or(|p| dom.is_dirty(p)))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn dirty_flags_always_reach_the_root(
        parents in proptest::collection::vec(any::<usize>(), 1..24),
        ops in proptest::collection::vec(op(), 0..40),
    ) {
        let mut dom = Dom::new();
        let root = dom.create(container()).unwrap();
        let mut ids = vec![root];
        for (i, pick) in parents.iter().enumerate() {
            let node = if i % 3 == 0 {
                NodeData::new(Text::new("leaf"))
            } else {
                container()
            };
            let id = dom.create(node).unwrap();
            dom.attach(ids[pick % ids.len()], id).unwrap();
            ids.push(id);
        }
        layout(&mut dom, root, 200.0, 200.0);
        prop_assert!(ids.iter().all(|&id| !dom.is_dirty(id)));

        for op in ops {
            match op {
                Op::Touch(i) => dom.set_gap(ids[i % ids.len()], 2.0),
                Op::Retext(i) => {
                    dom.set_text(ids[i % ids.len()], "changed");
                }
                Op::Hide(i) => dom.set_visible(ids[i % ids.len()], false),
                Op::Show(i) => dom.set_visible(ids[i % ids.len()], true),
                Op::Detach(i) => {
                    let id = ids[i % ids.len()];
                    if let Some(parent) = dom.parent(id) {
                        dom.detach(parent, id);
                    }
                }
                Op::Destroy(i) => {
                    let id = ids[i % ids.len()];
                    if id != root {
                        dom.destroy(id);
                    }
                }
                Op::Layout => layout(&mut dom, root, 200.0, 200.0),
            }
            prop_assert!(dirty_reaches_root(&dom, &ids));
        }
    }
}
