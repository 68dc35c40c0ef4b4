//! Screen façade, focus chain.
//!
//! [`Screen`] owns the tree, style context, layout engine, event router and
//! command sink for one surface and runs them in frame order: styles, then
//! layout, then render. Input is routed between frames. [`FocusChain`]
//! keeps the tab order of focusable, visible, enabled nodes.

use crate::config::EngineConfig;
use crate::dom::{Dom, NodeId};
use crate::event::{keys, Dispatch, EventKind, EventRouter, InputRecord};
use crate::geometry::Size;
use crate::layout::LayoutEngine;
use crate::render::{render_tree, Backend, CommandSink};
use crate::style::StyleContext;

// ---------------------------------------------------------------------------
// FocusChain
// ---------------------------------------------------------------------------

/// Ordered list of focusable nodes for tab navigation.
///
/// The chain is rebuilt from the tree before each focus move. Focus cycles
/// through it forward (Tab) or backward.
#[derive(Debug, Default)]
pub struct FocusChain {
    /// Focusable nodes in pre-order.
    nodes: Vec<NodeId>,
    current: Option<NodeId>,
}

impl FocusChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the focusable nodes under `root`, skipping hidden subtrees
    /// and disabled nodes. Focus is dropped if its node left the chain.
    pub fn rebuild(&mut self, dom: &Dom, root: NodeId) {
        self.nodes.clear();
        collect_focusable(dom, root, &mut self.nodes);
        if let Some(current) = self.current {
            if !self.nodes.contains(&current) {
                self.current = None;
            }
        }
    }

    pub fn current_node(&self) -> Option<NodeId> {
        self.current
    }

    /// Move to the next node, wrapping around. `None` if the chain is empty.
    pub fn focus_next(&mut self) -> Option<NodeId> {
        let next = match self.position() {
            Some(idx) => (idx + 1) % self.nodes.len(),
            None => 0,
        };
        self.current = self.nodes.get(next).copied();
        self.current
    }

    /// Move to the previous node, wrapping around. `None` if the chain is
    /// empty.
    pub fn focus_previous(&mut self) -> Option<NodeId> {
        let len = self.nodes.len();
        if len == 0 {
            return None;
        }
        let prev = match self.position() {
            Some(0) | None => len - 1,
            Some(idx) => idx - 1,
        };
        self.current = self.nodes.get(prev).copied();
        self.current
    }

    /// Focus `id` if it is in the chain.
    pub fn focus_node(&mut self, id: NodeId) -> bool {
        let found = self.nodes.contains(&id);
        if found {
            self.current = Some(id);
        }
        found
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn position(&self) -> Option<usize> {
        let current = self.current?;
        self.nodes.iter().position(|&n| n == current)
    }
}

fn collect_focusable(dom: &Dom, id: NodeId, out: &mut Vec<NodeId>) {
    let Some(node) = dom.get(id) else { return };
    if !node.visible {
        return;
    }
    if !node.disabled && node.widget.behavior().focusable() {
        out.push(id);
    }
    for &child in dom.children(id) {
        collect_focusable(dom, child, out);
    }
}

// ---------------------------------------------------------------------------
// Screen
// ---------------------------------------------------------------------------

/// One surface: tree, styles, layout, routing, commands and focus.
///
/// ```ignore
/// let mut screen = Screen::new(EngineConfig::desktop());
/// let root = screen.dom_mut().create(NodeData::new(Container::new()))?;
/// screen.dom_mut().set_root(root);
/// screen.handle_input(&InputRecord::release(10.0, 10.0));
/// screen.present(&mut backend);
/// ```
pub struct Screen {
    dom: Dom,
    styles: StyleContext,
    layout: LayoutEngine,
    router: EventRouter,
    sink: CommandSink,
    focus: FocusChain,
    hovered: Option<NodeId>,
    config: EngineConfig,
    size: Size,
}

impl Screen {
    /// Build every subsystem from `config`. The surface starts at
    /// `config.surface`.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            dom: Dom::from_config(&config),
            styles: StyleContext::from_config(&config),
            layout: LayoutEngine::new(config.layout.clone()).with_trace(config.trace),
            router: EventRouter::new().with_trace(config.trace),
            sink: CommandSink::new(config.command_capacity).with_trace(config.trace.commands),
            focus: FocusChain::new(),
            hovered: None,
            size: config.surface,
            config,
        }
    }

    pub fn dom(&self) -> &Dom {
        &self.dom
    }

    pub fn dom_mut(&mut self) -> &mut Dom {
        &mut self.dom
    }

    pub fn styles(&self) -> &StyleContext {
        &self.styles
    }

    pub fn styles_mut(&mut self) -> &mut StyleContext {
        &mut self.styles
    }

    pub fn layout(&self) -> &LayoutEngine {
        &self.layout
    }

    pub fn router(&self) -> &EventRouter {
        &self.router
    }

    /// Commands produced by the last [`frame`](Self::frame).
    pub fn sink(&self) -> &CommandSink {
        &self.sink
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn root(&self) -> Option<NodeId> {
        self.dom.root()
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focus.current_node()
    }

    /// Change the surface size. The whole tree is laid out again on the
    /// next frame.
    pub fn resize(&mut self, width: f32, height: f32) {
        let size = Size::new(width, height);
        if size == self.size {
            return;
        }
        self.size = size;
        if let Some(root) = self.dom.root() {
            self.dom.invalidate(root);
        }
    }

    /// Run styles, layout and render for the current tree.
    ///
    /// Styles are resolved when the rule table or the tree changed, layout
    /// runs when the root is dirty, and the sink is always refilled.
    pub fn frame(&mut self) -> &CommandSink {
        self.sink.clear();
        let Some(root) = self.dom.root() else {
            return &self.sink;
        };

        if self.styles.is_dirty() || self.dom.is_dirty(root) {
            self.styles.resolve_tree(&mut self.dom, root);
            self.styles.mark_clean();
        }
        if self.dom.is_dirty(root) {
            self.layout.compute(&mut self.dom, root, self.size);
        }
        render_tree(&self.dom, root, self.layout.config(), &mut self.sink);

        if self.sink.dropped() > 0 {
            tracing::debug!(
                dropped = self.sink.dropped(),
                capacity = self.sink.capacity(),
                "command sink overflowed"
            );
        }
        &self.sink
    }

    /// Produce a frame and hand it to `backend`.
    pub fn present<B: Backend + ?Sized>(&mut self, backend: &mut B) {
        let size = self.size;
        let commands = self.frame().commands();
        backend.begin_frame(size);
        backend.execute(commands);
        backend.end_frame();
    }

    /// Deliver one host input record.
    ///
    /// - Key events go to the focused node, or are routed by position when
    ///   nothing has focus. A Tab press moves focus instead.
    /// - Clicks are routed by position. A click consumed by a focusable node
    ///   focuses it; any other click blurs the focused node.
    /// - Hover records also notify the previously hovered node that the
    ///   pointer left.
    /// - Timer records reach every visible node through
    ///   [`tick`](Self::tick).
    /// - Focus and Blur records from the host go to the focused node.
    ///
    /// Returns the dispatch outcome, or `None` when nothing was targeted.
    pub fn handle_input(&mut self, event: &InputRecord) -> Option<Dispatch> {
        let root = self.dom.root()?;
        match event.kind {
            EventKind::Key if event.is_press() && event.code() == keys::TAB => {
                self.focus_next();
                None
            }
            EventKind::Key => match self.live_focus() {
                Some(focused) => Some(self.router.dispatch(&mut self.dom, focused, event)),
                None => self.router.route(&mut self.dom, root, event),
            },
            EventKind::Click => {
                let out = self.router.route(&mut self.dom, root, event);
                let hit = out
                    .as_ref()
                    .and_then(|d| d.consumed_by)
                    .filter(|&id| self.is_focusable(id));
                self.move_focus(hit);
                out
            }
            EventKind::Hover => {
                let target = self.router.hit_test(&self.dom, root, event.x, event.y);
                if self.hovered != target {
                    if let Some(previous) = self.hovered.take() {
                        let left = InputRecord::hover(event.x, event.y, false);
                        self.router.notify(&mut self.dom, previous, &left);
                    }
                    self.hovered = target;
                }
                let target = target?;
                Some(self.router.dispatch(&mut self.dom, target, event))
            }
            EventKind::Timer => {
                self.deliver_timer(root, event);
                None
            }
            EventKind::Focus | EventKind::Blur => {
                let focused = self.live_focus()?;
                Some(self.router.dispatch(&mut self.dom, focused, event))
            }
            EventKind::Touch | EventKind::Scroll | EventKind::Custom => {
                self.router.route(&mut self.dom, root, event)
            }
        }
    }

    /// Send a Timer record stamped `timestamp` to every visible node.
    /// Returns how many kinds consumed it.
    pub fn tick(&mut self, timestamp: u32) -> usize {
        let Some(root) = self.dom.root() else { return 0 };
        self.deliver_timer(root, &InputRecord::timer(timestamp))
    }

    fn deliver_timer(&mut self, root: NodeId, event: &InputRecord) -> usize {
        let mut visible = Vec::new();
        collect_visible(&self.dom, root, &mut visible);
        visible
            .into_iter()
            .filter(|&id| self.router.notify(&mut self.dom, id, event))
            .count()
    }

    /// Move focus to the next focusable node, wrapping around.
    pub fn focus_next(&mut self) -> Option<NodeId> {
        let root = self.dom.root()?;
        self.focus.rebuild(&self.dom, root);
        let previous = self.focus.current_node();
        let next = self.focus.focus_next();
        self.switch_focus(previous, next);
        next
    }

    /// Move focus to the previous focusable node, wrapping around.
    pub fn focus_previous(&mut self) -> Option<NodeId> {
        let root = self.dom.root()?;
        self.focus.rebuild(&self.dom, root);
        let previous = self.focus.current_node();
        let next = self.focus.focus_previous();
        self.switch_focus(previous, next);
        next
    }

    /// Focus `id`, or clear focus with `None`. Returns `false` if `id` is
    /// not focusable.
    pub fn set_focus(&mut self, id: Option<NodeId>) -> bool {
        if id.is_some_and(|id| !self.is_focusable(id)) {
            return false;
        }
        self.move_focus(id);
        true
    }

    fn move_focus(&mut self, target: Option<NodeId>) {
        let previous = self.live_focus();
        if previous == target {
            return;
        }
        match target {
            Some(id) => {
                if let Some(root) = self.dom.root() {
                    self.focus.rebuild(&self.dom, root);
                }
                if !self.focus.focus_node(id) {
                    self.focus.clear();
                }
            }
            None => self.focus.clear(),
        }
        let next = self.focus.current_node();
        self.switch_focus(previous, next);
    }

    fn switch_focus(&mut self, previous: Option<NodeId>, next: Option<NodeId>) {
        if previous == next {
            return;
        }
        if let Some(old) = previous {
            self.router.notify(&mut self.dom, old, &InputRecord::new(EventKind::Blur, 0.0, 0.0));
        }
        if let Some(new) = next {
            self.router.notify(&mut self.dom, new, &InputRecord::new(EventKind::Focus, 0.0, 0.0));
        }
    }

    /// The focused node, unless it was destroyed since.
    fn live_focus(&mut self) -> Option<NodeId> {
        let current = self.focus.current_node()?;
        if self.dom.contains(current) {
            Some(current)
        } else {
            self.focus.clear();
            None
        }
    }

    fn is_focusable(&self, id: NodeId) -> bool {
        self.dom
            .get(id)
            .is_some_and(|n| n.visible && !n.disabled && n.widget.behavior().focusable())
    }
}

fn collect_visible(dom: &Dom, id: NodeId, out: &mut Vec<NodeId>) {
    let Some(node) = dom.get(id) else { return };
    if !node.visible {
        return;
    }
    out.push(id);
    for &child in dom.children(id) {
        collect_visible(dom, child, out);
    }
}

// ===========================================================================
// Tests
// ===========================================================================
