//! Event dispatch: kind handler first, then generic handlers, then bubble.
//!
//! [`EventRouter::dispatch`] walks from the target toward the root. At each
//! node the widget kind sees the event first and may consume it, which stops
//! propagation entirely. Otherwise the node's generic handlers all run (they
//! cannot stop bubbling) and the walk moves on to the parent.

use super::hit_test;
use super::input::InputRecord;
use crate::config::TraceFlags;
use crate::dom::{Dom, NodeId};
use crate::geometry::Region;

/// A generic handler registered with [`Dom::add_handler`].
pub type Handler = Box<dyn FnMut(NodeId, &InputRecord)>;

// ---------------------------------------------------------------------------
// EventCx
// ---------------------------------------------------------------------------

/// Context handed to a widget kind's event handler.
#[derive(Debug, Clone, Copy)]
pub struct EventCx {
    id: NodeId,
    bounds: Region,
    repaint: bool,
}

impl EventCx {
    pub fn new(id: NodeId, bounds: Region) -> Self {
        Self { id, bounds, repaint: false }
    }

    /// The node receiving the event.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The node's box in absolute coordinates.
    pub fn bounds(&self) -> Region {
        self.bounds
    }

    /// Ask for the node to be marked dirty once the handler returns.
    pub fn request_repaint(&mut self) {
        self.repaint = true;
    }

    pub fn repaint_requested(&self) -> bool {
        self.repaint
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Outcome of dispatching one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    /// The node the event was dispatched to.
    pub target: NodeId,
    /// The node whose kind handler consumed the event, if any.
    pub consumed_by: Option<NodeId>,
}

impl Dispatch {
    pub fn consumed(&self) -> bool {
        self.consumed_by.is_some()
    }
}

// ---------------------------------------------------------------------------
// EventRouter
// ---------------------------------------------------------------------------

/// Hit-tests points against a tree and dispatches events with bubbling.
#[derive(Debug, Clone, Default)]
pub struct EventRouter {
    trace: TraceFlags,
}

impl EventRouter {
    /// Create a router with tracing off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the trace toggles (builder).
    pub fn with_trace(mut self, trace: TraceFlags) -> Self {
        self.trace = trace;
        self
    }

    /// The deepest visible node under (x, y), preferring higher z-index.
    pub fn hit_test(&self, dom: &Dom, root: NodeId, x: f32, y: f32) -> Option<NodeId> {
        hit_test::find_target(dom, root, x, y, self.trace.coordinates)
    }

    /// Hit-test at the event position, then dispatch to the target.
    ///
    /// Returns `None` when the point misses the tree.
    pub fn route(&self, dom: &mut Dom, root: NodeId, event: &InputRecord) -> Option<Dispatch> {
        let target = self.hit_test(dom, root, event.x, event.y)?;
        Some(self.dispatch(dom, target, event))
    }

    /// Dispatch `event` to `target` and bubble it toward the root.
    ///
    /// Disabled nodes skip their kind handler but still run generic handlers.
    pub fn dispatch(&self, dom: &mut Dom, target: NodeId, event: &InputRecord) -> Dispatch {
        let mut current = Some(target);
        while let Some(id) = current {
            if !dom.contains(id) {
                break;
            }
            let parent = dom.parent(id);
            if self.notify(dom, id, event) {
                if self.trace.components {
                    tracing::trace!(?target, node = ?id, kind = ?event.kind, "event consumed");
                }
                return Dispatch { target, consumed_by: Some(id) };
            }

            if let Some(handlers) = dom.handlers_mut(id) {
                for handler in handlers.iter_mut() {
                    handler(id, event);
                }
            }
            current = parent;
        }
        Dispatch { target, consumed_by: None }
    }

    /// Run only the kind handler of `id`, without generic handlers or
    /// bubbling. Returns whether the kind consumed the event.
    ///
    /// Disabled and stale nodes never consume.
    pub fn notify(&self, dom: &mut Dom, id: NodeId, event: &InputRecord) -> bool {
        let bounds = dom.absolute_bounds(id).unwrap_or_default();
        let Some(node) = dom.node_mut(id) else {
            return false;
        };
        if node.disabled {
            return false;
        }
        let mut cx = EventCx::new(id, bounds);
        let consumed = node.widget.behavior_mut().on_event(&mut cx, event);
        if cx.repaint_requested() {
            dom.mark_dirty(id);
        }
        consumed
    }

    /// Compute the bubble path from `start` up to the root (inclusive).
    ///
    /// Returns `[start, parent, grandparent, ..., root]`, or an empty vec if
    /// `start` does not exist.
    pub fn bubble_path(dom: &Dom, start: NodeId) -> Vec<NodeId> {
        if !dom.contains(start) {
            return Vec::new();
        }
        let mut path = vec![start];
        path.extend(dom.ancestors(start));
        path
    }
}

// ===========================================================================
// Tests
// ===========================================================================
