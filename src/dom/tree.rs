//! Tree operations: create, attach, detach, destroy, dirty tracking, setters.

use slotmap::{SecondaryMap, SlotMap};

use super::node::{Align, Direction, ExplicitMask, NodeData, NodeId};
use crate::color::Color;
use crate::config::{EngineConfig, StorageMode, TraceFlags};
use crate::error::{Result, UiError};
use crate::event::{Handler, InputRecord};
use crate::geometry::{Point, Region, Spacing};
use crate::widget::WidgetKind;

/// Empty slice constant for returning when a node has no children.
const EMPTY_CHILDREN: &[NodeId] = &[];

/// Default number of generic handlers a node may hold.
pub const DEFAULT_HANDLER_LIMIT: usize = 8;

/// The node tree, backed by a slotmap arena.
///
/// All nodes live in a single `SlotMap`. Parent/child relationships are stored
/// in secondary maps; the parent link is a plain handle and never owns.
/// Every mutating setter marks the node dirty and walks to the root.
pub struct Dom {
    pub(crate) nodes: SlotMap<NodeId, NodeData>,
    children: SecondaryMap<NodeId, Vec<NodeId>>,
    parent: SecondaryMap<NodeId, NodeId>,
    handlers: SecondaryMap<NodeId, Vec<Handler>>,
    root: Option<NodeId>,
    storage: StorageMode,
    handler_limit: usize,
    trace: TraceFlags,
}

impl Dom {
    /// Create an empty heap-backed tree.
    pub fn new() -> Self {
        Self::with_storage(StorageMode::Heap)
    }

    /// Create an empty tree with the given storage mode.
    ///
    /// A pool reserves its node slots immediately.
    pub fn with_storage(storage: StorageMode) -> Self {
        let capacity = match storage {
            StorageMode::Heap => 0,
            StorageMode::Pool { max_nodes, .. } => max_nodes,
        };
        Self {
            nodes: SlotMap::with_capacity_and_key(capacity),
            children: SecondaryMap::with_capacity(capacity),
            parent: SecondaryMap::with_capacity(capacity),
            handlers: SecondaryMap::with_capacity(capacity),
            root: None,
            storage,
            handler_limit: DEFAULT_HANDLER_LIMIT,
            trace: TraceFlags::default(),
        }
    }

    /// Create an empty tree from an engine config.
    pub fn from_config(config: &EngineConfig) -> Self {
        let mut dom = Self::with_storage(config.storage);
        dom.handler_limit = config.max_handlers;
        dom.trace = config.trace;
        dom
    }

    /// Set the generic handler capacity per node (builder).
    pub fn with_handler_limit(mut self, limit: usize) -> Self {
        self.handler_limit = limit;
        self
    }

    /// The storage mode this tree was created with.
    pub fn storage(&self) -> StorageMode {
        self.storage
    }

    // -----------------------------------------------------------------------
    // Structure
    // -----------------------------------------------------------------------

    /// Create a detached node.
    ///
    /// If no root has been set yet, this node becomes the root. Fails only
    /// when a fixed pool is full.
    pub fn create(&mut self, data: NodeData) -> Result<NodeId> {
        let pooled = match self.storage {
            StorageMode::Pool { max_nodes, max_children } => {
                if self.nodes.len() >= max_nodes {
                    return reject(UiError::PoolExhausted { capacity: max_nodes });
                }
                Some((Vec::with_capacity(max_children), Vec::with_capacity(self.handler_limit)))
            }
            StorageMode::Heap => None,
        };
        let kind = data.widget.kind_name();
        let id = self.nodes.insert(data);
        match pooled {
            Some((kids, handlers)) => {
                self.children.insert(id, kids);
                self.handlers.insert(id, handlers);
            }
            None => {
                self.children.insert(id, Vec::new());
            }
        }
        if self.root.is_none() {
            self.root = Some(id);
        }
        if self.trace.components {
            tracing::trace!(node = ?id, kind, "created");
        }
        Ok(id)
    }

    /// Append `child` to `parent`'s children.
    ///
    /// Rejects stale handles, self-attachment, re-parenting, and cycles. A
    /// rejected attach leaves both trees untouched. Marks `parent` dirty.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        if !self.nodes.contains_key(parent) {
            return reject(UiError::MissingNode(parent));
        }
        if !self.nodes.contains_key(child) {
            return reject(UiError::MissingNode(child));
        }
        if parent == child {
            return reject(UiError::SelfAttach(child));
        }
        if self.parent.contains_key(child) {
            return reject(UiError::AlreadyParented(child));
        }
        if self.is_ancestor(child, parent) {
            return reject(UiError::WouldCycle { parent, child });
        }
        if let StorageMode::Pool { max_children, .. } = self.storage {
            if self.children(parent).len() >= max_children {
                return reject(UiError::ChildLimit { parent, limit: max_children });
            }
        }

        self.parent.insert(child, parent);
        if let Some(kids) = self.children.get_mut(parent) {
            kids.push(child);
        }
        // A former root that gains a parent hands the role to its new top.
        if self.root == Some(child) {
            self.root = Some(self.top(parent));
        }
        if self.trace.components {
            tracing::trace!(?parent, ?child, "attached");
        }
        self.mark_dirty(parent);
        Ok(())
    }

    /// Remove `child` from `parent`, preserving sibling order.
    ///
    /// The child keeps its subtree and becomes a detached node owned by the
    /// caller. Returns `false` if `child` is not a child of `parent`.
    pub fn detach(&mut self, parent: NodeId, child: NodeId) -> bool {
        if self.parent.get(child) != Some(&parent) {
            return false;
        }
        self.parent.remove(child);
        if let Some(kids) = self.children.get_mut(parent) {
            if let Some(pos) = kids.iter().position(|&k| k == child) {
                kids.remove(pos);
            }
        }
        self.mark_dirty(parent);
        true
    }

    /// Destroy a node and its whole subtree.
    ///
    /// Descendants are destroyed first; each node's kind destroy hook runs
    /// after all of its children are gone. The parent (if any) loses the
    /// node and is marked dirty. Stale handles are ignored.
    pub fn destroy(&mut self, id: NodeId) {
        if !self.nodes.contains_key(id) {
            return;
        }
        if let Some(parent) = self.parent.remove(id) {
            if let Some(kids) = self.children.get_mut(parent) {
                kids.retain(|&k| k != id);
            }
            self.mark_dirty(parent);
        }
        if self.root == Some(id) {
            self.root = None;
        }
        self.destroy_subtree(id);
    }

    fn destroy_subtree(&mut self, id: NodeId) {
        let kids = self.children.remove(id).unwrap_or_default();
        for child in kids {
            self.parent.remove(child);
            self.destroy_subtree(child);
        }
        self.handlers.remove(id);
        if let Some(mut node) = self.nodes.remove(id) {
            node.widget.behavior_mut().on_destroy(id);
            if self.trace.components {
                tracing::trace!(node = ?id, kind = node.widget.kind_name(), "destroyed");
            }
        }
    }

    /// Whether `ancestor` is `node` or one of its ancestors.
    fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.parent(n);
        }
        false
    }

    /// The topmost ancestor of `id` (itself if detached).
    fn top(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(p) = self.parent(current) {
            current = p;
        }
        current
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Get the parent of a node, if it has one.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parent.get(id).copied()
    }

    /// Get the children of a node. Returns an empty slice if the node has no
    /// children or does not exist.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// Walk from `id` up to the root, collecting ancestor node ids.
    ///
    /// The returned vec does **not** include `id` itself; it starts with the
    /// immediate parent and ends at the root.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut current = id;
        while let Some(p) = self.parent(current) {
            result.push(p);
            current = p;
        }
        result
    }

    /// Immutable access to a node's data.
    pub fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id)
    }

    /// Mutable access that bypasses dirty tracking. Layout writes geometry
    /// through this.
    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.nodes.get_mut(id)
    }

    /// The per-kind state of a node.
    pub fn widget(&self, id: NodeId) -> Option<&WidgetKind> {
        self.nodes.get(id).map(|n| &n.widget)
    }

    /// The current root node, if set.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Explicitly set the root node.
    pub fn set_root(&mut self, id: NodeId) {
        if self.nodes.contains_key(id) {
            self.root = Some(id);
        }
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether the tree contains a node with the given id.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Pre-order depth-first traversal starting from `start`.
    pub fn walk_depth_first(&self, start: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !self.nodes.contains_key(current) {
                continue;
            }
            result.push(current);
            // Push children in reverse so the first child is visited first.
            for &child in self.children(current).iter().rev() {
                stack.push(child);
            }
        }
        result
    }

    // -----------------------------------------------------------------------
    // Dirty tracking
    // -----------------------------------------------------------------------

    /// Set the dirty flag on `id` and on every ancestor up to the root.
    ///
    /// The walk never stops early, even when an ancestor is already dirty.
    pub fn mark_dirty(&mut self, id: NodeId) {
        let mut current = Some(id);
        while let Some(n) = current {
            match self.nodes.get_mut(n) {
                Some(node) => node.dirty = true,
                None => break,
            }
            current = self.parent(n);
        }
    }

    /// Clear the dirty flag on `id` only.
    pub fn mark_clean(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.dirty = false;
        }
    }

    /// Whether `id` is dirty. Stale handles report `false`.
    pub fn is_dirty(&self, id: NodeId) -> bool {
        self.nodes.get(id).is_some_and(|n| n.dirty)
    }

    /// Mark the whole subtree under `id` dirty, then bubble to the root.
    pub fn invalidate(&mut self, id: NodeId) {
        for n in self.walk_depth_first(id) {
            if let Some(node) = self.nodes.get_mut(n) {
                node.dirty = true;
            }
        }
        self.mark_dirty(id);
    }

    /// Apply `f` to the node and mark it dirty. Returns `false` for stale handles.
    fn update(&mut self, id: NodeId, f: impl FnOnce(&mut NodeData)) -> bool {
        let Some(node) = self.nodes.get_mut(id) else {
            return false;
        };
        f(node);
        self.mark_dirty(id);
        true
    }

    // -----------------------------------------------------------------------
    // Setters
    // -----------------------------------------------------------------------

    /// Set position and size, marking all four fields explicit.
    pub fn set_bounds(&mut self, id: NodeId, x: f32, y: f32, width: f32, height: f32) {
        self.set_bounds_mask(id, x, y, width, height, ExplicitMask::ALL);
    }

    /// Set position and size; the explicit flags become exactly `mask`.
    ///
    /// The explicit x/y offset is stored only for the bits present in `mask`
    /// and zeroed otherwise.
    pub fn set_bounds_mask(
        &mut self,
        id: NodeId,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        mask: ExplicitMask,
    ) {
        self.update(id, |node| {
            let mask = mask & ExplicitMask::ALL;
            node.bounds = Region::new(x, y, width, height);
            node.explicit = mask;
            node.explicit_offset = Point::new(
                if mask.contains(ExplicitMask::X) { x } else { 0.0 },
                if mask.contains(ExplicitMask::Y) { y } else { 0.0 },
            );
        });
    }

    /// Set an explicit width, leaving the other flags alone.
    pub fn set_width(&mut self, id: NodeId, width: f32) {
        self.update(id, |node| {
            node.bounds.width = width;
            node.explicit = node.explicit | ExplicitMask::WIDTH;
        });
    }

    /// Set an explicit height, leaving the other flags alone.
    pub fn set_height(&mut self, id: NodeId, height: f32) {
        self.update(id, |node| {
            node.bounds.height = height;
            node.explicit = node.explicit | ExplicitMask::HEIGHT;
        });
    }

    pub fn set_padding(&mut self, id: NodeId, padding: Spacing) {
        self.update(id, |node| node.padding = padding);
    }

    pub fn set_margin(&mut self, id: NodeId, margin: Spacing) {
        self.update(id, |node| node.margin = margin);
    }

    pub fn set_text_color(&mut self, id: NodeId, color: Color) {
        self.update(id, |node| node.text_color = color);
    }

    pub fn set_background_color(&mut self, id: NodeId, color: Color) {
        self.update(id, |node| node.background_color = color);
    }

    pub fn set_border_color(&mut self, id: NodeId, color: Color) {
        self.update(id, |node| node.border_color = color);
    }

    pub fn set_border_width(&mut self, id: NodeId, width: f32) {
        self.update(id, |node| node.border_width = width);
    }

    /// Show or hide a node. Showing it lays out the whole subtree again.
    pub fn set_visible(&mut self, id: NodeId, visible: bool) {
        if self.update(id, |node| node.visible = visible) && visible {
            self.invalidate(id);
        }
    }

    pub fn set_disabled(&mut self, id: NodeId, disabled: bool) {
        self.update(id, |node| node.disabled = disabled);
    }

    /// Set the flex-grow and flex-shrink weights.
    pub fn set_flex(&mut self, id: NodeId, grow: f32, shrink: f32) {
        self.update(id, |node| {
            node.flex_grow = grow;
            node.flex_shrink = shrink;
        });
    }

    /// Set main-axis (`justify`) and cross-axis (`align_items`) alignment.
    pub fn set_alignment(&mut self, id: NodeId, justify: Align, align_items: Align) {
        self.update(id, |node| {
            node.justify_content = justify;
            node.align_items = align_items;
        });
    }

    pub fn set_align_self(&mut self, id: NodeId, align: Option<Align>) {
        self.update(id, |node| node.align_self = align);
    }

    pub fn set_direction(&mut self, id: NodeId, direction: Direction) {
        self.update(id, |node| node.direction = direction);
    }

    pub fn set_gap(&mut self, id: NodeId, gap: f32) {
        self.update(id, |node| node.gap = gap);
    }

    pub fn set_z_index(&mut self, id: NodeId, z: u16) {
        self.update(id, |node| node.z_index = z);
    }

    pub fn set_id(&mut self, id: NodeId, name: Option<String>) {
        self.update(id, |node| node.id = name);
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) {
        self.update(id, |node| {
            node.add_class(class);
        });
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        self.update(id, |node| {
            node.remove_class(class);
        });
    }

    pub fn set_attribute(&mut self, id: NodeId, name: impl Into<String>, value: impl Into<String>) {
        let (name, value) = (name.into(), value.into());
        self.update(id, |node| node.put_attribute(name, value));
    }

    /// Replace the text of a text-bearing kind.
    ///
    /// Returns `false` (and leaves the node clean) if the kind carries no text.
    pub fn set_text(&mut self, id: NodeId, text: &str) -> bool {
        let Some(node) = self.nodes.get_mut(id) else {
            return false;
        };
        if !node.widget.behavior_mut().set_text(text) {
            return false;
        }
        self.mark_dirty(id);
        true
    }

    /// Mutate the per-kind state and mark the node dirty.
    pub fn update_widget<R>(&mut self, id: NodeId, f: impl FnOnce(&mut WidgetKind) -> R) -> Option<R> {
        let node = self.nodes.get_mut(id)?;
        let result = f(&mut node.widget);
        self.mark_dirty(id);
        Some(result)
    }

    // -----------------------------------------------------------------------
    // Colors and coordinates
    // -----------------------------------------------------------------------

    /// The text color, inherited from the nearest ancestor with one set.
    ///
    /// Falls back to opaque black.
    pub fn effective_text_color(&self, id: NodeId) -> Color {
        self.inherited(id, |n| n.text_color).unwrap_or(Color::BLACK)
    }

    /// The background color, inherited from the nearest ancestor with one set.
    ///
    /// Falls back to transparent.
    pub fn effective_background_color(&self, id: NodeId) -> Color {
        self.inherited(id, |n| n.background_color).unwrap_or(Color::TRANSPARENT)
    }

    fn inherited(&self, id: NodeId, field: impl Fn(&NodeData) -> Color) -> Option<Color> {
        let mut current = Some(id);
        while let Some(n) = current {
            let color = field(self.nodes.get(n)?);
            if color.is_set() {
                return Some(color);
            }
            current = self.parent(n);
        }
        None
    }

    /// Absolute position: the node's own offset plus every ancestor's.
    pub fn absolute_origin(&self, id: NodeId) -> Point {
        let mut origin = Point::ZERO;
        let mut current = Some(id);
        while let Some(n) = current {
            let Some(node) = self.nodes.get(n) else { break };
            origin = origin + node.bounds.origin();
            current = self.parent(n);
        }
        origin
    }

    /// The node's box in absolute coordinates.
    pub fn absolute_bounds(&self, id: NodeId) -> Option<Region> {
        let node = self.nodes.get(id)?;
        Some(Region {
            x: 0.0,
            y: 0.0,
            ..node.bounds
        }
        .translate(self.absolute_origin(id)))
    }

    // -----------------------------------------------------------------------
    // Generic handlers
    // -----------------------------------------------------------------------

    /// Register a generic event handler on `id`.
    ///
    /// Handlers run in registration order during dispatch and cannot stop
    /// bubbling. Fails once the node holds the configured maximum.
    pub fn add_handler(
        &mut self,
        id: NodeId,
        handler: impl FnMut(NodeId, &InputRecord) + 'static,
    ) -> Result<()> {
        if !self.nodes.contains_key(id) {
            return reject(UiError::MissingNode(id));
        }
        let limit = self.handler_limit;
        let Some(list) = self.handlers.entry(id).map(|e| e.or_default()) else {
            return reject(UiError::MissingNode(id));
        };
        if list.len() >= limit {
            return reject(UiError::HandlerLimit { node: id, limit });
        }
        list.push(Box::new(handler));
        Ok(())
    }

    /// Number of generic handlers on `id`.
    pub fn handler_count(&self, id: NodeId) -> usize {
        self.handlers.get(id).map_or(0, Vec::len)
    }

    pub(crate) fn handlers_mut(&mut self, id: NodeId) -> Option<&mut Vec<Handler>> {
        self.handlers.get_mut(id)
    }
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}

fn reject<T>(err: UiError) -> Result<T> {
    tracing::debug!(error = %err, "tree operation rejected");
    Err(err)
}

// ===========================================================================
// Tests
// ===========================================================================
