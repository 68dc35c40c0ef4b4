//! Tree queries: by id, class, kind name, or arbitrary predicate.
//!
//! All queries walk the subtree under `start` in pre-order, so results come
//! back in document order.

use super::node::{NodeData, NodeId};
use super::tree::Dom;

impl Dom {
    /// Find the first node under `start` whose `id` matches.
    pub fn query_by_id(&self, start: NodeId, id: &str) -> Option<NodeId> {
        self.walk_depth_first(start)
            .into_iter()
            .find(|&n| self.get(n).is_some_and(|data| data.id.as_deref() == Some(id)))
    }

    /// Find all nodes under `start` that carry `class`.
    pub fn query_by_class(&self, start: NodeId, class: &str) -> Vec<NodeId> {
        self.query_all(start, |data| data.has_class(class))
    }

    /// Find all nodes under `start` whose widget kind is named `kind`.
    pub fn query_by_kind(&self, start: NodeId, kind: &str) -> Vec<NodeId> {
        self.query_all(start, |data| data.widget.kind_name().eq_ignore_ascii_case(kind))
    }

    /// Find all nodes under `start` matching an arbitrary predicate.
    pub fn query_all(&self, start: NodeId, predicate: impl Fn(&NodeData) -> bool) -> Vec<NodeId> {
        self.walk_depth_first(start)
            .into_iter()
            .filter(|&n| self.get(n).is_some_and(&predicate))
            .collect()
    }
}
