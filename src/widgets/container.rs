//! Container widget: a plain box that lays out its children.

use crate::dom::NodeData;
use crate::layout::LayoutConfig;
use crate::widget::{Intrinsic, Widget};

/// A generic grouping node.
///
/// Containers paint their background and border and otherwise defer to their
/// children. Layout direction, gap and alignment live on the node.
#[derive(Debug, Clone, Default)]
pub struct Container {
    name: Option<&'static str>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    /// A container that answers type selectors under a different name
    /// (e.g. `"panel"` or `"toolbar"`).
    pub fn named(name: &'static str) -> Self {
        Self { name: Some(name) }
    }
}

impl Widget for Container {
    fn kind_name(&self) -> &'static str {
        self.name.unwrap_or("container")
    }

    fn measure(&self, _node: &NodeData, metrics: &LayoutConfig) -> Intrinsic {
        Intrinsic::width(metrics.container_width)
    }
}
