//! Style context: a bounded rule table plus selector matching and resolution.

use crate::config::EngineConfig;
use crate::dom::{Dom, ExplicitMask, NodeData, NodeId};
use crate::error::{Result, UiError};
use crate::geometry::Spacing;

use super::model::{Property, SelectorGroup, SimpleSelector, StyleRule};
use super::specificity::Specificity;
use super::TypeMatching;

/// Default rule table size.
pub const DEFAULT_RULE_CAPACITY: usize = 512;

/// Handle returned by [`StyleContext::add_rule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RuleId(u32);

#[derive(Debug, Clone)]
struct Entry {
    id: RuleId,
    rule: StyleRule,
    specificity: Specificity,
}

/// A table of style rules that can be resolved against nodes.
///
/// Contexts are plain values: several may coexist and each is resolved
/// explicitly. Resolution writes through the [`Dom`] setters, so restyled
/// nodes are marked dirty the usual way. Properties whose value is already
/// in place are skipped and leave the node clean.
#[derive(Debug, Clone)]
pub struct StyleContext {
    rules: Vec<Entry>,
    next_id: u32,
    capacity: usize,
    type_matching: TypeMatching,
    dirty: bool,
}

impl Default for StyleContext {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleContext {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_RULE_CAPACITY)
    }

    /// A context holding at most `capacity` rules.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rules: Vec::new(),
            next_id: 0,
            capacity,
            type_matching: TypeMatching::default(),
            dirty: false,
        }
    }

    /// Capacity and type matching taken from the engine config.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::with_capacity(config.max_style_rules).with_type_matching(config.type_matching)
    }

    pub fn with_type_matching(mut self, matching: TypeMatching) -> Self {
        self.type_matching = matching;
        self
    }

    pub fn type_matching(&self) -> TypeMatching {
        self.type_matching
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // -----------------------------------------------------------------------
    // Rule table
    // -----------------------------------------------------------------------

    /// Register a rule.
    ///
    /// # Errors
    ///
    /// [`UiError::StyleTableFull`] once the table holds `capacity` rules.
    pub fn add_rule(&mut self, rule: StyleRule) -> Result<RuleId> {
        if self.rules.len() >= self.capacity {
            let err = UiError::StyleTableFull { limit: self.capacity };
            tracing::debug!(error = %err, "style rule rejected");
            return Err(err);
        }
        let id = RuleId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        let specificity = Specificity::of(&rule.selector);
        self.rules.push(Entry { id, rule, specificity });
        self.dirty = true;
        Ok(id)
    }

    /// Remove a rule. Returns `false` if the id is unknown.
    pub fn remove_rule(&mut self, id: RuleId) -> bool {
        let before = self.rules.len();
        self.rules.retain(|e| e.id != id);
        let removed = self.rules.len() != before;
        self.dirty |= removed;
        removed
    }

    pub fn rule(&self, id: RuleId) -> Option<&StyleRule> {
        self.rules.iter().find(|e| e.id == id).map(|e| &e.rule)
    }

    /// Drop every rule.
    pub fn clear(&mut self) {
        if !self.rules.is_empty() {
            self.rules.clear();
            self.dirty = true;
        }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Whether rules changed since the last [`mark_clean`](Self::mark_clean).
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    // -----------------------------------------------------------------------
    // Matching
    // -----------------------------------------------------------------------

    /// Whether every selector in `group` matches the node. Stale handles
    /// never match.
    pub fn matches(&self, dom: &Dom, id: NodeId, group: &SelectorGroup) -> bool {
        dom.get(id)
            .is_some_and(|node| group.selectors().iter().all(|s| self.matches_one(node, s)))
    }

    fn matches_one(&self, node: &NodeData, selector: &SimpleSelector) -> bool {
        match selector {
            SimpleSelector::Type(name) => match self.type_matching {
                TypeMatching::Permissive => true,
                TypeMatching::Strict => node.widget.kind_name().eq_ignore_ascii_case(name),
            },
            SimpleSelector::Id(name) => node.id.as_deref() == Some(name.as_str()),
            SimpleSelector::Class(name) => node.has_class(name),
            SimpleSelector::Pseudo(name) => match name.as_str() {
                "disabled" => node.disabled,
                "hidden" => !node.visible,
                other => node.widget.behavior().pseudo_class(other),
            },
            SimpleSelector::Attribute(name) => node.attribute(name).is_some(),
        }
    }

    /// Ids of the rules matching `id`, ascending by specificity. Ties keep
    /// registration order.
    pub fn matching(&self, dom: &Dom, id: NodeId) -> Vec<RuleId> {
        self.sorted_matches(dom, id).iter().map(|e| e.id).collect()
    }

    fn sorted_matches(&self, dom: &Dom, id: NodeId) -> Vec<&Entry> {
        let mut matched: Vec<&Entry> = self
            .rules
            .iter()
            .filter(|e| self.matches(dom, id, &e.rule.selector))
            .collect();
        // sort_by_key is stable
        matched.sort_by_key(|e| e.specificity);
        matched
    }

    // -----------------------------------------------------------------------
    // Resolution
    // -----------------------------------------------------------------------

    /// Apply every matching rule to one node. Returns the number of rules
    /// applied.
    pub fn resolve(&self, dom: &mut Dom, id: NodeId) -> usize {
        let matched = self.sorted_matches(dom, id);
        let count = matched.len();
        for entry in matched {
            for property in &entry.rule.properties {
                apply(dom, id, property);
            }
        }
        count
    }

    /// Resolve `root` and every descendant in pre-order. Returns the total
    /// number of rule applications.
    pub fn resolve_tree(&self, dom: &mut Dom, root: NodeId) -> usize {
        let order = dom.walk_depth_first(root);
        let nodes = order.len();
        let applied: usize = order.into_iter().map(|id| self.resolve(dom, id)).sum();
        tracing::debug!(nodes, applied, rules = self.rules.len(), "styles resolved");
        applied
    }
}

/// Write one property through the matching setter, unless it already holds.
fn apply(dom: &mut Dom, id: NodeId, property: &Property) {
    let Some(node) = dom.get(id) else {
        return;
    };
    match *property {
        Property::TextColor(c) => {
            if node.text_color != c {
                dom.set_text_color(id, c);
            }
        }
        Property::BackgroundColor(c) => {
            if node.background_color != c {
                dom.set_background_color(id, c);
            }
        }
        Property::BorderColor(c) => {
            if node.border_color != c {
                dom.set_border_color(id, c);
            }
        }
        Property::BorderWidth(w) => {
            if node.border_width != w {
                dom.set_border_width(id, w);
            }
        }
        Property::Width(w) => {
            if node.bounds.width != w || !node.explicit.contains(ExplicitMask::WIDTH) {
                dom.set_width(id, w);
            }
        }
        Property::Height(h) => {
            if node.bounds.height != h || !node.explicit.contains(ExplicitMask::HEIGHT) {
                dom.set_height(id, h);
            }
        }
        Property::Margin(v) => {
            if node.margin != Spacing::all(v) {
                dom.set_margin(id, Spacing::all(v));
            }
        }
        Property::Padding(v) => {
            if node.padding != Spacing::all(v) {
                dom.set_padding(id, Spacing::all(v));
            }
        }
        Property::Visible(v) => {
            if node.visible != v {
                dom.set_visible(id, v);
            }
        }
        Property::FlexGrow(g) => {
            if node.flex_grow != g {
                let shrink = node.flex_shrink;
                dom.set_flex(id, g, shrink);
            }
        }
        Property::FlexShrink(s) => {
            if node.flex_shrink != s {
                let grow = node.flex_grow;
                dom.set_flex(id, grow, s);
            }
        }
        Property::AlignSelf(a) => {
            if node.align_self != Some(a) {
                dom.set_align_self(id, Some(a));
            }
        }
        Property::AlignItems(a) => {
            if node.align_items != a {
                let justify = node.justify_content;
                dom.set_alignment(id, justify, a);
            }
        }
        Property::JustifyContent(j) => {
            if node.justify_content != j {
                let align = node.align_items;
                dom.set_alignment(id, j, align);
            }
        }
        Property::Direction(d) => {
            if node.direction != d {
                dom.set_direction(id, d);
            }
        }
        Property::Gap(g) => {
            if node.gap != g {
                dom.set_gap(id, g);
            }
        }
        Property::ZIndex(z) => {
            if node.z_index != z {
                dom.set_z_index(id, z);
            }
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
