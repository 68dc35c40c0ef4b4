//! Style data model: simple selectors, selector groups, properties, rules.

use crate::color::Color;
use crate::dom::{Align, Direction};

/// Most simple selectors a group can hold.
pub const MAX_SELECTORS: usize = 8;

/// One condition on a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimpleSelector {
    /// Widget kind name (`button`).
    Type(String),
    /// `#id`
    Id(String),
    /// `.class`
    Class(String),
    /// `:hover`, `:checked`, `:disabled`, ...
    Pseudo(String),
    /// `[name]`: the node carries an attribute with this name.
    Attribute(String),
}

/// An AND of up to [`MAX_SELECTORS`] simple selectors.
///
/// An empty group matches every node.
///
/// ```ignore
/// let sel = SelectorGroup::of_type("button").and_class("primary").and_pseudo("hover");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SelectorGroup {
    selectors: Vec<SimpleSelector>,
}

impl SelectorGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn of_type(name: impl Into<String>) -> Self {
        Self::new().and(SimpleSelector::Type(name.into()))
    }

    pub fn id(name: impl Into<String>) -> Self {
        Self::new().and(SimpleSelector::Id(name.into()))
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::new().and(SimpleSelector::Class(name.into()))
    }

    pub fn pseudo(name: impl Into<String>) -> Self {
        Self::new().and(SimpleSelector::Pseudo(name.into()))
    }

    pub fn attribute(name: impl Into<String>) -> Self {
        Self::new().and(SimpleSelector::Attribute(name.into()))
    }

    /// Add a condition (builder). Conditions past the limit are dropped.
    pub fn and(mut self, selector: SimpleSelector) -> Self {
        self.push(selector);
        self
    }

    pub fn and_type(self, name: impl Into<String>) -> Self {
        self.and(SimpleSelector::Type(name.into()))
    }

    pub fn and_id(self, name: impl Into<String>) -> Self {
        self.and(SimpleSelector::Id(name.into()))
    }

    pub fn and_class(self, name: impl Into<String>) -> Self {
        self.and(SimpleSelector::Class(name.into()))
    }

    pub fn and_pseudo(self, name: impl Into<String>) -> Self {
        self.and(SimpleSelector::Pseudo(name.into()))
    }

    pub fn and_attribute(self, name: impl Into<String>) -> Self {
        self.and(SimpleSelector::Attribute(name.into()))
    }

    /// Add a condition. Returns `false` when the group is already full.
    pub fn push(&mut self, selector: SimpleSelector) -> bool {
        if self.selectors.len() >= MAX_SELECTORS {
            tracing::debug!(?selector, limit = MAX_SELECTORS, "selector group full, condition dropped");
            return false;
        }
        self.selectors.push(selector);
        true
    }

    pub fn selectors(&self) -> &[SimpleSelector] {
        &self.selectors
    }

    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }
}

/// A single style property and its value.
#[derive(Debug, Clone, PartialEq)]
pub enum Property {
    TextColor(Color),
    BackgroundColor(Color),
    BorderColor(Color),
    BorderWidth(f32),
    /// Explicit width; sets the width flag.
    Width(f32),
    /// Explicit height; sets the height flag.
    Height(f32),
    /// Same margin on all four edges.
    Margin(f32),
    /// Same padding on all four edges.
    Padding(f32),
    Visible(bool),
    FlexGrow(f32),
    FlexShrink(f32),
    AlignSelf(Align),
    AlignItems(Align),
    JustifyContent(Align),
    Direction(Direction),
    Gap(f32),
    ZIndex(u16),
}

/// A selector group and the properties it applies.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleRule {
    pub selector: SelectorGroup,
    pub properties: Vec<Property>,
}

impl StyleRule {
    pub fn new(selector: SelectorGroup) -> Self {
        Self { selector, properties: Vec::new() }
    }

    /// Append a property (builder).
    pub fn with(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }
}

// ===========================================================================
// Tests
// ===========================================================================
