//! Style resolution: selector groups, additive specificity, rule tables.
//!
//! A [`StyleContext`] holds [`StyleRule`]s. Resolving a node collects the
//! rules whose [`SelectorGroup`] matches, orders them by [`Specificity`]
//! and writes their properties through the [`Dom`](crate::dom::Dom)
//! setters. There is no cascade: each node is resolved on its own, and only
//! colors fall back to ancestors at paint time.

pub mod context;
pub mod model;
pub mod presets;
pub mod specificity;

pub use context::{RuleId, StyleContext, DEFAULT_RULE_CAPACITY};
pub use model::{Property, SelectorGroup, SimpleSelector, StyleRule, MAX_SELECTORS};
pub use presets::{button_style, container_style, text_style};
pub use specificity::Specificity;

/// How type selectors (`button`, `text`) are matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeMatching {
    /// Type selectors match every node.
    #[default]
    Permissive,
    /// Type selectors compare against the widget kind name, ignoring ASCII
    /// case.
    Strict,
}
