//! Additive selector specificity.
//!
//! Each simple selector carries a fixed weight and a group's specificity is
//! their sum. Matching rules apply in ascending specificity, so a higher
//! total overwrites a lower one on the same property.
//!
//! | Selector  | Weight |
//! |-----------|--------|
//! | type      | 1      |
//! | class     | 10     |
//! | pseudo    | 10     |
//! | attribute | 10     |
//! | id        | 100    |

use super::model::{SelectorGroup, SimpleSelector};

pub const TYPE_WEIGHT: u16 = 1;
pub const CLASS_WEIGHT: u16 = 10;
pub const PSEUDO_WEIGHT: u16 = 10;
pub const ATTRIBUTE_WEIGHT: u16 = 10;
pub const ID_WEIGHT: u16 = 100;

/// Summed selector weight. Higher wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Specificity(pub u16);

impl Specificity {
    /// Weight of a single simple selector.
    pub fn weight(selector: &SimpleSelector) -> u16 {
        match selector {
            SimpleSelector::Type(_) => TYPE_WEIGHT,
            SimpleSelector::Id(_) => ID_WEIGHT,
            SimpleSelector::Class(_) => CLASS_WEIGHT,
            SimpleSelector::Pseudo(_) => PSEUDO_WEIGHT,
            SimpleSelector::Attribute(_) => ATTRIBUTE_WEIGHT,
        }
    }

    /// Specificity of a whole group.
    pub fn of(group: &SelectorGroup) -> Self {
        let total = group
            .selectors()
            .iter()
            .fold(0u16, |acc, s| acc.saturating_add(Self::weight(s)));
        Specificity(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_add_up() {
        assert_eq!(Specificity::of(&SelectorGroup::new()), Specificity(0));
        assert_eq!(Specificity::of(&SelectorGroup::of_type("button")), Specificity(1));
        let group = SelectorGroup::of_type("button")
            .and_class("primary")
            .and_pseudo("hover")
            .and_attribute("data-x");
        assert_eq!(Specificity::of(&group), Specificity(31));
        assert_eq!(Specificity::of(&SelectorGroup::id("main")), Specificity(100));
    }

    #[test]
    fn ordering() {
        let id = Specificity::of(&SelectorGroup::id("a"));
        let classes = Specificity::of(
            &SelectorGroup::class("a").and_class("b").and_class("c").and_class("d"),
        );
        assert!(id > classes);
        assert!(classes > Specificity::of(&SelectorGroup::of_type("text")));
    }
}
