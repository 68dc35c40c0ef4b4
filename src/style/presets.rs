//! Ready-made class rules for the common widget looks.
//!
//! Each builder returns a [`StyleRule`] keyed on a single class selector;
//! register it with [`StyleContext::add_rule`](super::StyleContext::add_rule).

use crate::color::Color;

use super::model::{Property, SelectorGroup, StyleRule};

/// Background, text color, padding and a fixed size for `.class`.
pub fn button_style(
    class: &str,
    background: Color,
    text_color: Color,
    padding: f32,
    width: f32,
    height: f32,
) -> StyleRule {
    StyleRule::new(SelectorGroup::class(class))
        .with(Property::BackgroundColor(background))
        .with(Property::TextColor(text_color))
        .with(Property::Padding(padding))
        .with(Property::Width(width))
        .with(Property::Height(height))
        .with(Property::Visible(true))
}

/// Background, margin and padding for `.class`.
pub fn container_style(class: &str, background: Color, margin: f32, padding: f32) -> StyleRule {
    StyleRule::new(SelectorGroup::class(class))
        .with(Property::BackgroundColor(background))
        .with(Property::Margin(margin))
        .with(Property::Padding(padding))
        .with(Property::Visible(true))
}

pub fn text_style(class: &str, text_color: Color) -> StyleRule {
    StyleRule::new(SelectorGroup::class(class))
        .with(Property::TextColor(text_color))
        .with(Property::Visible(true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Dom, NodeData};
    use crate::geometry::Spacing;
    use crate::style::StyleContext;
    use crate::widgets::{Button, Container, Text};

    #[test]
    fn presets_apply_to_classed_nodes() {
        let mut dom = Dom::new();
        let root = dom.create(NodeData::new(Container::new()).with_class("panel")).unwrap();
        let ok = dom.create(NodeData::new(Button::new("OK")).with_class("cta")).unwrap();
        let note = dom.create(NodeData::new(Text::new("n")).with_class("note")).unwrap();
        dom.attach(root, ok).unwrap();
        dom.attach(root, note).unwrap();

        let grey = Color::rgb(40, 40, 40);
        let mut styles = StyleContext::new();
        styles.add_rule(container_style("panel", grey, 2.0, 8.0)).unwrap();
        styles.add_rule(button_style("cta", Color::rgb(0, 120, 0), Color::WHITE, 6.0, 90.0, 32.0)).unwrap();
        styles.add_rule(text_style("note", Color::rgb(200, 0, 0))).unwrap();
        assert_eq!(styles.resolve_tree(&mut dom, root), 3);

        let panel = dom.get(root).unwrap();
        assert_eq!(panel.background_color, grey);
        assert_eq!(panel.margin, Spacing::all(2.0));
        assert_eq!(panel.padding, Spacing::all(8.0));

        let button = dom.get(ok).unwrap();
        assert_eq!((button.bounds.width, button.bounds.height), (90.0, 32.0));
        assert_eq!(button.text_color, Color::WHITE);

        assert_eq!(dom.get(note).unwrap().text_color, Color::rgb(200, 0, 0));
    }
}
