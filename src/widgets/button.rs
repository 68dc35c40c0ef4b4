//! Button widget: a clickable label.
//!
//! A press marks the button pressed and is swallowed; the release clears the
//! flag and fires the click callback. Hover and press states tint the
//! background so they are visible without any style rules.

use crate::color::Color;
use crate::dom::NodeData;
use crate::event::{EventCx, EventKind, InputRecord};
use crate::geometry::Point;
use crate::layout::LayoutConfig;
use crate::render::{CommandSink, RenderCx};
use crate::widget::{Intrinsic, Widget};

/// Fill used when the node has no background color.
pub const DEFAULT_BACKGROUND: Color = Color::rgba(64, 64, 64, 255);

const HOVER_TINT: i16 = 18;
const PRESS_TINT: i16 = -24;

// ---------------------------------------------------------------------------
// Button
// ---------------------------------------------------------------------------

/// An interactive button with a centered label.
///
/// # Examples
///
/// ```ignore
/// let save = Button::new("Save").on_click(|| println!("saved"));
/// ```
pub struct Button {
    label: String,
    font_id: u16,
    hovered: bool,
    pressed: bool,
    on_click: Option<Box<dyn FnMut()>>,
}

impl Button {
    /// Create a new button with the given label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            font_id: 0,
            hovered: false,
            pressed: false,
            on_click: None,
        }
    }

    /// Run `f` on every click release (builder pattern).
    pub fn on_click(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_click = Some(Box::new(f));
        self
    }

    pub fn with_font(mut self, font_id: u16) -> Self {
        self.font_id = font_id;
        self
    }

    pub fn set_on_click(&mut self, f: impl FnMut() + 'static) {
        self.on_click = Some(Box::new(f));
    }

    /// Return the button label.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Background after hover/press tinting.
    fn fill(&self, base: Color) -> Color {
        let base = if base.is_set() { base } else { DEFAULT_BACKGROUND };
        if self.pressed {
            base.tint(PRESS_TINT)
        } else if self.hovered {
            base.tint(HOVER_TINT)
        } else {
            base
        }
    }
}

impl Widget for Button {
    fn kind_name(&self) -> &'static str {
        "button"
    }

    fn measure(&self, node: &NodeData, metrics: &LayoutConfig) -> Intrinsic {
        let padding_h = node.padding.horizontal();
        let padding_h = if padding_h > 0.0 { padding_h } else { metrics.button_padding };
        let width = metrics.text_width(&self.label) + padding_h;
        let height = metrics.button_height.max(node.padding.vertical() + 14.0);
        Intrinsic::new(width, height)
    }

    fn render(&self, cx: &RenderCx<'_>, sink: &mut CommandSink) {
        let node = cx.node();
        cx.paint_box_with(sink, self.fill(node.background_color));

        let bounds = cx.bounds();
        let metrics = cx.metrics();
        let text_w = metrics.text_width(&self.label);
        let origin = Point::new(
            bounds.x + ((bounds.width - text_w) / 2.0).max(0.0),
            bounds.y + ((bounds.height - metrics.line_height) / 2.0).max(0.0),
        );
        let color = if node.text_color.is_set() { node.text_color } else { Color::WHITE };
        sink.text(origin, self.label.as_str(), color, self.font_id);
    }

    fn on_event(&mut self, cx: &mut EventCx, event: &InputRecord) -> bool {
        match event.kind {
            EventKind::Click if event.is_press() => {
                self.pressed = true;
                cx.request_repaint();
                true
            }
            EventKind::Click => {
                self.pressed = false;
                cx.request_repaint();
                if let Some(on_click) = self.on_click.as_mut() {
                    on_click();
                }
                true
            }
            EventKind::Touch => true,
            EventKind::Hover => {
                let hovered = event.param != 0;
                if self.hovered != hovered {
                    self.hovered = hovered;
                    cx.request_repaint();
                }
                true
            }
            _ => false,
        }
    }

    fn pseudo_class(&self, name: &str) -> bool {
        match name {
            "hover" => self.hovered,
            "pressed" | "active" => self.pressed,
            _ => false,
        }
    }

    fn text(&self) -> Option<&str> {
        Some(self.label.as_str())
    }

    fn set_text(&mut self, text: &str) -> bool {
        text.clone_into(&mut self.label);
        true
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::dom::{Dom, NodeId};
    use crate::geometry::Region;

    fn cx() -> EventCx {
        EventCx::new(NodeId::default(), Region::new(0.0, 0.0, 40.0, 30.0))
    }

    #[test]
    fn click_fires_on_release() {
        let clicks = Rc::new(Cell::new(0));
        let counter = Rc::clone(&clicks);
        let mut button = Button::new("Go").on_click(move || counter.set(counter.get() + 1));

        let mut cx = cx();
        assert!(button.on_event(&mut cx, &InputRecord::press(1.0, 1.0)));
        assert!(button.is_pressed());
        assert!(button.pseudo_class("active"));
        assert_eq!(clicks.get(), 0);

        assert!(button.on_event(&mut cx, &InputRecord::release(1.0, 1.0)));
        assert!(!button.is_pressed());
        assert_eq!(clicks.get(), 1);
        assert!(cx.repaint_requested());
    }

    #[test]
    fn hover_tracks_param() {
        let mut button = Button::new("Go");
        let mut cx = cx();
        assert!(button.on_event(&mut cx, &InputRecord::hover(0.0, 0.0, true)));
        assert!(button.pseudo_class("hover"));
        button.on_event(&mut cx, &InputRecord::hover(0.0, 0.0, false));
        assert!(!button.is_hovered());
    }

    #[test]
    fn repeated_hover_does_not_repaint() {
        let mut button = Button::new("Go");
        let mut first = cx();
        button.on_event(&mut first, &InputRecord::hover(0.0, 0.0, true));
        assert!(first.repaint_requested());

        let mut moved = cx();
        assert!(button.on_event(&mut moved, &InputRecord::hover(3.0, 2.0, true)));
        assert!(!moved.repaint_requested());
        assert!(button.is_hovered());
    }

    #[test]
    fn ignores_keys_and_consumes_touch() {
        let mut button = Button::new("Go");
        let mut cx = cx();
        assert!(!button.on_event(&mut cx, &InputRecord::key_press(13)));
        assert!(button.on_event(&mut cx, &InputRecord::new(EventKind::Touch, 0.0, 0.0)));
    }

    #[test]
    fn tints_by_state() {
        let mut button = Button::new("Go");
        assert_eq!(button.fill(Color::UNSET), DEFAULT_BACKGROUND);
        button.hovered = true;
        assert_eq!(button.fill(Color::UNSET), Color::rgb(82, 82, 82));
        button.pressed = true;
        assert_eq!(button.fill(Color::UNSET), Color::rgb(40, 40, 40));
    }

    #[test]
    fn renders_centered_label() {
        let mut dom = Dom::new();
        let id = dom.create(NodeData::new(Button::new("OK"))).unwrap();
        dom.set_bounds(id, 0.0, 0.0, 36.0, 30.0);
        let metrics = LayoutConfig::default();
        let mut sink = CommandSink::new(8);
        crate::render::render_tree(&dom, id, &metrics, &mut sink);
        insta::assert_snapshot!(sink.dump(), @r###"
        rect 0,0 36x30 #404040ff
        text 10,5 #ffffffff f0 "OK"
        "###);
    }
}
