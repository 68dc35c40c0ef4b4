//! Checkbox widget: a toggle box with an optional label.

use crate::color::Color;
use crate::dom::NodeData;
use crate::event::{EventCx, EventKind, InputRecord};
use crate::geometry::{Point, Region};
use crate::layout::LayoutConfig;
use crate::render::{CommandSink, RenderCx};
use crate::widget::{Intrinsic, Widget};

/// Space between the box and the label.
const LABEL_GAP: f32 = 8.0;

/// A checkbox. Toggles on click release and reports the new state.
pub struct Checkbox {
    label: String,
    checked: bool,
    size: Option<f32>,
    on_change: Option<Box<dyn FnMut(bool)>>,
}

impl Checkbox {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            checked: false,
            size: None,
            on_change: None,
        }
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    /// Edge length of the box. Defaults to the layout metrics' checkbox size.
    pub fn with_box_size(mut self, size: f32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn on_change(mut self, f: impl FnMut(bool) + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Set the state without firing the callback.
    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    fn box_size(&self, metrics: &LayoutConfig) -> f32 {
        self.size.unwrap_or(metrics.checkbox_size)
    }
}

impl Widget for Checkbox {
    fn kind_name(&self) -> &'static str {
        "checkbox"
    }

    fn measure(&self, _node: &NodeData, metrics: &LayoutConfig) -> Intrinsic {
        let size = self.box_size(metrics);
        let mut width = size;
        if !self.label.is_empty() {
            width += LABEL_GAP + metrics.text_width(&self.label);
        }
        Intrinsic::new(width, size)
    }

    fn render(&self, cx: &RenderCx<'_>, sink: &mut CommandSink) {
        let node = cx.node();
        let metrics = cx.metrics();
        let size = self.box_size(metrics);
        let origin = cx.bounds().origin();
        let square = Region::new(origin.x, origin.y, size, size);

        let fill = if node.background_color.is_set() { node.background_color } else { Color::WHITE };
        sink.fill_rect(square, fill);
        let border = if node.border_color.is_set() { node.border_color } else { Color::BLACK };
        sink.stroke_rect(square, border, node.border_width.max(1.0));

        let ink = cx.text_color();
        if self.checked {
            let third = size / 3.0;
            let mid = Point::new(origin.x + size / 2.0, origin.y + 2.0 * third);
            sink.line(Point::new(origin.x + third, origin.y + third), mid, ink, 2.0);
            sink.line(mid, Point::new(origin.x + 2.0 * third + 1.0, origin.y + third), ink, 2.0);
        }
        if !self.label.is_empty() {
            let text_at = Point::new(
                origin.x + size + LABEL_GAP,
                origin.y + (size - metrics.line_height) / 2.0,
            );
            sink.text(text_at, self.label.as_str(), ink, 0);
        }
    }

    fn on_event(&mut self, cx: &mut EventCx, event: &InputRecord) -> bool {
        if event.kind != EventKind::Click {
            return false;
        }
        if !event.is_press() {
            self.checked = !self.checked;
            cx.request_repaint();
            if let Some(on_change) = self.on_change.as_mut() {
                on_change(self.checked);
            }
        }
        true
    }

    fn pseudo_class(&self, name: &str) -> bool {
        name == "checked" && self.checked
    }

    fn text(&self) -> Option<&str> {
        Some(self.label.as_str())
    }

    fn set_text(&mut self, text: &str) -> bool {
        text.clone_into(&mut self.label);
        true
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::dom::NodeId;

    #[test]
    fn toggles_on_release_only() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        let mut checkbox = Checkbox::new("Wi-Fi").on_change(move |v| log.borrow_mut().push(v));
        let mut cx = EventCx::new(NodeId::default(), Region::EMPTY);

        assert!(checkbox.on_event(&mut cx, &InputRecord::press(0.0, 0.0)));
        assert!(!checkbox.is_checked());
        assert!(checkbox.on_event(&mut cx, &InputRecord::release(0.0, 0.0)));
        assert!(checkbox.pseudo_class("checked"));
        checkbox.on_event(&mut cx, &InputRecord::release(0.0, 0.0));
        assert_eq!(*seen.borrow(), vec![true, false]);
    }

    #[test]
    fn measure_includes_label() {
        let metrics = LayoutConfig::default();
        let node = NodeData::new(Checkbox::new(""));
        assert_eq!(Checkbox::new("").measure(&node, &metrics), Intrinsic::new(20.0, 20.0));
        // 16 + 8 + 3 × 8
        let labelled = Checkbox::new("abc").with_box_size(16.0);
        assert_eq!(labelled.measure(&node, &metrics), Intrinsic::new(48.0, 16.0));
    }

    #[test]
    fn checked_box_draws_mark() {
        let mut dom = crate::dom::Dom::new();
        let id = dom
            .create(NodeData::new(Checkbox::new("").checked(true).with_box_size(12.0)))
            .unwrap();
        let mut sink = CommandSink::new(8);
        crate::render::render_tree(&dom, id, &LayoutConfig::default(), &mut sink);
        insta::assert_snapshot!(sink.dump(), @r###"
        rect 0,0 12x12 #ffffffff
        stroke 0,0 12x12 #000000ff w1
        line 4,4 -> 6,8 #000000ff w2
        line 6,8 -> 9,4 #000000ff w2
        "###);
    }
}
