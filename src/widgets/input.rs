//! Input widget: a single-line text field.
//!
//! Clicking focuses the field; key presses edit the text at the end of the
//! line. Backspace deletes, Enter submits, printable ASCII inserts. Timer
//! ticks blink the cursor while focused.

use crate::color::Color;
use crate::dom::NodeData;
use crate::event::{keys, EventCx, EventKind, InputRecord};
use crate::geometry::{Point, Region};
use crate::layout::LayoutConfig;
use crate::render::{CommandSink, RenderCx};
use crate::widget::{Intrinsic, Widget};

/// Characters accepted before further inserts are ignored.
pub const DEFAULT_MAX_LENGTH: usize = 255;

const PLACEHOLDER_COLOR: Color = Color::rgb(150, 150, 150);

/// A single-line text field.
pub struct Input {
    value: String,
    placeholder: String,
    password: bool,
    max_length: usize,
    focused: bool,
    cursor_visible: bool,
    blink_ticks: u8,
    on_change: Option<Box<dyn FnMut(&str)>>,
    on_submit: Option<Box<dyn FnMut(&str)>>,
}

impl Default for Input {
    fn default() -> Self {
        Self::new()
    }
}

impl Input {
    pub fn new() -> Self {
        Self {
            value: String::new(),
            placeholder: String::new(),
            password: false,
            max_length: DEFAULT_MAX_LENGTH,
            focused: false,
            cursor_visible: true,
            blink_ticks: 0,
            on_change: None,
            on_submit: None,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Text shown in grey while the value is empty.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Render every character as `*`.
    pub fn password(mut self, password: bool) -> Self {
        self.password = password;
        self
    }

    pub fn with_max_length(mut self, max: usize) -> Self {
        self.max_length = max;
        self
    }

    pub fn on_change(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    pub fn on_submit(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.on_submit = Some(Box::new(f));
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        self.cursor_visible = true;
        self.blink_ticks = 0;
    }

    fn changed(&mut self) {
        if let Some(on_change) = self.on_change.as_mut() {
            on_change(self.value.as_str());
        }
    }

    fn handle_key(&mut self, code: u32) {
        match code {
            keys::BACKSPACE => {
                if self.value.pop().is_some() {
                    self.changed();
                }
            }
            keys::ENTER => {
                if let Some(on_submit) = self.on_submit.as_mut() {
                    on_submit(self.value.as_str());
                }
            }
            32..=126 => {
                if self.value.chars().count() < self.max_length {
                    if let Some(c) = char::from_u32(code) {
                        self.value.push(c);
                        self.changed();
                    }
                }
            }
            _ => {}
        }
    }

    fn display_text(&self) -> String {
        if self.password {
            "*".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }
}

impl Widget for Input {
    fn kind_name(&self) -> &'static str {
        "input"
    }

    fn measure(&self, _node: &NodeData, metrics: &LayoutConfig) -> Intrinsic {
        Intrinsic::new(metrics.input_size.width, metrics.input_size.height)
    }

    fn render(&self, cx: &RenderCx<'_>, sink: &mut CommandSink) {
        let node = cx.node();
        let fill = if node.background_color.is_set() { node.background_color } else { Color::WHITE };
        cx.paint_box_with(sink, fill);

        let content = cx.content();
        let metrics = cx.metrics();
        let text_y = content.y + ((content.height - metrics.line_height) / 2.0).max(0.0);
        let origin = Point::new(content.x + 4.0, text_y);
        if self.value.is_empty() {
            if !self.placeholder.is_empty() {
                sink.text(origin, self.placeholder.as_str(), PLACEHOLDER_COLOR, 0);
            }
        } else {
            sink.text(origin, self.display_text(), cx.text_color(), 0);
        }

        if self.focused && self.cursor_visible {
            let x = origin.x + self.value.chars().count() as f32 * metrics.char_width;
            sink.fill_rect(Region::new(x, text_y, 1.0, metrics.line_height), cx.text_color());
        }
    }

    fn on_event(&mut self, cx: &mut EventCx, event: &InputRecord) -> bool {
        match event.kind {
            EventKind::Click => {
                if !self.focused {
                    self.set_focused(true);
                    cx.request_repaint();
                }
                true
            }
            EventKind::Key => {
                if event.is_press() {
                    self.handle_key(event.code());
                    cx.request_repaint();
                }
                true
            }
            EventKind::Blur => {
                if self.focused {
                    self.set_focused(false);
                    cx.request_repaint();
                }
                true
            }
            EventKind::Focus => {
                self.set_focused(true);
                cx.request_repaint();
                true
            }
            EventKind::Timer if self.focused => {
                self.blink_ticks += 1;
                if self.blink_ticks >= 2 {
                    self.blink_ticks = 0;
                    self.cursor_visible = !self.cursor_visible;
                    cx.request_repaint();
                }
                true
            }
            _ => false,
        }
    }

    fn pseudo_class(&self, name: &str) -> bool {
        name == "focus" && self.focused
    }

    fn focusable(&self) -> bool {
        true
    }

    fn text(&self) -> Option<&str> {
        Some(self.value.as_str())
    }

    fn set_text(&mut self, text: &str) -> bool {
        text.clone_into(&mut self.value);
        true
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::dom::NodeId;

    fn cx() -> EventCx {
        EventCx::new(NodeId::default(), Region::EMPTY)
    }

    fn type_str(input: &mut Input, text: &str) {
        for c in text.chars() {
            input.on_event(&mut cx(), &InputRecord::key_press(c as u32));
        }
    }

    #[test]
    fn click_focuses_and_blur_unfocuses() {
        let mut input = Input::new();
        assert!(input.on_event(&mut cx(), &InputRecord::release(0.0, 0.0)));
        assert!(input.pseudo_class("focus"));
        input.on_event(&mut cx(), &InputRecord::new(EventKind::Blur, 0.0, 0.0));
        assert!(!input.is_focused());
    }

    #[test]
    fn typing_edits_and_reports() {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let submitted = Rc::new(RefCell::new(None));
        let (c, s) = (Rc::clone(&changes), Rc::clone(&submitted));
        let mut input = Input::new()
            .on_change(move |v| c.borrow_mut().push(v.to_string()))
            .on_submit(move |v| *s.borrow_mut() = Some(v.to_string()));

        type_str(&mut input, "hi");
        input.on_event(&mut cx(), &InputRecord::key_press(keys::BACKSPACE));
        input.on_event(&mut cx(), &InputRecord::key_press(keys::ENTER));

        assert_eq!(input.value(), "h");
        assert_eq!(*changes.borrow(), vec!["h", "hi", "h"]);
        assert_eq!(submitted.borrow().as_deref(), Some("h"));
    }

    #[test]
    fn key_release_and_control_codes_are_ignored() {
        let mut input = Input::new();
        let release = InputRecord::new(EventKind::Key, 0.0, 0.0).with_param('a' as u32);
        assert!(input.on_event(&mut cx(), &release));
        input.on_event(&mut cx(), &InputRecord::key_press(keys::ESCAPE));
        assert_eq!(input.value(), "");
    }

    #[test]
    fn max_length_caps_inserts() {
        let mut input = Input::new().with_max_length(3);
        type_str(&mut input, "abcdef");
        assert_eq!(input.value(), "abc");
    }

    #[test]
    fn backspace_on_empty_is_silent() {
        let changes = Rc::new(RefCell::new(0));
        let c = Rc::clone(&changes);
        let mut input = Input::new().on_change(move |_| *c.borrow_mut() += 1);
        input.on_event(&mut cx(), &InputRecord::key_press(keys::BACKSPACE));
        assert_eq!(*changes.borrow(), 0);
    }

    #[test]
    fn timer_blinks_cursor_while_focused() {
        let mut input = Input::new();
        assert!(!input.on_event(&mut cx(), &InputRecord::timer(1)));
        input.set_focused(true);
        input.on_event(&mut cx(), &InputRecord::timer(1));
        assert!(input.cursor_visible);
        input.on_event(&mut cx(), &InputRecord::timer(2));
        assert!(!input.cursor_visible);
    }

    #[test]
    fn password_masks_display() {
        let input = Input::new().with_value("abc").password(true);
        assert_eq!(input.display_text(), "***");
        assert_eq!(Widget::text(&input), Some("abc"));
    }
}
