//! Dropdown widget: a header that opens a list of options below itself.
//!
//! While open, the option strip hangs below the node's box. Hit-testing
//! extends the node's box downward by one row per option so clicks on the
//! strip still reach the dropdown.

use crate::color::Color;
use crate::dom::NodeData;
use crate::event::{EventCx, EventKind, InputRecord};
use crate::geometry::{Point, Region};
use crate::layout::LayoutConfig;
use crate::render::{CommandSink, RenderCx};
use crate::widget::{Intrinsic, Widget};

const HIGHLIGHT: Color = Color::rgb(220, 230, 245);
const ARROW_SIZE: f32 = 8.0;

/// A single-selection dropdown.
pub struct Dropdown {
    options: Vec<String>,
    selected: Option<usize>,
    placeholder: String,
    open: bool,
    hovered: bool,
    on_change: Option<Box<dyn FnMut(usize)>>,
}

impl Dropdown {
    pub fn new(options: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            options: options.into_iter().map(Into::into).collect(),
            selected: None,
            placeholder: String::new(),
            open: false,
            hovered: false,
            on_change: None,
        }
    }

    pub fn with_selected(mut self, index: usize) -> Self {
        self.select(index);
        self
    }

    /// Header text shown while nothing is selected.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn on_change(mut self, f: impl FnMut(usize) + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_text(&self) -> Option<&str> {
        self.selected.and_then(|i| self.options.get(i)).map(String::as_str)
    }

    /// Select `index` without firing the callback. Out-of-range is rejected.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.options.len() {
            self.selected = Some(index);
            true
        } else {
            false
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    /// Option under an absolute `y`, given the node's absolute box.
    fn option_at(&self, bounds: Region, y: f32) -> Option<usize> {
        if bounds.height <= 0.0 || y < bounds.bottom() {
            return None;
        }
        let index = ((y - bounds.y - bounds.height) / bounds.height) as usize;
        (index < self.options.len()).then_some(index)
    }
}

impl Widget for Dropdown {
    fn kind_name(&self) -> &'static str {
        "dropdown"
    }

    fn measure(&self, _node: &NodeData, metrics: &LayoutConfig) -> Intrinsic {
        Intrinsic::new(metrics.dropdown_size.width, metrics.dropdown_size.height)
    }

    fn render(&self, cx: &RenderCx<'_>, sink: &mut CommandSink) {
        let node = cx.node();
        let bounds = cx.bounds();
        let metrics = cx.metrics();
        let fill = if node.background_color.is_set() { node.background_color } else { Color::WHITE };
        let border = if node.border_color.is_set() { node.border_color } else { Color::BLACK };
        let ink = cx.text_color();
        let text_dy = ((bounds.height - metrics.line_height) / 2.0).max(0.0);

        sink.fill_rect(bounds, fill);
        sink.stroke_rect(bounds, border, node.border_width.max(1.0));
        let header = self.selected_text().unwrap_or(self.placeholder.as_str());
        if !header.is_empty() {
            sink.text(Point::new(bounds.x + 6.0, bounds.y + text_dy), header, ink, 0);
        }

        let ax = bounds.right() - ARROW_SIZE - 6.0;
        let ay = bounds.y + (bounds.height - ARROW_SIZE / 2.0) / 2.0;
        let arrow = if self.open {
            vec![
                Point::new(ax, ay + ARROW_SIZE / 2.0),
                Point::new(ax + ARROW_SIZE, ay + ARROW_SIZE / 2.0),
                Point::new(ax + ARROW_SIZE / 2.0, ay),
            ]
        } else {
            vec![
                Point::new(ax, ay),
                Point::new(ax + ARROW_SIZE, ay),
                Point::new(ax + ARROW_SIZE / 2.0, ay + ARROW_SIZE / 2.0),
            ]
        };
        sink.polygon(arrow, ink, true);

        if !self.open {
            return;
        }
        for (i, option) in self.options.iter().enumerate() {
            let row = Region::new(
                bounds.x,
                bounds.y + bounds.height * (i as f32 + 1.0),
                bounds.width,
                bounds.height,
            );
            let row_fill = if self.selected == Some(i) { HIGHLIGHT } else { fill };
            sink.fill_rect(row, row_fill);
            sink.stroke_rect(row, border, 1.0);
            sink.text(Point::new(row.x + 6.0, row.y + text_dy), option.as_str(), ink, 0);
        }
    }

    fn on_event(&mut self, cx: &mut EventCx, event: &InputRecord) -> bool {
        match event.kind {
            EventKind::Click if event.is_press() => true,
            EventKind::Click => {
                if self.open {
                    if let Some(index) = self.option_at(cx.bounds(), event.y) {
                        self.selected = Some(index);
                        if let Some(on_change) = self.on_change.as_mut() {
                            on_change(index);
                        }
                    }
                    self.open = false;
                } else {
                    self.open = true;
                }
                cx.request_repaint();
                true
            }
            EventKind::Hover => {
                self.hovered = event.param != 0;
                true
            }
            _ => false,
        }
    }

    fn hit_extension(&self, node: &NodeData) -> f32 {
        if self.open {
            self.options.len() as f32 * node.bounds.height
        } else {
            0.0
        }
    }

    fn pseudo_class(&self, name: &str) -> bool {
        match name {
            "open" => self.open,
            "hover" => self.hovered,
            _ => false,
        }
    }

    fn text(&self) -> Option<&str> {
        self.selected_text()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::dom::NodeId;
    use crate::widgets::Container;

    fn cx() -> EventCx {
        EventCx::new(NodeId::default(), Region::new(10.0, 10.0, 100.0, 20.0))
    }

    #[test]
    fn release_opens_then_selects() {
        let picks = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&picks);
        let mut dd = Dropdown::new(["red", "green", "blue"]).on_change(move |i| log.borrow_mut().push(i));

        assert!(dd.on_event(&mut cx(), &InputRecord::press(20.0, 15.0)));
        assert!(!dd.is_open());
        dd.on_event(&mut cx(), &InputRecord::release(20.0, 15.0));
        assert!(dd.pseudo_class("open"));

        // Second option row spans y 50..70.
        dd.on_event(&mut cx(), &InputRecord::release(20.0, 55.0));
        assert!(!dd.is_open());
        assert_eq!(dd.selected_text(), Some("green"));
        assert_eq!(*picks.borrow(), vec![1]);
    }

    #[test]
    fn release_on_header_while_open_just_closes() {
        let mut dd = Dropdown::new(["a", "b"]).with_selected(0);
        dd.set_open(true);
        dd.on_event(&mut cx(), &InputRecord::release(20.0, 15.0));
        assert!(!dd.is_open());
        assert_eq!(dd.selected(), Some(0));
    }

    #[test]
    fn out_of_range_option_is_ignored() {
        let mut dd = Dropdown::new(["a"]);
        assert!(!dd.select(3));
        assert_eq!(dd.option_at(Region::new(0.0, 0.0, 10.0, 10.0), 25.0), None);
        assert_eq!(dd.option_at(Region::new(0.0, 0.0, 10.0, 10.0), 15.0), Some(0));
    }

    #[test]
    fn extension_only_while_open() {
        let mut dd = Dropdown::new(["a", "b", "c"]);
        let node = NodeData::new(Container::new()).with_size(100.0, 20.0);
        assert_eq!(dd.hit_extension(&node), 0.0);
        dd.set_open(true);
        assert_eq!(dd.hit_extension(&node), 60.0);
    }
}
