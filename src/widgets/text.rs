//! Text widget: a single line of styled text.

use crate::dom::NodeData;
use crate::layout::LayoutConfig;
use crate::render::{CommandSink, RenderCx};
use crate::widget::{Intrinsic, Widget};

/// A run of text drawn at the node's content origin in the inherited text
/// color.
///
/// ```ignore
/// let title = Text::new("Settings").bold(true).with_font_size(24.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Text {
    text: String,
    font_size: Option<f32>,
    font_id: u16,
    bold: bool,
    italic: bool,
}

impl Text {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = Some(size);
        self
    }

    /// Font handle passed through to the backend.
    pub fn with_font(mut self, font_id: u16) -> Self {
        self.font_id = font_id;
        self
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    pub fn content(&self) -> &str {
        &self.text
    }

    pub fn font_size(&self) -> Option<f32> {
        self.font_size
    }
}

impl Widget for Text {
    fn kind_name(&self) -> &'static str {
        "text"
    }

    fn measure(&self, _node: &NodeData, metrics: &LayoutConfig) -> Intrinsic {
        let advance = metrics.char_advance(self.font_size, self.bold, self.italic);
        Intrinsic::new(self.text.chars().count() as f32 * advance, metrics.line_height)
    }

    fn render(&self, cx: &RenderCx<'_>, sink: &mut CommandSink) {
        cx.paint_box(sink);
        if !self.text.is_empty() {
            sink.text(cx.content().origin(), self.text.as_str(), cx.text_color(), self.font_id);
        }
    }

    fn text(&self) -> Option<&str> {
        Some(self.text.as_str())
    }

    fn set_text(&mut self, text: &str) -> bool {
        text.clone_into(&mut self.text);
        true
    }
}
