//! Inline decoration widgets: styled runs of text such as strong, emphasis,
//! code, highlight and links.

use crate::color::Color;
use crate::dom::NodeData;
use crate::event::{EventCx, EventKind, InputRecord};
use crate::geometry::Point;
use crate::layout::LayoutConfig;
use crate::render::{CommandSink, RenderCx};
use crate::widget::{Intrinsic, Widget};

const LINK_COLOR: Color = Color::rgb(0, 102, 204);
const CODE_BACKGROUND: Color = Color::rgb(240, 240, 240);
const HIGHLIGHT_BACKGROUND: Color = Color::rgb(255, 240, 140);

/// How an inline run is decorated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoration {
    Strong,
    Emphasis,
    Underline,
    Strikethrough,
    Code,
    Highlight,
    Link { url: String },
}

/// A decorated run of text.
pub struct Inline {
    text: String,
    decoration: Decoration,
    on_click: Option<Box<dyn FnMut(&str)>>,
}

impl Inline {
    pub fn new(text: impl Into<String>, decoration: Decoration) -> Self {
        Self { text: text.into(), decoration, on_click: None }
    }

    pub fn strong(text: impl Into<String>) -> Self {
        Self::new(text, Decoration::Strong)
    }

    pub fn emphasis(text: impl Into<String>) -> Self {
        Self::new(text, Decoration::Emphasis)
    }

    pub fn code(text: impl Into<String>) -> Self {
        Self::new(text, Decoration::Code)
    }

    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(text, Decoration::Link { url: url.into() })
    }

    /// Called with the link's URL on click release. Has no effect on
    /// non-link decorations.
    pub fn on_click(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.on_click = Some(Box::new(f));
        self
    }

    pub fn decoration(&self) -> &Decoration {
        &self.decoration
    }

    pub fn url(&self) -> Option<&str> {
        match &self.decoration {
            Decoration::Link { url } => Some(url.as_str()),
            _ => None,
        }
    }
}

impl Widget for Inline {
    fn kind_name(&self) -> &'static str {
        match self.decoration {
            Decoration::Strong => "strong",
            Decoration::Emphasis => "em",
            Decoration::Underline => "u",
            Decoration::Strikethrough => "s",
            Decoration::Code => "code",
            Decoration::Highlight => "mark",
            Decoration::Link { .. } => "link",
        }
    }

    fn measure(&self, _node: &NodeData, metrics: &LayoutConfig) -> Intrinsic {
        let advance = metrics.char_advance(
            None,
            self.decoration == Decoration::Strong,
            self.decoration == Decoration::Emphasis,
        );
        Intrinsic::new(self.text.chars().count() as f32 * advance, metrics.line_height)
    }

    fn render(&self, cx: &RenderCx<'_>, sink: &mut CommandSink) {
        let node = cx.node();
        let metrics = cx.metrics();
        let backdrop = match self.decoration {
            Decoration::Code => Some(CODE_BACKGROUND),
            Decoration::Highlight => Some(HIGHLIGHT_BACKGROUND),
            _ => None,
        };
        match backdrop {
            Some(fill) if !node.background_color.is_set() => cx.paint_box_with(sink, fill),
            _ => cx.paint_box(sink),
        }

        let color = match self.decoration {
            Decoration::Link { .. } if !node.text_color.is_set() => LINK_COLOR,
            _ => cx.text_color(),
        };
        let origin = cx.content().origin();
        sink.text(origin, self.text.as_str(), color, 0);

        let width = self.measure(node, metrics).width.unwrap_or(0.0);
        let rule_y = match self.decoration {
            Decoration::Underline | Decoration::Link { .. } => Some(origin.y + metrics.line_height - 2.0),
            Decoration::Strikethrough => Some(origin.y + metrics.line_height / 2.0),
            _ => None,
        };
        if let Some(y) = rule_y {
            sink.line(Point::new(origin.x, y), Point::new(origin.x + width, y), color, 1.0);
        }
    }

    fn on_event(&mut self, _cx: &mut EventCx, event: &InputRecord) -> bool {
        let Decoration::Link { url } = &self.decoration else {
            return false;
        };
        if event.kind != EventKind::Click {
            return false;
        }
        if !event.is_press() {
            if let Some(on_click) = self.on_click.as_mut() {
                on_click(url.as_str());
            }
        }
        true
    }

    fn text(&self) -> Option<&str> {
        Some(self.text.as_str())
    }

    fn set_text(&mut self, text: &str) -> bool {
        text.clone_into(&mut self.text);
        true
    }
}
