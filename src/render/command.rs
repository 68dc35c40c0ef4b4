//! Drawing commands and the append-only command sink.
//!
//! Widgets never draw pixels. Their render hooks push [`DrawCommand`]s into a
//! [`CommandSink`], which a backend later executes in order. The sink has a
//! fixed capacity; pushes past it are dropped silently and counted.

use std::fmt;

use crate::color::Color;
use crate::geometry::{Point, Region};

// ---------------------------------------------------------------------------
// DrawCommand
// ---------------------------------------------------------------------------

/// A single drawing primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Filled rectangle.
    Rect { region: Region, color: Color },
    /// Rectangle outline.
    StrokeRect { region: Region, color: Color, width: f32 },
    /// A run of text with its top-left corner at `origin`.
    Text { origin: Point, text: String, color: Color, font_id: u16 },
    Line { from: Point, to: Point, color: Color, width: f32 },
    /// Circular arc. Angles are in degrees, clockwise from 3 o'clock.
    Arc { center: Point, radius: f32, start: f32, end: f32, color: Color },
    Polygon { points: Vec<Point>, color: Color, filled: bool },
    PushClip(Region),
    PopClip,
    /// Affine transform `[a, b, c, d, e, f]`.
    PushTransform([f32; 6]),
    PopTransform,
}

impl fmt::Display for DrawCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawCommand::Rect { region: r, color } => {
                write!(f, "rect {},{} {}x{} {color:?}", r.x, r.y, r.width, r.height)
            }
            DrawCommand::StrokeRect { region: r, color, width } => {
                write!(f, "stroke {},{} {}x{} {color:?} w{width}", r.x, r.y, r.width, r.height)
            }
            DrawCommand::Text { origin, text, color, font_id } => {
                write!(f, "text {},{} {color:?} f{font_id} {text:?}", origin.x, origin.y)
            }
            DrawCommand::Line { from, to, color, width } => {
                write!(f, "line {},{} -> {},{} {color:?} w{width}", from.x, from.y, to.x, to.y)
            }
            DrawCommand::Arc { center, radius, start, end, color } => {
                write!(f, "arc {},{} r{radius} {start}..{end} {color:?}", center.x, center.y)
            }
            DrawCommand::Polygon { points, color, filled } => {
                let kind = if *filled { "fill" } else { "stroke" };
                write!(f, "polygon {kind} {color:?}")?;
                for p in points {
                    write!(f, " {},{}", p.x, p.y)?;
                }
                Ok(())
            }
            DrawCommand::PushClip(r) => write!(f, "clip {},{} {}x{}", r.x, r.y, r.width, r.height),
            DrawCommand::PopClip => write!(f, "unclip"),
            DrawCommand::PushTransform(m) => write!(f, "transform {m:?}"),
            DrawCommand::PopTransform => write!(f, "untransform"),
        }
    }
}

// ---------------------------------------------------------------------------
// CommandSink
// ---------------------------------------------------------------------------

/// Append-only, fixed-capacity list of drawing commands.
#[derive(Debug, Clone)]
pub struct CommandSink {
    commands: Vec<DrawCommand>,
    capacity: usize,
    dropped: usize,
    trace: bool,
}

impl CommandSink {
    /// Create a sink that accepts at most `capacity` commands per frame.
    pub fn new(capacity: usize) -> Self {
        Self {
            commands: Vec::with_capacity(capacity),
            capacity,
            dropped: 0,
            trace: false,
        }
    }

    /// Emit a trace event for every accepted command (builder).
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// Append a command. Returns `false` and drops it when the sink is full.
    pub fn push(&mut self, command: DrawCommand) -> bool {
        if self.commands.len() >= self.capacity {
            self.dropped += 1;
            return false;
        }
        if self.trace {
            tracing::trace!(command = %command, "draw");
        }
        self.commands.push(command);
        true
    }

    pub fn fill_rect(&mut self, region: Region, color: Color) -> bool {
        self.push(DrawCommand::Rect { region, color })
    }

    pub fn stroke_rect(&mut self, region: Region, color: Color, width: f32) -> bool {
        self.push(DrawCommand::StrokeRect { region, color, width })
    }

    pub fn text(&mut self, origin: Point, text: impl Into<String>, color: Color, font_id: u16) -> bool {
        self.push(DrawCommand::Text { origin, text: text.into(), color, font_id })
    }

    pub fn line(&mut self, from: Point, to: Point, color: Color, width: f32) -> bool {
        self.push(DrawCommand::Line { from, to, color, width })
    }

    pub fn arc(&mut self, center: Point, radius: f32, start: f32, end: f32, color: Color) -> bool {
        self.push(DrawCommand::Arc { center, radius, start, end, color })
    }

    pub fn polygon(&mut self, points: Vec<Point>, color: Color, filled: bool) -> bool {
        self.push(DrawCommand::Polygon { points, color, filled })
    }

    pub fn push_clip(&mut self, region: Region) -> bool {
        self.push(DrawCommand::PushClip(region))
    }

    pub fn pop_clip(&mut self) -> bool {
        self.push(DrawCommand::PopClip)
    }

    pub fn push_transform(&mut self, matrix: [f32; 6]) -> bool {
        self.push(DrawCommand::PushTransform(matrix))
    }

    pub fn pop_transform(&mut self) -> bool {
        self.push(DrawCommand::PopTransform)
    }

    /// Drop all commands and reset the drop counter. Keeps the allocation.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.dropped = 0;
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Commands rejected since the last [`clear`](Self::clear).
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// One command per line, in [`Display`](fmt::Display) form.
    pub fn dump(&self) -> String {
        self.commands
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// ===========================================================================
// Tests
// ===========================================================================
