//! Node types: NodeId, NodeData, and the layout enums stored on every node.

use std::ops::{BitAnd, BitOr};

use slotmap::new_key_type;

use crate::color::Color;
use crate::geometry::{Point, Region, Spacing};
use crate::widget::WidgetKind;

new_key_type! {
    /// Generational handle for a node in the [`Dom`](super::Dom) arena.
    pub struct NodeId;
}

// ---------------------------------------------------------------------------
// ExplicitMask
// ---------------------------------------------------------------------------

/// Which geometric fields were set explicitly rather than computed by layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ExplicitMask(pub u8);

impl ExplicitMask {
    pub const NONE: ExplicitMask = ExplicitMask(0);
    pub const X: ExplicitMask = ExplicitMask(1);
    pub const Y: ExplicitMask = ExplicitMask(2);
    pub const WIDTH: ExplicitMask = ExplicitMask(4);
    pub const HEIGHT: ExplicitMask = ExplicitMask(8);
    pub const ALL: ExplicitMask = ExplicitMask(1 | 2 | 4 | 8);

    /// Check whether `self` contains all the bits in `other`.
    pub fn contains(self, other: ExplicitMask) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check whether no bits are set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// `self` with the bits in `other` cleared.
    pub fn without(self, other: ExplicitMask) -> ExplicitMask {
        ExplicitMask(self.0 & !other.0)
    }
}

impl BitOr for ExplicitMask {
    type Output = ExplicitMask;
    fn bitor(self, rhs: Self) -> Self::Output {
        ExplicitMask(self.0 | rhs.0)
    }
}

impl BitAnd for ExplicitMask {
    type Output = ExplicitMask;
    fn bitand(self, rhs: Self) -> Self::Output {
        ExplicitMask(self.0 & rhs.0)
    }
}

// ---------------------------------------------------------------------------
// Align / Direction
// ---------------------------------------------------------------------------

/// Alignment along either axis.
///
/// The `Space*` variants only affect the main axis (`justify_content`); on the
/// cross axis they behave like `Start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Align {
    #[default]
    Start,
    Center,
    End,
    Stretch,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
}

/// How a node arranges its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Vertical stack.
    #[default]
    Column,
    /// Horizontal flow with line wrapping.
    Row,
    /// Children are placed at their explicit offsets.
    Absolute,
}

// ---------------------------------------------------------------------------
// NodeData
// ---------------------------------------------------------------------------

/// Data associated with a single node.
///
/// Fields are public for reading. The [`Dom`](super::Dom) only hands out
/// shared references; every write goes through a `Dom` setter so that the
/// dirty flag reaches the root.
#[derive(Debug)]
pub struct NodeData {
    /// Per-kind state and behaviour.
    pub widget: WidgetKind,
    /// Optional unique id (`#id` selector).
    pub id: Option<String>,
    /// Classes (`.class` selector).
    pub classes: Vec<String>,
    /// Name/value attributes (`[name]` selector).
    pub attributes: Vec<(String, String)>,

    /// Position relative to the parent, and size.
    pub bounds: Region,
    /// Which of x/y/width/height were set explicitly.
    pub explicit: ExplicitMask,
    /// Explicit x/y offset, zero unless the matching mask bit is set.
    pub explicit_offset: Point,
    pub padding: Spacing,
    pub margin: Spacing,

    pub text_color: Color,
    pub background_color: Color,
    pub border_color: Color,
    pub border_width: f32,

    pub flex_grow: f32,
    pub flex_shrink: f32,
    /// Main-axis alignment of the children.
    pub justify_content: Align,
    /// Cross-axis alignment of the children.
    pub align_items: Align,
    /// Overrides the parent's `align_items` for this node.
    pub align_self: Option<Align>,
    pub direction: Direction,
    /// Space between consecutive children on the main axis.
    pub gap: f32,
    pub z_index: u16,

    pub visible: bool,
    pub disabled: bool,
    pub(crate) dirty: bool,
}

impl NodeData {
    /// Create node data for `widget` with default geometry and unset colors.
    ///
    /// New nodes are visible and dirty.
    pub fn new(widget: impl Into<WidgetKind>) -> Self {
        Self {
            widget: widget.into(),
            id: None,
            classes: Vec::new(),
            attributes: Vec::new(),
            bounds: Region::EMPTY,
            explicit: ExplicitMask::NONE,
            explicit_offset: Point::ZERO,
            padding: Spacing::ZERO,
            margin: Spacing::ZERO,
            text_color: Color::UNSET,
            background_color: Color::UNSET,
            border_color: Color::UNSET,
            border_width: 0.0,
            flex_grow: 0.0,
            flex_shrink: 0.0,
            justify_content: Align::Start,
            align_items: Align::Start,
            align_self: None,
            direction: Direction::Column,
            gap: 0.0,
            z_index: 0,
            visible: true,
            disabled: false,
            dirty: true,
        }
    }

    /// Set the id (builder).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add a single class (builder).
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !self.classes.contains(&class) {
            self.classes.push(class);
        }
        self
    }

    /// Add multiple classes (builder).
    pub fn with_classes(mut self, classes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        for class in classes {
            self = self.with_class(class);
        }
        self
    }

    /// Set an attribute (builder).
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.put_attribute(name.into(), value.into());
        self
    }

    /// Set an explicit width and height (builder).
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.bounds.width = width;
        self.bounds.height = height;
        self.explicit = self.explicit | ExplicitMask::WIDTH | ExplicitMask::HEIGHT;
        self
    }

    /// Set an explicit width (builder).
    pub fn with_width(mut self, width: f32) -> Self {
        self.bounds.width = width;
        self.explicit = self.explicit | ExplicitMask::WIDTH;
        self
    }

    /// Set an explicit height (builder).
    pub fn with_height(mut self, height: f32) -> Self {
        self.bounds.height = height;
        self.explicit = self.explicit | ExplicitMask::HEIGHT;
        self
    }

    /// Set an explicit offset (builder). Both x and y become explicit.
    pub fn with_offset(mut self, x: f32, y: f32) -> Self {
        self.bounds.x = x;
        self.bounds.y = y;
        self.explicit_offset = Point::new(x, y);
        self.explicit = self.explicit | ExplicitMask::X | ExplicitMask::Y;
        self
    }

    pub fn with_padding(mut self, padding: Spacing) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_margin(mut self, margin: Spacing) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Set the border color and width (builder).
    pub fn with_border(mut self, color: Color, width: f32) -> Self {
        self.border_color = color;
        self.border_width = width;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Set main-axis and cross-axis alignment of the children (builder).
    pub fn with_alignment(mut self, justify: Align, align_items: Align) -> Self {
        self.justify_content = justify;
        self.align_items = align_items;
        self
    }

    pub fn with_align_self(mut self, align: Align) -> Self {
        self.align_self = Some(align);
        self
    }

    pub fn with_flex_grow(mut self, grow: f32) -> Self {
        self.flex_grow = grow;
        self
    }

    pub fn with_gap(mut self, gap: f32) -> Self {
        self.gap = gap;
        self
    }

    pub fn with_z_index(mut self, z: u16) -> Self {
        self.z_index = z;
        self
    }

    /// Start hidden (builder).
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Set whether this node is disabled (builder).
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Whether layout still has to visit this node.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Check whether this node has a given class.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// The value of attribute `name`, if present.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Flex-grow weight used by layout: the node's own weight, else the kind's hint.
    pub fn effective_flex_grow(&self) -> f32 {
        if self.flex_grow > 0.0 {
            self.flex_grow
        } else {
            self.widget.behavior().flex_grow_hint()
        }
    }

    pub(crate) fn add_class(&mut self, class: &str) -> bool {
        if self.has_class(class) {
            return false;
        }
        self.classes.push(class.to_owned());
        true
    }

    pub(crate) fn remove_class(&mut self, class: &str) -> bool {
        let before = self.classes.len();
        self.classes.retain(|c| c != class);
        self.classes.len() != before
    }

    pub(crate) fn put_attribute(&mut self, name: String, value: String) {
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
