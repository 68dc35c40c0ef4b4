//! Tagged union over the built-in widget kinds.

use std::fmt;

use super::traits::Widget;
use crate::widgets::{Button, Canvas, Checkbox, Container, Dropdown, Inline, Input, Spacer, Text};

macro_rules! widget_kinds {
    ($($variant:ident => $as_ref:ident, $as_mut:ident;)*) => {
        /// The per-kind state of a node.
        ///
        /// Every variant implements [`Widget`]; [`WidgetKind::behavior`] gives
        /// uniform access, the `as_*` accessors give typed access.
        pub enum WidgetKind {
            $($variant($variant),)*
            /// A user-defined kind.
            Custom(Box<dyn Widget>),
        }

        impl WidgetKind {
            /// The kind's behaviour as a trait object.
            pub fn behavior(&self) -> &dyn Widget {
                match self {
                    $(WidgetKind::$variant(w) => w as &dyn Widget,)*
                    WidgetKind::Custom(w) => w.as_ref(),
                }
            }

            /// Mutable access to the kind's behaviour.
            pub fn behavior_mut(&mut self) -> &mut dyn Widget {
                match self {
                    $(WidgetKind::$variant(w) => w as &mut dyn Widget,)*
                    WidgetKind::Custom(w) => w.as_mut(),
                }
            }

            $(
                pub fn $as_ref(&self) -> Option<&$variant> {
                    match self {
                        WidgetKind::$variant(w) => Some(w),
                        _ => None,
                    }
                }

                pub fn $as_mut(&mut self) -> Option<&mut $variant> {
                    match self {
                        WidgetKind::$variant(w) => Some(w),
                        _ => None,
                    }
                }
            )*
        }

        $(
            impl From<$variant> for WidgetKind {
                fn from(widget: $variant) -> Self {
                    WidgetKind::$variant(widget)
                }
            }
        )*
    };
}

widget_kinds! {
    Container => as_container, as_container_mut;
    Text => as_text, as_text_mut;
    Button => as_button, as_button_mut;
    Canvas => as_canvas, as_canvas_mut;
    Spacer => as_spacer, as_spacer_mut;
    Checkbox => as_checkbox, as_checkbox_mut;
    Input => as_input, as_input_mut;
    Dropdown => as_dropdown, as_dropdown_mut;
    Inline => as_inline, as_inline_mut;
}

impl WidgetKind {
    /// Wrap a user-defined kind.
    pub fn custom(widget: impl Widget + 'static) -> Self {
        WidgetKind::Custom(Box::new(widget))
    }

    /// Shorthand for `behavior().kind_name()`.
    pub fn kind_name(&self) -> &'static str {
        self.behavior().kind_name()
    }
}

impl fmt::Debug for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("WidgetKind").field(&self.kind_name()).finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
