//! Normalized input records fed to the event router by the host.
//!
//! A record carries a kind, a position, a 32-bit kind-specific parameter,
//! optional opaque data, and a timestamp. For clicks and keys, bit 31 of the
//! parameter is the press flag. With the `crossterm` feature, terminal events
//! convert into records so hosts never build them by hand.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

/// Bit 31 of `param`: set on press, clear on release.
pub const PRESS_BIT: u32 = 0x8000_0000;

/// Key codes understood by the built-in input widget.
pub mod keys {
    pub const BACKSPACE: u32 = 8;
    pub const TAB: u32 = 9;
    pub const ENTER: u32 = 13;
    pub const ESCAPE: u32 = 27;
    pub const DELETE: u32 = 127;
}

// ---------------------------------------------------------------------------
// EventKind
// ---------------------------------------------------------------------------

/// What happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Touch,
    Key,
    Timer,
    Hover,
    Scroll,
    Focus,
    Blur,
    Custom,
}

// ---------------------------------------------------------------------------
// InputRecord
// ---------------------------------------------------------------------------

/// A single normalized input event.
#[derive(Clone)]
pub struct InputRecord {
    pub kind: EventKind,
    pub x: f32,
    pub y: f32,
    /// Kind-specific parameter. See [`PRESS_BIT`].
    pub param: u32,
    /// Opaque host data, passed through untouched.
    pub payload: Option<Rc<dyn Any>>,
    pub timestamp: u32,
}

impl InputRecord {
    /// Create a record with no parameter, payload, or timestamp.
    pub fn new(kind: EventKind, x: f32, y: f32) -> Self {
        Self {
            kind,
            x,
            y,
            param: 0,
            payload: None,
            timestamp: 0,
        }
    }

    /// A click press at (x, y).
    pub fn press(x: f32, y: f32) -> Self {
        Self::new(EventKind::Click, x, y).with_param(PRESS_BIT)
    }

    /// A click release at (x, y).
    pub fn release(x: f32, y: f32) -> Self {
        Self::new(EventKind::Click, x, y)
    }

    /// A hover enter (`true`) or leave (`false`) at (x, y).
    pub fn hover(x: f32, y: f32, inside: bool) -> Self {
        Self::new(EventKind::Hover, x, y).with_param(inside as u32)
    }

    /// A key press carrying `code` in the low bits.
    pub fn key_press(code: u32) -> Self {
        Self::new(EventKind::Key, 0.0, 0.0).with_param(PRESS_BIT | code)
    }

    /// A timer tick.
    pub fn timer(timestamp: u32) -> Self {
        Self::new(EventKind::Timer, 0.0, 0.0).with_timestamp(timestamp)
    }

    /// Set the parameter (builder).
    pub fn with_param(mut self, param: u32) -> Self {
        self.param = param;
        self
    }

    /// Set the opaque payload (builder).
    pub fn with_payload(mut self, payload: Rc<dyn Any>) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Set the timestamp (builder).
    pub fn with_timestamp(mut self, timestamp: u32) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Whether the press bit is set.
    pub fn is_press(&self) -> bool {
        self.param & PRESS_BIT != 0
    }

    /// The parameter with the press bit stripped.
    pub fn code(&self) -> u32 {
        self.param & !PRESS_BIT
    }

    /// Try to view the payload as a concrete type.
    pub fn payload<T: 'static>(&self) -> Option<&T> {
        self.payload.as_deref().and_then(|p| p.downcast_ref::<T>())
    }
}

impl fmt::Debug for InputRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputRecord")
            .field("kind", &self.kind)
            .field("x", &self.x)
            .field("y", &self.y)
            .field("param", &format_args!("{:#010x}", self.param))
            .field("has_payload", &self.payload.is_some())
            .field("timestamp", &self.timestamp)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// crossterm conversion
// ---------------------------------------------------------------------------

#[cfg(feature = "crossterm")]
impl InputRecord {
    /// Convert a terminal event. Cell coordinates are used as-is.
    ///
    /// Returns `None` for events with no counterpart (resize, paste).
    pub fn from_crossterm(event: crossterm::event::Event) -> Option<Self> {
        use crossterm::event::Event;
        match event {
            Event::Mouse(me) => Some(Self::from(me)),
            Event::Key(ke) => Some(Self::from(ke)),
            Event::FocusGained => Some(Self::new(EventKind::Focus, 0.0, 0.0)),
            Event::FocusLost => Some(Self::new(EventKind::Blur, 0.0, 0.0)),
            _ => None,
        }
    }
}

#[cfg(feature = "crossterm")]
impl From<crossterm::event::MouseEvent> for InputRecord {
    fn from(me: crossterm::event::MouseEvent) -> Self {
        use crossterm::event::MouseEventKind;
        let (x, y) = (me.column as f32, me.row as f32);
        match me.kind {
            MouseEventKind::Down(_) => Self::press(x, y),
            MouseEventKind::Up(_) => Self::release(x, y),
            MouseEventKind::Drag(_) => Self::new(EventKind::Touch, x, y),
            MouseEventKind::Moved => Self::hover(x, y, true),
            MouseEventKind::ScrollUp => Self::new(EventKind::Scroll, x, y).with_param(0),
            MouseEventKind::ScrollDown => Self::new(EventKind::Scroll, x, y).with_param(1),
            MouseEventKind::ScrollLeft => Self::new(EventKind::Scroll, x, y).with_param(2),
            MouseEventKind::ScrollRight => Self::new(EventKind::Scroll, x, y).with_param(3),
        }
    }
}

#[cfg(feature = "crossterm")]
impl From<crossterm::event::KeyEvent> for InputRecord {
    fn from(ke: crossterm::event::KeyEvent) -> Self {
        use crossterm::event::{KeyCode, KeyEventKind};
        let code = match ke.code {
            KeyCode::Char(c) => c as u32,
            KeyCode::Backspace => keys::BACKSPACE,
            KeyCode::Tab => keys::TAB,
            KeyCode::Enter => keys::ENTER,
            KeyCode::Esc => keys::ESCAPE,
            KeyCode::Delete => keys::DELETE,
            _ => 0,
        };
        let press = match ke.kind {
            KeyEventKind::Release => 0,
            KeyEventKind::Press | KeyEventKind::Repeat => PRESS_BIT,
        };
        Self::new(EventKind::Key, 0.0, 0.0).with_param(press | code)
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_and_release_bits() {
        assert!(InputRecord::press(1.0, 2.0).is_press());
        assert!(!InputRecord::release(1.0, 2.0).is_press());
        let key = InputRecord::key_press(65);
        assert!(key.is_press());
        assert_eq!(key.code(), 65);
    }

    #[test]
    fn hover_param() {
        assert_eq!(InputRecord::hover(0.0, 0.0, true).param, 1);
        assert_eq!(InputRecord::hover(0.0, 0.0, false).param, 0);
    }

    #[test]
    fn payload_downcast() {
        let rec = InputRecord::new(EventKind::Custom, 0.0, 0.0).with_payload(Rc::new(42u16));
        assert_eq!(rec.payload::<u16>(), Some(&42));
        assert_eq!(rec.payload::<u32>(), None);
    }

    #[test]
    fn debug_shows_hex_param() {
        let rec = InputRecord::press(0.0, 0.0);
        assert!(format!("{rec:?}").contains("0x80000000"));
    }

    #[cfg(feature = "crossterm")]
    #[test]
    fn crossterm_mouse_down_is_press() {
        use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
        let me = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 3,
            row: 4,
            modifiers: KeyModifiers::NONE,
        };
        let rec = InputRecord::from(me);
        assert_eq!(rec.kind, EventKind::Click);
        assert!(rec.is_press());
        assert_eq!((rec.x, rec.y), (3.0, 4.0));
    }

    #[cfg(feature = "crossterm")]
    #[test]
    fn crossterm_key_enter() {
        use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
        let rec = InputRecord::from(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        assert!(rec.is_press());
        assert_eq!(rec.code(), keys::ENTER);
    }
}
