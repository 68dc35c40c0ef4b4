//! Packed RGBA colors.
//!
//! Colors are stored as `0xRRGGBBAA`. An alpha of zero is the "unset" sentinel:
//! a node whose text color has alpha 0 inherits from its nearest ancestor that
//! has one set. [`Color::UNSET`] is therefore distinct from [`Color::BLACK`].

use std::fmt;

/// A packed `0xRRGGBBAA` color.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    /// Alpha 0: not set, inherit from the parent.
    pub const UNSET: Color = Color(0);
    /// Fully transparent. Shares its representation with [`Color::UNSET`].
    pub const TRANSPARENT: Color = Color(0);
    /// Opaque black, the fallback text color.
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Build a color from its four channels.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | a as u32)
    }

    /// Build an opaque color.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn a(self) -> u8 {
        self.0 as u8
    }

    /// Whether this color carries a value (alpha != 0).
    #[inline]
    pub const fn is_set(self) -> bool {
        self.a() != 0
    }

    /// Shift the RGB channels by `delta`, saturating at 0 and 255. Alpha is kept.
    pub fn tint(self, delta: i16) -> Color {
        let shift = |c: u8| (c as i16 + delta).clamp(0, 255) as u8;
        Color::rgba(shift(self.r()), shift(self.g()), shift(self.b()), self.a())
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08x}", self.0)
    }
}

impl From<u32> for Color {
    fn from(value: u32) -> Self {
        Color(value)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
