use std::fmt;

use image::Rgba;

/// An 8-bit RGBA color. Alpha defaults to opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const CYAN: Self = Self::rgb(0x00, 0xFF, 0xFF);
    pub const BLACK: Self = Self::rgb(0x00, 0x00, 0x00);
    pub const BLUE: Self = Self::rgb(0x00, 0x00, 0xFF);
    pub const MAGENTA: Self = Self::rgb(0xFF, 0x00, 0xFF);
    pub const GREY: Self = Self::rgb(0x80, 0x80, 0x80);
    pub const GREEN: Self = Self::rgb(0x00, 0x80, 0x00);
    pub const LIME: Self = Self::rgb(0x00, 0xFF, 0x00);
    pub const MAROON: Self = Self::rgb(0x80, 0x00, 0x00);
    pub const NAVY_BLUE: Self = Self::rgb(0x00, 0x00, 0x80);
    pub const OLIVE: Self = Self::rgb(0x80, 0x80, 0x00);
    pub const PURPLE: Self = Self::rgb(0x80, 0x00, 0x80);
    pub const RED: Self = Self::rgb(0xFF, 0x00, 0x00);
    pub const SILVER: Self = Self::rgb(0xC0, 0xC0, 0xC0);
    pub const TEAL: Self = Self::rgb(0x00, 0x80, 0x80);
    pub const WHITE: Self = Self::rgb(0xFF, 0xFF, 0xFF);
    pub const YELLOW: Self = Self::rgb(0xFF, 0xFF, 0x00);
    pub const ORANGE: Self = Self::rgb(0xFF, 0xA5, 0x00);
    pub const TRANSPARENT: Self = Self::rgba(0x00, 0x00, 0x00, 0x00);

    #[inline]
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }

    #[inline]
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<Color> for Rgba<u8> {
    fn from(c: Color) -> Self {
        Rgba([c.r, c.g, c.b, c.a])
    }
}

impl From<Rgba<u8>> for Color {
    fn from(Rgba([r, g, b, a]): Rgba<u8>) -> Self {
        Self { r, g, b, a }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({};{};{};{})", self.r, self.g, self.b, self.a)
    }
}
