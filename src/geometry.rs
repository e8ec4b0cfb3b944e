//! Geometric primitives and coordinate spaces.
//!
//! Positions are plain [`glam::Vec2`] values (re-exported as [`Point`]). Their
//! meaning depends on the owning entity's [`Scale`]:
//!
//! - [`Scale::RelativeToScreen`]: components are fractions of the window size in
//!   `[0, 1]`, and a [`Rect`] is described by its **center** plus size.
//! - [`Scale::AbsoluteInPixels`]: components are pixels, and a [`Rect`] is
//!   described by its **top-left corner** plus size.
//!
//! Every conversion between the two spaces goes through [`Scale`], so the
//! center/corner asymmetry is handled in exactly one place.

use std::fmt;

pub use glam::Vec2 as Point;
use glam::Vec2;

/// Current window dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
}

impl WindowSize {
    #[inline]
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    #[must_use]
    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

impl From<(u32, u32)> for WindowSize {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(width, height)
    }
}

/// A floating-point rectangle.
///
/// Whether `(x, y)` is the center or the top-left corner depends on the
/// [`Scale`] it is interpreted with; see the module documentation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    #[must_use]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    /// Center of a top-left rectangle.
    #[inline]
    #[must_use]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Returns the same rectangle moved so that `(x, y)` equals `position`.
    #[inline]
    #[must_use]
    pub fn with_position(self, position: Vec2) -> Self {
        Self {
            x: position.x,
            y: position.y,
            ..self
        }
    }

    /// Inclusive containment test for a top-left rectangle.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.w
            && point.y >= self.y
            && point.y <= self.y + self.h
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({};{};{};{})", self.x, self.y, self.w, self.h)
    }
}

/// How an entity's points and rectangles map onto the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Scale {
    /// Raw pixel coordinates; rectangles are anchored at their top-left corner.
    AbsoluteInPixels,
    /// Fractions of the window size; rectangles are anchored at their center.
    #[default]
    RelativeToScreen,
}

impl Scale {
    /// Converts a point in this space to window pixels.
    #[must_use]
    pub fn to_absolute_point(self, point: Vec2, window: WindowSize) -> Vec2 {
        match self {
            Self::AbsoluteInPixels => point,
            Self::RelativeToScreen => point * window.as_vec2(),
        }
    }

    /// Converts a window-pixel point into this space.
    ///
    /// A zero-sized window dimension maps to `0.0` rather than producing NaN.
    #[must_use]
    pub fn to_relative_point(self, point: Vec2, window: WindowSize) -> Vec2 {
        match self {
            Self::AbsoluteInPixels => point,
            Self::RelativeToScreen => {
                let size = window.as_vec2();
                Vec2::new(safe_div(point.x, size.x), safe_div(point.y, size.y))
            }
        }
    }

    /// Converts a length along the x axis (radii, thicknesses) to pixels.
    #[must_use]
    pub fn to_absolute_length(self, length: f32, window: WindowSize) -> f32 {
        match self {
            Self::AbsoluteInPixels => length,
            Self::RelativeToScreen => length * window.width as f32,
        }
    }

    /// Converts an area in this space into a top-left pixel rectangle.
    #[must_use]
    pub fn to_absolute_area(self, area: Rect, window: WindowSize) -> Rect {
        match self {
            Self::AbsoluteInPixels => area,
            Self::RelativeToScreen => {
                let size = window.as_vec2();
                Rect::new(
                    (area.x - area.w / 2.0) * size.x,
                    (area.y - area.h / 2.0) * size.y,
                    area.w * size.x,
                    area.h * size.y,
                )
            }
        }
    }

    /// Converts a top-left pixel rectangle into an area in this space.
    #[must_use]
    pub fn to_relative_area(self, area: Rect, window: WindowSize) -> Rect {
        match self {
            Self::AbsoluteInPixels => area,
            Self::RelativeToScreen => {
                let size = window.as_vec2();
                let w = safe_div(area.w, size.x);
                let h = safe_div(area.h, size.y);
                Rect::new(
                    safe_div(area.x, size.x) + w / 2.0,
                    safe_div(area.y, size.y) + h / 2.0,
                    w,
                    h,
                )
            }
        }
    }
}

#[inline]
fn safe_div(value: f32, extent: f32) -> f32 {
    if extent == 0.0 { 0.0 } else { value / extent }
}
