//! Rendering collaborator interface.
//!
//! The scene graph never rasterizes anything itself. Every entity draws by
//! calling into a [`Renderer`], which wraps whatever native drawing layer the
//! host uses. [`Canvas`] is the bundled software implementation.
//!
//! All coordinates passed to a renderer are window pixels, and rectangles are
//! anchored at their top-left corner.

pub mod canvas;

pub use canvas::Canvas;

use glam::Vec2;
use image::RgbaImage;
use slotmap::new_key_type;

use crate::color::Color;
use crate::errors::Result;
use crate::geometry::Rect;

new_key_type! {
    /// Handle to a texture owned by a [`Renderer`].
    pub struct TextureId;
}

/// Per-draw texture modifiers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureParams {
    /// Clockwise rotation in degrees around the destination center.
    pub angle: f64,
    /// Alpha modulation, `0xFF` leaves the texture untouched.
    pub alpha: u8,
}

impl Default for TextureParams {
    fn default() -> Self {
        Self {
            angle: 0.0,
            alpha: 0xFF,
        }
    }
}

/// Drawing primitives consumed by entities.
pub trait Renderer {
    /// Sets the color used by `clear`, `draw_line`, `draw_rect` and `fill_rect`.
    fn set_draw_color(&mut self, color: Color);

    /// Fills the whole target with the current draw color.
    fn clear(&mut self);

    /// Makes the frame drawn so far visible.
    fn present(&mut self);

    fn draw_line(&mut self, from: Vec2, to: Vec2);

    /// Outlines a top-left pixel rectangle.
    fn draw_rect(&mut self, rect: Rect);

    /// Fills a top-left pixel rectangle.
    fn fill_rect(&mut self, rect: Rect);

    /// Uploads a bitmap and returns a handle to it.
    fn create_texture(&mut self, bitmap: &RgbaImage) -> Result<TextureId>;

    /// Releases a texture. Unknown handles are ignored.
    fn destroy_texture(&mut self, texture: TextureId);

    /// Draws a texture stretched over `dst`.
    ///
    /// Fails with [`SceneError::AlphaModUnsupported`] when `params.alpha` is
    /// not opaque and [`supports_alpha_mod`](Self::supports_alpha_mod) is false.
    ///
    /// [`SceneError::AlphaModUnsupported`]: crate::errors::SceneError::AlphaModUnsupported
    fn draw_texture(&mut self, texture: TextureId, dst: Rect, params: TextureParams) -> Result<()>;

    fn supports_alpha_mod(&self) -> bool {
        true
    }
}
