//! Resource Caches
//!
//! [`Resources`] is the explicitly owned home of every cached GPU-side
//! resource the scene graph creates:
//!
//! - [`TextCache`]: rendered strings, reference-counted by the entities that
//!   display them and evicted when the last one lets go.
//! - [`ImageCache`]: image files, cached by path and kept until teardown.
//!
//! The scene manager owns one `Resources` value and lends it to entities
//! through [`DrawContext`](crate::entity::DrawContext).
//!
//! ```rust,ignore
//! let resources = Resources::with_rasterizer(FontdueRasterizer::new());
//! let lease = resources.text().acquire(key, &mut canvas)?;
//! canvas.draw_texture(lease.texture(), dst, TextureParams::default())?;
//! ```

pub mod font;
pub mod image_cache;
pub mod text_cache;

pub use font::{FontdueRasterizer, TextRasterizer};
pub use image_cache::ImageCache;
pub use text_cache::{TextCache, TextKey, TextLease};

use crate::render::Renderer;

#[derive(Debug)]
pub struct Resources {
    text: TextCache,
    images: ImageCache,
}

impl Default for Resources {
    fn default() -> Self {
        Self::with_rasterizer(FontdueRasterizer::new())
    }
}

impl Resources {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rasterizer(rasterizer: impl TextRasterizer + 'static) -> Self {
        Self {
            text: TextCache::new(rasterizer),
            images: ImageCache::new(),
        }
    }

    #[must_use]
    pub fn text(&self) -> &TextCache {
        &self.text
    }

    #[must_use]
    pub fn images(&self) -> &ImageCache {
        &self.images
    }

    /// Destroys textures evicted since the last call.
    pub fn collect_garbage(&self, renderer: &mut dyn Renderer) {
        let freed = self.text.collect_garbage(renderer);
        if freed > 0 {
            log::debug!("Freed {freed} text texture(s)");
        }
    }

    /// Destroys every cached texture.
    pub fn clear(&self, renderer: &mut dyn Renderer) {
        self.text.clear(renderer);
        self.images.clear(renderer);
    }
}
