use std::cell::RefCell;
use std::path::Path;

use image::RgbaImage;
use rustc_hash::FxHashMap;

use crate::errors::{Result, SceneError};
use crate::render::{Renderer, TextureId};

#[derive(Debug, Clone, Copy)]
struct ImageEntry {
    texture: TextureId,
    width: u32,
    height: u32,
}

/// Image textures cached by path.
///
/// Entries are never evicted while the cache lives; images are expected to be
/// few and static. [`ImageCache::clear`] releases everything at teardown.
#[derive(Debug, Default)]
pub struct ImageCache {
    entries: RefCell<FxHashMap<String, ImageEntry>>,
}

impl ImageCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the texture for `path`, loading it on first use.
    pub fn texture(&self, path: &str, renderer: &mut dyn Renderer) -> Result<TextureId> {
        if let Some(entry) = self.entries.borrow().get(path) {
            return Ok(entry.texture);
        }

        let bitmap = load_rgba(path)?;
        self.insert(path, &bitmap, renderer)
    }

    /// Uploads an in-memory bitmap under `path`, replacing any previous one.
    pub fn insert(&self, path: &str, bitmap: &RgbaImage, renderer: &mut dyn Renderer) -> Result<TextureId> {
        let texture = renderer.create_texture(bitmap)?;
        let (width, height) = bitmap.dimensions();
        log::debug!("Image cache: loaded '{path}' ({width}x{height})");

        let previous = self.entries.borrow_mut().insert(
            path.to_owned(),
            ImageEntry {
                texture,
                width,
                height,
            },
        );
        if let Some(previous) = previous {
            renderer.destroy_texture(previous.texture);
        }
        Ok(texture)
    }

    /// Pixel size of a loaded image.
    #[must_use]
    pub fn dimensions(&self, path: &str) -> Option<(u32, u32)> {
        self.entries.borrow().get(path).map(|e| (e.width, e.height))
    }

    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.entries.borrow().contains_key(path)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self, renderer: &mut dyn Renderer) {
        for (_, entry) in self.entries.borrow_mut().drain() {
            renderer.destroy_texture(entry.texture);
        }
    }
}

fn load_rgba(path: &str) -> Result<RgbaImage> {
    if !Path::new(path).exists() {
        return Err(SceneError::TextureLoad {
            path: path.to_owned(),
            reason: "file not found".to_owned(),
        });
    }

    image::open(path)
        .map(|img| img.to_rgba8())
        .map_err(|e| SceneError::TextureLoad {
            path: path.to_owned(),
            reason: e.to_string(),
        })
}
