//! Reference-counted cache of rendered text.
//!
//! Each distinct [`TextKey`] is rasterized and uploaded once. Entities hold a
//! [`TextLease`] per key they display; the entry stays alive while at least one
//! lease exists and is evicted when the last one is dropped.
//!
//! Eviction cannot destroy the texture on the spot because dropping a lease
//! has no renderer at hand. Evicted textures are parked in a retired list and
//! destroyed by [`TextCache::collect_garbage`], which the scene manager calls
//! once per frame after presenting.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::assets::font::TextRasterizer;
use crate::color::Color;
use crate::errors::Result;
use crate::render::{Renderer, TextureId};

/// Structural identity of a rendered string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextKey {
    pub text: String,
    pub font: String,
    pub size: u32,
    pub color: Color,
}

impl TextKey {
    #[must_use]
    pub fn new(text: impl Into<String>, font: impl Into<String>, size: u32, color: Color) -> Self {
        Self {
            text: text.into(),
            font: font.into(),
            size,
            color,
        }
    }
}

struct TextEntry {
    texture: TextureId,
    width: u32,
    height: u32,
    refs: u32,
}

struct CacheState {
    entries: FxHashMap<TextKey, TextEntry>,
    retired: Vec<TextureId>,
    rasterizer: Box<dyn TextRasterizer>,
}

/// Shared handle to the text cache. Clones refer to the same cache.
#[derive(Clone)]
pub struct TextCache {
    state: Rc<RefCell<CacheState>>,
}

impl TextCache {
    pub fn new(rasterizer: impl TextRasterizer + 'static) -> Self {
        Self {
            state: Rc::new(RefCell::new(CacheState {
                entries: FxHashMap::default(),
                retired: Vec::new(),
                rasterizer: Box::new(rasterizer),
            })),
        }
    }

    /// Returns a lease on the texture for `key`, rendering it on first use.
    ///
    /// Every lease counts as one reference; the entry lives until all leases
    /// for the key are dropped.
    pub fn acquire(&self, key: TextKey, renderer: &mut dyn Renderer) -> Result<TextLease> {
        let mut state = self.state.borrow_mut();
        let state = &mut *state;

        let (texture, width, height) = if let Some(entry) = state.entries.get_mut(&key) {
            entry.refs += 1;
            (entry.texture, entry.width, entry.height)
        } else {
            let bitmap = state
                .rasterizer
                .rasterize(&key.font, key.size, &key.text, key.color)?;
            let texture = renderer.create_texture(&bitmap)?;
            let (width, height) = bitmap.dimensions();
            log::debug!("Text cache: created '{}' ({width}x{height})", key.text);

            state.entries.insert(
                key.clone(),
                TextEntry {
                    texture,
                    width,
                    height,
                    refs: 1,
                },
            );
            (texture, width, height)
        };

        Ok(TextLease {
            cache: self.clone(),
            key,
            texture,
            width,
            height,
        })
    }

    /// Pixel size of `text` rendered with `font` at `size`.
    ///
    /// Answered from a live entry when one exists; otherwise computed by the
    /// rasterizer without creating an entry.
    pub fn measure(&self, font: &str, size: u32, text: &str) -> Result<(u32, u32)> {
        let mut state = self.state.borrow_mut();
        let cached = state
            .entries
            .iter()
            .find(|(k, _)| k.size == size && k.font == font && k.text == text)
            .map(|(_, entry)| (entry.width, entry.height));

        match cached {
            Some(dims) => Ok(dims),
            None => state.rasterizer.measure(font, size, text),
        }
    }

    /// Destroys the textures of evicted entries. Returns how many were freed.
    pub fn collect_garbage(&self, renderer: &mut dyn Renderer) -> usize {
        let retired = std::mem::take(&mut self.state.borrow_mut().retired);
        for &texture in &retired {
            renderer.destroy_texture(texture);
        }
        retired.len()
    }

    /// Destroys every texture, live or retired. Outstanding leases become inert.
    pub fn clear(&self, renderer: &mut dyn Renderer) {
        let mut state = self.state.borrow_mut();
        for (_, entry) in state.entries.drain() {
            renderer.destroy_texture(entry.texture);
        }
        for texture in state.retired.drain(..) {
            renderer.destroy_texture(texture);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.state.borrow().entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn contains(&self, key: &TextKey) -> bool {
        self.state.borrow().entries.contains_key(key)
    }

    /// Live reference count of `key`, zero when absent.
    #[must_use]
    pub fn ref_count(&self, key: &TextKey) -> u32 {
        self.state.borrow().entries.get(key).map_or(0, |e| e.refs)
    }

    #[must_use]
    pub fn retired_count(&self) -> usize {
        self.state.borrow().retired.len()
    }

    fn release(&self, key: &TextKey, texture: TextureId) {
        let mut state = self.state.borrow_mut();
        // A lease that outlived `clear` must not touch a newer entry for its key.
        let evict = match state.entries.get_mut(key) {
            Some(entry) if entry.texture == texture => {
                entry.refs = entry.refs.saturating_sub(1);
                entry.refs == 0
            }
            _ => false,
        };

        if evict && let Some(entry) = state.entries.remove(key) {
            log::debug!("Text cache: evicted '{}'", key.text);
            state.retired.push(entry.texture);
        }
    }
}

impl fmt::Debug for TextCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("TextCache")
            .field("entries", &state.entries.len())
            .field("retired", &state.retired.len())
            .finish_non_exhaustive()
    }
}

/// One reference to a cached text texture. Dropping it releases the reference.
pub struct TextLease {
    cache: TextCache,
    key: TextKey,
    texture: TextureId,
    width: u32,
    height: u32,
}

impl TextLease {
    #[must_use]
    pub fn key(&self) -> &TextKey {
        &self.key
    }

    #[must_use]
    pub fn texture(&self) -> TextureId {
        self.texture
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }
}

impl Drop for TextLease {
    fn drop(&mut self) {
        self.cache.release(&self.key, self.texture);
    }
}

impl fmt::Debug for TextLease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextLease")
            .field("key", &self.key)
            .field("texture", &self.texture)
            .field("size", &(self.width, self.height))
            .finish_non_exhaustive()
    }
}
