use image::{Rgba, RgbaImage};
use rustc_hash::FxHashMap;

use crate::color::Color;
use crate::errors::{Result, SceneError};

/// Turns strings into bitmaps.
///
/// `font` is an opaque path resolved by the implementation and `size` is the
/// pixel height of the font.
pub trait TextRasterizer {
    /// Pixel size of the bitmap `rasterize` would produce.
    fn measure(&mut self, font: &str, size: u32, text: &str) -> Result<(u32, u32)>;

    fn rasterize(&mut self, font: &str, size: u32, text: &str, color: Color) -> Result<RgbaImage>;
}

/// [`TextRasterizer`] backed by `fontdue`.
///
/// Font files are read and parsed once per path and kept for the lifetime of
/// the rasterizer. Glyphs are laid out on a single line along the font's
/// baseline.
#[derive(Default)]
pub struct FontdueRasterizer {
    fonts: FxHashMap<String, fontdue::Font>,
}

impl FontdueRasterizer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an already loaded font under `path`.
    pub fn insert_font(&mut self, path: impl Into<String>, bytes: &[u8]) -> Result<()> {
        let path = path.into();
        let font = parse_font(&path, bytes)?;
        self.fonts.insert(path, font);
        Ok(())
    }

    #[must_use]
    pub fn font_count(&self) -> usize {
        self.fonts.len()
    }

    fn font(&mut self, path: &str) -> Result<&fontdue::Font> {
        if !self.fonts.contains_key(path) {
            let bytes = std::fs::read(path).map_err(|e| SceneError::InvalidFont {
                path: path.to_owned(),
                reason: e.to_string(),
            })?;
            let font = parse_font(path, &bytes)?;
            log::debug!("Loaded font '{path}'");
            self.fonts.insert(path.to_owned(), font);
        }

        self.fonts.get(path).ok_or_else(|| SceneError::InvalidFont {
            path: path.to_owned(),
            reason: "font was not retained".to_owned(),
        })
    }
}

impl TextRasterizer for FontdueRasterizer {
    fn measure(&mut self, font: &str, size: u32, text: &str) -> Result<(u32, u32)> {
        let font = self.font(font)?;
        let layout = LineLayout::new(font, size as f32, text);
        Ok((layout.width, layout.height))
    }

    fn rasterize(&mut self, font: &str, size: u32, text: &str, color: Color) -> Result<RgbaImage> {
        let font = self.font(font)?;
        let px = size as f32;
        let layout = LineLayout::new(font, px, text);
        let mut bitmap = RgbaImage::new(layout.width, layout.height);

        let mut pen = 0.0_f32;
        for ch in text.chars() {
            let (metrics, coverage) = font.rasterize(ch, px);
            let left = pen.round() as i64 + i64::from(metrics.xmin);
            let top = (layout.ascent - metrics.ymin as f32 - metrics.height as f32).round() as i64;

            for (row, line) in coverage.chunks(metrics.width.max(1)).enumerate() {
                for (col, &cov) in line.iter().enumerate() {
                    if cov == 0 {
                        continue;
                    }
                    let (x, y) = (left + col as i64, top + row as i64);
                    if x < 0 || y < 0 || x >= i64::from(layout.width) || y >= i64::from(layout.height) {
                        continue;
                    }
                    let alpha = (u16::from(cov) * u16::from(color.a) / 255) as u8;
                    let dst = bitmap.get_pixel_mut(x as u32, y as u32);
                    if alpha > dst[3] {
                        *dst = Rgba([color.r, color.g, color.b, alpha]);
                    }
                }
            }

            pen += metrics.advance_width;
        }

        Ok(bitmap)
    }
}

fn parse_font(path: &str, bytes: &[u8]) -> Result<fontdue::Font> {
    fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default()).map_err(|reason| {
        SceneError::InvalidFont {
            path: path.to_owned(),
            reason: reason.to_owned(),
        }
    })
}

struct LineLayout {
    width: u32,
    height: u32,
    ascent: f32,
}

impl LineLayout {
    fn new(font: &fontdue::Font, px: f32, text: &str) -> Self {
        let (ascent, descent) = font
            .horizontal_line_metrics(px)
            .map_or((px, 0.0), |m| (m.ascent, m.descent));
        let advance: f32 = text.chars().map(|ch| font.metrics(ch, px).advance_width).sum();

        Self {
            width: advance.ceil().max(0.0) as u32,
            height: (ascent - descent).ceil().max(0.0) as u32,
            ascent,
        }
    }
}
