//! Software renderer.
//!
//! [`Canvas`] rasterizes into an in-memory [`RgbaImage`] back buffer and copies
//! it into a front buffer on [`present`](Renderer::present). It is used by the
//! test-suite and by hosts that composite the frame themselves (screenshots,
//! headless runs, blitting into a native surface).

use glam::Vec2;
use image::{Rgba, RgbaImage};
use slotmap::SlotMap;

use crate::color::Color;
use crate::errors::{Result, SceneError};
use crate::geometry::Rect;
use crate::render::{Renderer, TextureId, TextureParams};

pub struct Canvas {
    back: RgbaImage,
    front: RgbaImage,
    draw_color: Color,
    textures: SlotMap<TextureId, RgbaImage>,
    alpha_mod: bool,
    frames_presented: u64,
}

impl Canvas {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            back: RgbaImage::new(width, height),
            front: RgbaImage::new(width, height),
            draw_color: Color::BLACK,
            textures: SlotMap::with_key(),
            alpha_mod: true,
            frames_presented: 0,
        }
    }

    /// Makes the canvas behave like a renderer without alpha modulation.
    #[must_use]
    pub fn without_alpha_mod(mut self) -> Self {
        self.alpha_mod = false;
        self
    }

    /// Reallocates both buffers. Existing textures are kept.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.back = RgbaImage::new(width, height);
        self.front = RgbaImage::new(width, height);
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.back.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.back.height()
    }

    /// The last presented frame.
    #[must_use]
    pub fn frame(&self) -> &RgbaImage {
        &self.front
    }

    /// The frame currently being drawn.
    #[must_use]
    pub fn back_buffer(&self) -> &RgbaImage {
        &self.back
    }

    /// Reads a pixel from the back buffer.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        (x < self.back.width() && y < self.back.height())
            .then(|| (*self.back.get_pixel(x, y)).into())
    }

    #[must_use]
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    #[must_use]
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }
}

impl Renderer for Canvas {
    fn set_draw_color(&mut self, color: Color) {
        self.draw_color = color;
    }

    fn clear(&mut self) {
        let fill: Rgba<u8> = self.draw_color.into();
        for pixel in self.back.pixels_mut() {
            *pixel = fill;
        }
    }

    fn present(&mut self) {
        self.front.clone_from(&self.back);
        self.frames_presented += 1;
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2) {
        plot_line(&mut self.back, from, to, self.draw_color);
    }

    fn draw_rect(&mut self, rect: Rect) {
        let (x0, y0, x1, y1) = pixel_bounds(rect);
        if x1 <= x0 || y1 <= y0 {
            return;
        }
        let color = self.draw_color;
        let (left, top) = (x0 as f32, y0 as f32);
        let (right, bottom) = ((x1 - 1) as f32, (y1 - 1) as f32);
        let buf = &mut self.back;
        plot_line(buf, Vec2::new(left, top), Vec2::new(right, top), color);
        plot_line(buf, Vec2::new(left, bottom), Vec2::new(right, bottom), color);
        plot_line(buf, Vec2::new(left, top), Vec2::new(left, bottom), color);
        plot_line(buf, Vec2::new(right, top), Vec2::new(right, bottom), color);
    }

    fn fill_rect(&mut self, rect: Rect) {
        let (x0, y0, x1, y1) = pixel_bounds(rect);
        let color = self.draw_color;
        let (w, h) = (i64::from(self.back.width()), i64::from(self.back.height()));
        for y in y0.max(0)..y1.min(h) {
            for x in x0.max(0)..x1.min(w) {
                blend(&mut self.back, x, y, color);
            }
        }
    }

    fn create_texture(&mut self, bitmap: &RgbaImage) -> Result<TextureId> {
        Ok(self.textures.insert(bitmap.clone()))
    }

    fn destroy_texture(&mut self, texture: TextureId) {
        self.textures.remove(texture);
    }

    fn draw_texture(&mut self, texture: TextureId, dst: Rect, params: TextureParams) -> Result<()> {
        if params.alpha != 0xFF && !self.alpha_mod {
            return Err(SceneError::AlphaModUnsupported);
        }
        let source = self.textures.get(texture).ok_or(SceneError::UnknownTexture)?;
        blit(&mut self.back, source, dst, params);
        Ok(())
    }

    fn supports_alpha_mod(&self) -> bool {
        self.alpha_mod
    }
}

/// Rounds a top-left rectangle to pixel bounds `(x0, y0, x1, y1)`, end-exclusive.
fn pixel_bounds(rect: Rect) -> (i64, i64, i64, i64) {
    (
        rect.x.round() as i64,
        rect.y.round() as i64,
        (rect.x + rect.w).round() as i64,
        (rect.y + rect.h).round() as i64,
    )
}

/// Alpha-over composite of a single pixel. Out-of-bounds writes are dropped.
fn blend(buf: &mut RgbaImage, x: i64, y: i64, color: Color) {
    if x < 0 || y < 0 || x >= i64::from(buf.width()) || y >= i64::from(buf.height()) {
        return;
    }
    let dst = buf.get_pixel_mut(x as u32, y as u32);
    if color.a == 0xFF {
        *dst = color.into();
        return;
    }
    let a = f32::from(color.a) / 255.0;
    let inv = 1.0 - a;
    let Rgba([dr, dg, db, da]) = *dst;
    let mix = |s: u8, d: u8| (f32::from(s) * a + f32::from(d) * inv).round() as u8;
    *dst = Rgba([
        mix(color.r, dr),
        mix(color.g, dg),
        mix(color.b, db),
        (f32::from(color.a) + f32::from(da) * inv).round().min(255.0) as u8,
    ]);
}

// Bresenham, endpoints inclusive. Segments are clipped to a one-pixel margin
// around the buffer first so off-screen lengths cost nothing.
fn plot_line(buf: &mut RgbaImage, from: Vec2, to: Vec2, color: Color) {
    let bounds_min = Vec2::splat(-1.0);
    let bounds_max = Vec2::new(buf.width() as f32, buf.height() as f32);
    let inside = |p: Vec2| p.cmpge(bounds_min).all() && p.cmple(bounds_max).all();
    let (from, to) = if inside(from) && inside(to) {
        (from, to)
    } else {
        match clip_segment(from, to, bounds_min, bounds_max) {
            Some(segment) => segment,
            None => return,
        }
    };

    let (mut x0, mut y0) = (from.x.round() as i64, from.y.round() as i64);
    let (x1, y1) = (to.x.round() as i64, to.y.round() as i64);
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        blend(buf, x0, y0, color);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

/// Liang-Barsky clip of the segment `from..to` against the box `min..max`.
///
/// Parameters are solved in `f64`; far-away endpoints would otherwise lose
/// whole pixels to `f32` rounding.
fn clip_segment(from: Vec2, to: Vec2, min: Vec2, max: Vec2) -> Option<(Vec2, Vec2)> {
    let (fx, fy) = (f64::from(from.x), f64::from(from.y));
    let (dx, dy) = (f64::from(to.x) - fx, f64::from(to.y) - fy);
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    let edges = [
        (-dx, fx - f64::from(min.x)),
        (dx, f64::from(max.x) - fx),
        (-dy, fy - f64::from(min.y)),
        (dy, f64::from(max.y) - fy),
    ];
    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            t0 = t0.max(t);
        } else {
            t1 = t1.min(t);
        }
        if t0 > t1 {
            return None;
        }
    }
    let at = |t: f64| Vec2::new((fx + dx * t) as f32, (fy + dy * t) as f32);
    Some((at(t0), at(t1)))
}

/// Nearest-neighbour blit of `source` stretched over `dst`, rotated around the
/// center of `dst`.
fn blit(buf: &mut RgbaImage, source: &RgbaImage, dst: Rect, params: TextureParams) {
    if dst.w <= 0.0 || dst.h <= 0.0 || source.width() == 0 || source.height() == 0 {
        return;
    }
    let center = dst.center();
    let half = dst.size() / 2.0;
    let (sin, cos) = (params.angle.to_radians() as f32).sin_cos();
    let rotate = |v: Vec2, s: f32| Vec2::new(v.x * cos - v.y * s, v.x * s + v.y * cos);

    let corners = [
        Vec2::new(-half.x, -half.y),
        Vec2::new(half.x, -half.y),
        Vec2::new(half.x, half.y),
        Vec2::new(-half.x, half.y),
    ]
    .map(|c| rotate(c, sin) + center);
    let min = corners.iter().copied().fold(Vec2::splat(f32::MAX), Vec2::min);
    let max = corners.iter().copied().fold(Vec2::splat(f32::MIN), Vec2::max);

    let (tw, th) = (source.width(), source.height());
    let alpha = f32::from(params.alpha) / 255.0;
    let (bw, bh) = (i64::from(buf.width()), i64::from(buf.height()));
    let (x_start, x_end) = ((min.x.floor() as i64).max(0), (max.x.ceil() as i64).min(bw));
    let (y_start, y_end) = ((min.y.floor() as i64).max(0), (max.y.ceil() as i64).min(bh));
    for y in y_start..y_end {
        for x in x_start..x_end {
            let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - center;
            let local = rotate(p, -sin) + half;
            if local.x < 0.0 || local.y < 0.0 || local.x >= dst.w || local.y >= dst.h {
                continue;
            }
            let u = (((local.x / dst.w) * tw as f32) as u32).min(tw - 1);
            let v = (((local.y / dst.h) * th as f32) as u32).min(th - 1);
            let texel: Color = (*source.get_pixel(u, v)).into();
            let a = (f32::from(texel.a) * alpha).round() as u8;
            if a > 0 {
                blend(buf, x, y, texel.with_alpha(a));
            }
        }
    }
}
