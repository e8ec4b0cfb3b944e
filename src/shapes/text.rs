use glam::Vec2;

use crate::assets::{Resources, TextKey, TextLease};
use crate::color::Color;
use crate::entity::{DrawContext, Entity, EntityNode};
use crate::errors::Result;
use crate::geometry::{Rect, Scale};
use crate::render::TextureParams;

/// A line of text centered on `location`.
///
/// The bitmap comes from the shared text cache. The entity holds one lease
/// for the key it last drew and swaps it when text, font, size or color
/// change. Disposing the entity returns the lease.
#[derive(Debug)]
pub struct TextEntity {
    node: EntityNode,
    text: String,
    font: String,
    size: u32,
    color: Color,
    pub location: Vec2,
    lease: Option<TextLease>,
}

impl TextEntity {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        font: impl Into<String>,
        size: u32,
        color: Color,
        location: Vec2,
    ) -> Self {
        Self {
            node: EntityNode::new(),
            text: text.into(),
            font: font.into(),
            size,
            color,
            location,
            lease: None,
        }
    }

    #[must_use]
    pub fn with_scale(mut self, scale: Scale) -> Self {
        self.node.traits.scale = scale;
        self
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn font(&self) -> &str {
        &self.font
    }

    #[must_use]
    pub fn size(&self) -> u32 {
        self.size
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn set_font(&mut self, font: impl Into<String>, size: u32) {
        self.font = font.into();
        self.size = size;
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    #[must_use]
    pub fn key(&self) -> TextKey {
        TextKey::new(self.text.as_str(), self.font.as_str(), self.size, self.color)
    }

    /// Pixel size of the rendered text, computed if it was never drawn.
    pub fn text_size(&self, resources: &Resources) -> Result<(u32, u32)> {
        resources.text().measure(&self.font, self.size, &self.text)
    }

    /// Whether the entity currently holds a cache reference.
    #[must_use]
    pub fn holds_texture(&self) -> bool {
        self.lease.is_some()
    }

    fn is_current(&self) -> bool {
        self.lease.as_ref().is_some_and(|lease| {
            let key = lease.key();
            key.text == self.text && key.font == self.font && key.size == self.size && key.color == self.color
        })
    }
}

impl Entity for TextEntity {
    entity_node!();

    fn draw(&mut self, ctx: &mut DrawContext<'_>) -> Result<()> {
        if !self.is_current() {
            let lease = ctx.resources.text().acquire(self.key(), ctx.renderer)?;
            self.lease = Some(lease);
        }

        if let Some(lease) = &self.lease {
            let center = self.node.to_absolute_point(self.location, ctx.window);
            let (w, h) = (lease.width() as f32, lease.height() as f32);
            let dst = Rect::new(center.x - w / 2.0, center.y - h / 2.0, w, h);
            ctx.renderer
                .draw_texture(lease.texture(), dst, TextureParams::default())?;
        }

        self.node.draw_children(ctx)
    }

    fn dispose(&mut self) {
        self.lease = None;
        self.node.dispose_children();
    }
}
