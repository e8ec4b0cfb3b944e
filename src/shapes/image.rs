use glam::Vec2;

use crate::entity::{
    ClickBehavior, Clickable, Drag, DrawContext, Entity, EntityNode, FrameContext, drive_drag,
};
use crate::errors::Result;
use crate::geometry::{Rect, Scale, WindowSize};
use crate::render::TextureParams;
use crate::shapes::rectangle::centered_on;

/// An image file stretched over an area.
///
/// The texture is loaded through the shared image cache on first draw.
/// Rotation turns the image around the center of its area; the hit test
/// ignores rotation and uses the unrotated area.
#[derive(Debug)]
pub struct Image {
    node: EntityNode,
    pub area: Rect,
    pub path: String,
    /// Opacity, `0xFF` is fully opaque.
    pub alpha: u8,
    /// Clockwise rotation in degrees.
    pub angle: f64,
    click: ClickBehavior,
}

impl Image {
    #[must_use]
    pub fn new(area: Rect, path: impl Into<String>) -> Self {
        Self {
            node: EntityNode::new(),
            area,
            path: path.into(),
            alpha: 0xFF,
            angle: 0.0,
            click: ClickBehavior::new(),
        }
    }

    #[must_use]
    pub fn with_scale(mut self, scale: Scale) -> Self {
        self.node.traits.scale = scale;
        self
    }

    #[must_use]
    pub fn with_alpha(mut self, alpha: u8) -> Self {
        self.alpha = alpha;
        self
    }

    #[must_use]
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    #[must_use]
    pub fn with_drag(mut self, drag: Drag) -> Self {
        self.click.traits.drag = drag;
        self
    }

    #[must_use]
    pub fn absolute_area(&self, window: WindowSize) -> Rect {
        self.node.to_absolute_area(self.area, window)
    }
}

impl Entity for Image {
    entity_node!();
    clickable_view!();

    fn update(&mut self, ctx: &FrameContext<'_>) -> Result<()> {
        drive_drag(self, ctx.input, ctx.window);
        self.node.update_children(ctx)
    }

    fn draw(&mut self, ctx: &mut DrawContext<'_>) -> Result<()> {
        let texture = ctx.resources.images().texture(&self.path, ctx.renderer)?;
        let params = TextureParams {
            angle: self.angle,
            alpha: self.alpha,
        };
        ctx.renderer
            .draw_texture(texture, self.absolute_area(ctx.window), params)?;
        self.node.draw_children(ctx)
    }
}

impl Clickable for Image {
    click_behavior!();

    fn contains(&self, point: Vec2, window: WindowSize) -> bool {
        self.absolute_area(window).contains(point)
    }

    fn drag_origin(&self, window: WindowSize) -> Vec2 {
        self.absolute_area(window).center()
    }

    fn drag_to(&mut self, origin: Vec2, window: WindowSize) {
        let moved = centered_on(self.absolute_area(window), origin);
        self.area = self.node.to_relative_area(moved, window);
    }
}
