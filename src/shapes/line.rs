use glam::Vec2;

use crate::color::Color;
use crate::entity::{DrawContext, Entity, EntityNode};
use crate::errors::Result;
use crate::geometry::Scale;

/// A single segment from `from` to `to`.
#[derive(Debug)]
pub struct Line {
    node: EntityNode,
    pub from: Vec2,
    pub to: Vec2,
    pub color: Color,
}

impl Line {
    #[must_use]
    pub fn new(from: Vec2, to: Vec2, color: Color) -> Self {
        Self::with_scale(from, to, color, Scale::RelativeToScreen)
    }

    #[must_use]
    pub fn with_scale(from: Vec2, to: Vec2, color: Color, scale: Scale) -> Self {
        Self {
            node: EntityNode::with_scale(scale),
            from,
            to,
            color,
        }
    }

    pub fn set_points(&mut self, from: Vec2, to: Vec2) {
        self.from = from;
        self.to = to;
    }
}

impl Entity for Line {
    entity_node!();

    fn draw(&mut self, ctx: &mut DrawContext<'_>) -> Result<()> {
        let from = self.node.to_absolute_point(self.from, ctx.window);
        let to = self.node.to_absolute_point(self.to, ctx.window);

        ctx.renderer.set_draw_color(self.color);
        ctx.renderer.draw_line(from, to);

        self.node.draw_children(ctx)
    }
}
