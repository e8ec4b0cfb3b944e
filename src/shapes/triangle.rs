use glam::Vec2;

use crate::color::Color;
use crate::entity::{
    ClickBehavior, Clickable, Drag, DrawContext, Entity, EntityNode, FrameContext, drive_drag,
};
use crate::errors::Result;
use crate::geometry::{Scale, WindowSize};
use crate::shapes::Line;

/// Triangle outline made of three `Line` children keyed `("edge", i)`.
#[derive(Debug)]
pub struct Triangle {
    node: EntityNode,
    pub points: [Vec2; 3],
    pub color: Color,
    click: ClickBehavior,
}

impl Triangle {
    #[must_use]
    pub fn new(a: Vec2, b: Vec2, c: Vec2, color: Color) -> Self {
        Self {
            node: EntityNode::new(),
            points: [a, b, c],
            color,
            click: ClickBehavior::new(),
        }
    }

    #[must_use]
    pub fn with_scale(mut self, scale: Scale) -> Self {
        self.node.traits.scale = scale;
        self
    }

    #[must_use]
    pub fn with_drag(mut self, drag: Drag) -> Self {
        self.click.traits.drag = drag;
        self
    }

    #[must_use]
    pub fn absolute_points(&self, window: WindowSize) -> [Vec2; 3] {
        self.points.map(|p| self.node.to_absolute_point(p, window))
    }
}

/// Half-plane side of `p` relative to the edge `a -> b`.
fn edge_sign(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    (p.x - b.x) * (a.y - b.y) - (a.x - b.x) * (p.y - b.y)
}

/// A point is inside when the three edge signs are not mixed. Points on an
/// edge count as inside.
#[must_use]
pub fn triangle_contains([a, b, c]: [Vec2; 3], p: Vec2) -> bool {
    let signs = [edge_sign(p, a, b), edge_sign(p, b, c), edge_sign(p, c, a)];
    let negative = signs.iter().any(|&s| s < 0.0);
    let positive = signs.iter().any(|&s| s > 0.0);
    !(negative && positive)
}

impl Entity for Triangle {
    entity_node!();
    clickable_view!();

    fn init(&mut self) -> Result<()> {
        for i in 0..3_usize {
            let edge = Line::with_scale(Vec2::ZERO, Vec2::ZERO, self.color, Scale::AbsoluteInPixels);
            self.node.add_child(("edge", i), edge)?;
        }
        Ok(())
    }

    fn update(&mut self, ctx: &FrameContext<'_>) -> Result<()> {
        drive_drag(self, ctx.input, ctx.window);
        self.node.update_children(ctx)
    }

    fn draw(&mut self, ctx: &mut DrawContext<'_>) -> Result<()> {
        let vertices = self.absolute_points(ctx.window);
        for i in 0..3_usize {
            let edge = self.node.typed_child_mut::<Line>(("edge", i))?;
            edge.set_points(vertices[i], vertices[(i + 1) % 3]);
            edge.color = self.color;
        }
        self.node.draw_children(ctx)
    }
}

impl Clickable for Triangle {
    click_behavior!();

    fn contains(&self, point: Vec2, window: WindowSize) -> bool {
        triangle_contains(self.absolute_points(window), point)
    }

    /// The centroid.
    fn drag_origin(&self, window: WindowSize) -> Vec2 {
        let [a, b, c] = self.absolute_points(window);
        (a + b + c) / 3.0
    }

    fn drag_to(&mut self, origin: Vec2, window: WindowSize) {
        let delta = origin - self.drag_origin(window);
        let moved = self.absolute_points(window).map(|p| p + delta);
        self.points = moved.map(|p| self.node.to_relative_point(p, window));
    }
}
