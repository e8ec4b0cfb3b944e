use std::f32::consts::{PI, TAU};

use glam::Vec2;

use crate::color::Color;
use crate::entity::{
    ClickBehavior, Clickable, Drag, DrawContext, Entity, EntityNode, FrameContext, drive_drag,
};
use crate::errors::Result;
use crate::geometry::{Scale, WindowSize};
use crate::shapes::Line;

/// Side count used when none is given.
pub const DEFAULT_SIDES: u32 = 10;

/// Side count for a circle of `radius_px` pixels when sides are derived.
#[must_use]
pub fn derived_side_count(radius_px: f32) -> u32 {
    ((PI * radius_px).round() as u32).max(3)
}

/// Circle outline approximated by a regular polygon.
///
/// The polygon is made of `Line` children keyed `("side", i)`. With
/// `sides == 0` the count follows the drawn radius (about `π·r` sides), so the
/// children are rebuilt whenever the window size changes the count.
#[derive(Debug)]
pub struct Circle {
    node: EntityNode,
    pub center: Vec2,
    /// Radius; in relative mode a fraction of the window width.
    pub radius: f32,
    pub color: Color,
    sides: u32,
    built_sides: u32,
    click: ClickBehavior,
}

impl Circle {
    #[must_use]
    pub fn new(center: Vec2, radius: f32, color: Color) -> Self {
        Self::with_sides(center, radius, color, DEFAULT_SIDES)
    }

    #[must_use]
    pub fn with_sides(center: Vec2, radius: f32, color: Color, sides: u32) -> Self {
        Self {
            node: EntityNode::new(),
            center,
            radius,
            color,
            sides,
            built_sides: 0,
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

    /// Requested side count, `0` meaning derived from the radius.
    #[must_use]
    pub fn sides(&self) -> u32 {
        self.sides
    }

    /// Number of segments drawn for the given window.
    #[must_use]
    pub fn side_count(&self, window: WindowSize) -> u32 {
        if self.sides > 0 {
            self.sides
        } else {
            derived_side_count(self.radius_px(window))
        }
    }

    fn radius_px(&self, window: WindowSize) -> f32 {
        self.node.to_absolute_length(self.radius, window)
    }

    /// Replaces the `("side", i)` children; other children are left alone.
    fn build_sides(&mut self, count: u32) -> Result<()> {
        for i in 0..self.built_sides as usize {
            self.node.remove_child(("side", i))?;
        }
        self.built_sides = 0;
        for i in 0..count as usize {
            let side = Line::with_scale(Vec2::ZERO, Vec2::ZERO, self.color, Scale::AbsoluteInPixels);
            self.node.add_child(("side", i), side)?;
        }
        self.built_sides = count;
        Ok(())
    }
}

impl Entity for Circle {
    entity_node!();
    clickable_view!();

    fn init(&mut self) -> Result<()> {
        if self.sides > 0 {
            self.build_sides(self.sides)?;
        }
        Ok(())
    }

    fn update(&mut self, ctx: &FrameContext<'_>) -> Result<()> {
        drive_drag(self, ctx.input, ctx.window);
        self.node.update_children(ctx)
    }

    fn draw(&mut self, ctx: &mut DrawContext<'_>) -> Result<()> {
        let count = self.side_count(ctx.window);
        if count != self.built_sides {
            self.build_sides(count)?;
        }

        let center = self.node.to_absolute_point(self.center, ctx.window);
        let radius = self.radius_px(ctx.window);
        let step = TAU / count as f32;
        let vertex = |i: u32| center + Vec2::from_angle(step * i as f32) * radius;

        for i in 0..count {
            let side = self.node.typed_child_mut::<Line>(("side", i as usize))?;
            side.set_points(vertex(i), vertex(i + 1));
            side.color = self.color;
        }

        self.node.draw_children(ctx)
    }

    fn dispose(&mut self) {
        self.node.dispose_children();
        self.built_sides = 0;
    }
}

impl Clickable for Circle {
    click_behavior!();

    fn contains(&self, point: Vec2, window: WindowSize) -> bool {
        let center = self.node.to_absolute_point(self.center, window);
        center.distance_squared(point) <= self.radius_px(window).powi(2)
    }

    fn drag_origin(&self, window: WindowSize) -> Vec2 {
        self.node.to_absolute_point(self.center, window)
    }

    fn drag_to(&mut self, origin: Vec2, window: WindowSize) {
        self.center = self.node.to_relative_point(origin, window);
    }
}

/// Solid disc, rasterized as horizontal scanlines.
#[derive(Debug)]
pub struct FillCircle {
    node: EntityNode,
    pub center: Vec2,
    pub radius: f32,
    pub color: Color,
    click: ClickBehavior,
}

impl FillCircle {
    #[must_use]
    pub fn new(center: Vec2, radius: f32, color: Color) -> Self {
        Self {
            node: EntityNode::new(),
            center,
            radius,
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

    fn radius_px(&self, window: WindowSize) -> f32 {
        self.node.to_absolute_length(self.radius, window)
    }
}

impl Entity for FillCircle {
    entity_node!();
    clickable_view!();

    fn update(&mut self, ctx: &FrameContext<'_>) -> Result<()> {
        drive_drag(self, ctx.input, ctx.window);
        self.node.update_children(ctx)
    }

    fn draw(&mut self, ctx: &mut DrawContext<'_>) -> Result<()> {
        let center = self.node.to_absolute_point(self.center, ctx.window);
        let radius = self.radius_px(ctx.window);
        ctx.renderer.set_draw_color(self.color);

        let top = ((center.y - radius).ceil() as i64).max(0);
        let bottom = ((center.y + radius).floor() as i64).min(i64::from(ctx.window.height) - 1);
        for row in top..=bottom {
            let dy = row as f32 - center.y;
            let half = (radius * radius - dy * dy).max(0.0).sqrt();
            ctx.renderer.draw_line(
                Vec2::new(center.x - half, row as f32),
                Vec2::new(center.x + half, row as f32),
            );
        }

        self.node.draw_children(ctx)
    }
}

impl Clickable for FillCircle {
    click_behavior!();

    fn contains(&self, point: Vec2, window: WindowSize) -> bool {
        let center = self.node.to_absolute_point(self.center, window);
        center.distance_squared(point) <= self.radius_px(window).powi(2)
    }

    fn drag_origin(&self, window: WindowSize) -> Vec2 {
        self.node.to_absolute_point(self.center, window)
    }

    fn drag_to(&mut self, origin: Vec2, window: WindowSize) {
        self.center = self.node.to_relative_point(origin, window);
    }
}
