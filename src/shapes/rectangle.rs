use glam::Vec2;

use crate::color::Color;
use crate::entity::{
    ClickBehavior, Clickable, Drag, DrawContext, Entity, EntityNode, FrameContext, drive_drag,
};
use crate::errors::Result;
use crate::geometry::{Rect, Scale, WindowSize};

/// Area in pixels after moving its center onto `origin`.
pub(crate) fn centered_on(area_px: Rect, origin: Vec2) -> Rect {
    area_px.with_position(origin - area_px.size() / 2.0)
}

/// Outline of a rectangular area.
#[derive(Debug)]
pub struct Rectangle {
    node: EntityNode,
    pub area: Rect,
    pub color: Color,
    click: ClickBehavior,
}

impl Rectangle {
    #[must_use]
    pub fn new(area: Rect, color: Color) -> Self {
        Self::with_scale(area, color, Scale::RelativeToScreen)
    }

    #[must_use]
    pub fn with_scale(area: Rect, color: Color, scale: Scale) -> Self {
        Self {
            node: EntityNode::with_scale(scale),
            area,
            color,
            click: ClickBehavior::new(),
        }
    }

    #[must_use]
    pub fn with_drag(mut self, drag: Drag) -> Self {
        self.click.traits.drag = drag;
        self
    }

    /// Never claims clicks; used for decorative parts of composites.
    #[must_use]
    pub fn non_interactive(mut self) -> Self {
        self.click.traits.interactive = false;
        self
    }

    #[must_use]
    pub fn absolute_area(&self, window: WindowSize) -> Rect {
        self.node.to_absolute_area(self.area, window)
    }
}

impl Entity for Rectangle {
    entity_node!();
    clickable_view!();

    fn update(&mut self, ctx: &FrameContext<'_>) -> Result<()> {
        drive_drag(self, ctx.input, ctx.window);
        self.node.update_children(ctx)
    }

    fn draw(&mut self, ctx: &mut DrawContext<'_>) -> Result<()> {
        let area = self.absolute_area(ctx.window);
        ctx.renderer.set_draw_color(self.color);
        ctx.renderer.draw_rect(area);
        self.node.draw_children(ctx)
    }
}

impl Clickable for Rectangle {
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

/// Solid rectangular area.
#[derive(Debug)]
pub struct FillRectangle {
    node: EntityNode,
    pub area: Rect,
    pub color: Color,
    click: ClickBehavior,
}

impl FillRectangle {
    #[must_use]
    pub fn new(area: Rect, color: Color) -> Self {
        Self::with_scale(area, color, Scale::RelativeToScreen)
    }

    #[must_use]
    pub fn with_scale(area: Rect, color: Color, scale: Scale) -> Self {
        Self {
            node: EntityNode::with_scale(scale),
            area,
            color,
            click: ClickBehavior::new(),
        }
    }

    #[must_use]
    pub fn with_drag(mut self, drag: Drag) -> Self {
        self.click.traits.drag = drag;
        self
    }

    #[must_use]
    pub fn non_interactive(mut self) -> Self {
        self.click.traits.interactive = false;
        self
    }

    #[must_use]
    pub fn absolute_area(&self, window: WindowSize) -> Rect {
        self.node.to_absolute_area(self.area, window)
    }
}

impl Entity for FillRectangle {
    entity_node!();
    clickable_view!();

    fn update(&mut self, ctx: &FrameContext<'_>) -> Result<()> {
        drive_drag(self, ctx.input, ctx.window);
        self.node.update_children(ctx)
    }

    fn draw(&mut self, ctx: &mut DrawContext<'_>) -> Result<()> {
        let area = self.absolute_area(ctx.window);
        ctx.renderer.set_draw_color(self.color);
        ctx.renderer.fill_rect(area);
        self.node.draw_children(ctx)
    }
}

impl Clickable for FillRectangle {
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
