use std::str::FromStr;

use glam::Vec2;

use crate::color::Color;
use crate::entity::{
    ClickBehavior, Clickable, Drag, DrawContext, Entity, EntityNode, FrameContext, drive_drag,
};
use crate::errors::{Result, SceneError};
use crate::geometry::{Rect, Scale, WindowSize};
use crate::shapes::rectangle::centered_on;
use crate::shapes::{FillRectangle, Rectangle, TextEntity};

const BACKGROUND: &str = "background";
const BORDER: &str = "border";
const LABEL: &str = "label";

/// Horizontal placement of a label inside its area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextAlignment {
    #[default]
    Center,
    Left,
    Right,
}

impl TextAlignment {
    /// Pixel point the label should be centered on, given the pixel area and
    /// the rendered text size.
    #[must_use]
    pub fn label_location(self, area: Rect, text_size: (u32, u32)) -> Vec2 {
        let half_width = text_size.0 as f32 / 2.0;
        let center = area.center();
        match self {
            Self::Center => center,
            Self::Left => Vec2::new(area.x + half_width, center.y),
            Self::Right => Vec2::new(area.x + area.w - half_width, center.y),
        }
    }
}

impl FromStr for TextAlignment {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "center" => Ok(Self::Center),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            _ => Err(SceneError::UnsupportedAlignment(s.to_owned())),
        }
    }
}

/// Clickable area with a background, an optional border and a text label.
///
/// The parts are children keyed `"background"`, `"border"` and `"label"`.
/// They are non-interactive, so clicks inside the area are claimed by the
/// button itself. Mutators on the button push the new state straight into
/// the parts.
#[derive(Debug)]
pub struct Button {
    node: EntityNode,
    area: Rect,
    background: Color,
    border: Option<Color>,
    alignment: TextAlignment,
    text: String,
    font: String,
    font_size: u32,
    label_color: Color,
    click: ClickBehavior,
    initialized: bool,
}

impl Button {
    #[must_use]
    pub fn new(
        area: Rect,
        background: Color,
        alignment: TextAlignment,
        text: impl Into<String>,
        font: impl Into<String>,
        font_size: u32,
    ) -> Self {
        Self {
            node: EntityNode::new(),
            area,
            background,
            border: None,
            alignment,
            text: text.into(),
            font: font.into(),
            font_size,
            label_color: Color::BLACK,
            click: ClickBehavior::new(),
            initialized: false,
        }
    }

    #[must_use]
    pub fn with_scale(mut self, scale: Scale) -> Self {
        self.node.traits.scale = scale;
        self
    }

    #[must_use]
    pub fn with_border(mut self, color: Color) -> Self {
        self.border = Some(color);
        self
    }

    #[must_use]
    pub fn with_label_color(mut self, color: Color) -> Self {
        self.label_color = color;
        self
    }

    #[must_use]
    pub fn with_drag(mut self, drag: Drag) -> Self {
        self.click.traits.drag = drag;
        self
    }

    #[must_use]
    pub fn area(&self) -> Rect {
        self.area
    }

    #[must_use]
    pub fn background_color(&self) -> Color {
        self.background
    }

    #[must_use]
    pub fn alignment(&self) -> TextAlignment {
        self.alignment
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
    pub fn font_size(&self) -> u32 {
        self.font_size
    }

    #[must_use]
    pub fn absolute_area(&self, window: WindowSize) -> Rect {
        self.node.to_absolute_area(self.area, window)
    }

    pub fn set_area(&mut self, area: Rect) -> Result<()> {
        self.area = area;
        self.sync_parts()
    }

    pub fn set_background_color(&mut self, color: Color) -> Result<()> {
        self.background = color;
        self.sync_parts()
    }

    pub fn update_text(&mut self, text: impl Into<String>, font: impl Into<String>, font_size: u32) -> Result<()> {
        self.text = text.into();
        self.font = font.into();
        self.font_size = font_size;

        if self.initialized {
            let label = self.node.typed_child_mut::<TextEntity>(LABEL)?;
            label.set_text(self.text.as_str());
            label.set_font(self.font.as_str(), font_size);
        }
        Ok(())
    }

    fn sync_parts(&mut self) -> Result<()> {
        if !self.initialized {
            return Ok(());
        }

        let background = self.node.typed_child_mut::<FillRectangle>(BACKGROUND)?;
        background.area = self.area;
        background.color = self.background;

        if let Some(color) = self.border {
            let border = self.node.typed_child_mut::<Rectangle>(BORDER)?;
            border.area = self.area;
            border.color = color;
        }
        Ok(())
    }
}

impl Entity for Button {
    entity_node!();
    clickable_view!();

    fn init(&mut self) -> Result<()> {
        let scale = self.node.scale();

        let background = FillRectangle::with_scale(self.area, self.background, scale).non_interactive();
        self.node.add_child(BACKGROUND, background)?;

        if let Some(color) = self.border {
            let border = Rectangle::with_scale(self.area, color, scale).non_interactive();
            self.node.add_child(BORDER, border)?;
        }

        let label = TextEntity::new(
            self.text.as_str(),
            self.font.as_str(),
            self.font_size,
            self.label_color,
            Vec2::ZERO,
        )
        .with_scale(Scale::AbsoluteInPixels);
        self.node.add_child(LABEL, label)?;

        self.initialized = true;
        Ok(())
    }

    fn update(&mut self, ctx: &FrameContext<'_>) -> Result<()> {
        drive_drag(self, ctx.input, ctx.window);
        self.sync_parts()?;
        self.node.update_children(ctx)
    }

    fn draw(&mut self, ctx: &mut DrawContext<'_>) -> Result<()> {
        let area = self.absolute_area(ctx.window);
        let alignment = self.alignment;

        let label = self.node.typed_child_mut::<TextEntity>(LABEL)?;
        let text_size = match alignment {
            TextAlignment::Center => (0, 0),
            TextAlignment::Left | TextAlignment::Right => label.text_size(ctx.resources)?,
        };
        label.location = alignment.label_location(area, text_size);

        self.node.draw_children(ctx)
    }

    fn dispose(&mut self) {
        self.node.dispose_children();
        self.initialized = false;
    }
}

impl Clickable for Button {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_location_per_alignment() {
        let area = Rect::new(100.0, 50.0, 200.0, 40.0);
        let text = (60, 20);

        assert_eq!(TextAlignment::Center.label_location(area, text), Vec2::new(200.0, 70.0));
        assert_eq!(TextAlignment::Left.label_location(area, text), Vec2::new(130.0, 70.0));
        assert_eq!(TextAlignment::Right.label_location(area, text), Vec2::new(270.0, 70.0));
    }

    #[test]
    fn parse_alignment() {
        assert_eq!("Left".parse::<TextAlignment>().unwrap(), TextAlignment::Left);
        assert!(matches!(
            "justify".parse::<TextAlignment>(),
            Err(SceneError::UnsupportedAlignment(name)) if name == "justify"
        ));
    }
}
