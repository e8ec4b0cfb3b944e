//! Hit-testing and drag capability.
//!
//! Shapes that can be clicked implement [`Clickable`] next to [`Entity`] and
//! return themselves from [`Entity::as_clickable_mut`]. The click handlers,
//! the drag policy and the drag state live in a [`ClickBehavior`] value the
//! shape embeds.
//!
//! Dragging is a per-entity state machine advanced from the shape's `update`
//! through [`drive_drag`]:
//!
//! ```text
//!        left press inside            left button released
//! Idle ─────────────────────▶ Dragging ─────────────────────▶ Idle
//! ```
//!
//! Drags read the frame's input, not the click dispatch, so they ignore
//! claiming: a press over overlapping draggables starts a drag on each of
//! them, and a draggable under a button drags while the button is clicked.
//! Hosts that want a single target mark the lower shapes non-interactive.
//!
//! [`Entity`]: super::Entity
//! [`Entity::as_clickable_mut`]: super::Entity::as_clickable_mut

use glam::Vec2;

use crate::entity::events::{ClickArgs, ClickHandler};
use crate::geometry::WindowSize;
use crate::input::{Input, MouseButton};
use crate::scene::Commands;

/// How pointer motion while pressed moves the entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Drag {
    #[default]
    NotDraggable,
    /// Keeps the offset between the cursor and the entity at press time.
    Draggable,
    /// Snaps the entity's center onto the cursor.
    DraggableAtCenter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickableEntityTraits {
    pub drag: Drag,
    /// Non-interactive entities never claim clicks or start drags.
    pub interactive: bool,
}

impl Default for ClickableEntityTraits {
    fn default() -> Self {
        Self {
            drag: Drag::NotDraggable,
            interactive: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// `offset` is added to the cursor to obtain the entity's pixel center.
    Dragging { offset: Vec2 },
}

/// Click handlers, drag policy and drag state of one clickable entity.
#[derive(Default)]
pub struct ClickBehavior {
    pub traits: ClickableEntityTraits,
    handlers: Vec<ClickHandler>,
    drag_state: DragState,
}

impl ClickBehavior {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_drag(mut self, drag: Drag) -> Self {
        self.traits.drag = drag;
        self
    }

    #[must_use]
    pub fn non_interactive(mut self) -> Self {
        self.traits.interactive = false;
        self
    }

    pub fn add_handler(&mut self, handler: impl FnMut(&ClickArgs, &mut Commands) + 'static) {
        self.handlers.push(Box::new(handler));
    }

    pub fn fire(&mut self, args: &ClickArgs, commands: &mut Commands) {
        for handler in &mut self.handlers {
            handler(args, commands);
        }
    }

    #[must_use]
    pub fn drag_state(&self) -> DragState {
        self.drag_state
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.drag_state, DragState::Dragging { .. })
    }
}

impl std::fmt::Debug for ClickBehavior {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClickBehavior")
            .field("traits", &self.traits)
            .field("handlers", &self.handlers.len())
            .field("drag_state", &self.drag_state)
            .finish()
    }
}

/// Hit-testing capability.
pub trait Clickable {
    /// Whether the window-pixel `point` lies inside the shape.
    fn contains(&self, point: Vec2, window: WindowSize) -> bool;

    fn click_behavior(&self) -> &ClickBehavior;

    fn click_behavior_mut(&mut self) -> &mut ClickBehavior;

    fn on_click(&mut self, args: &ClickArgs, commands: &mut Commands) {
        self.click_behavior_mut().fire(args, commands);
    }

    fn clickable_traits(&self) -> ClickableEntityTraits {
        self.click_behavior().traits
    }

    /// Pixel point that follows the cursor while dragging, usually the center.
    fn drag_origin(&self, window: WindowSize) -> Vec2;

    /// Moves the shape so that its drag origin lands on the pixel `origin`.
    fn drag_to(&mut self, origin: Vec2, window: WindowSize);
}

/// Advances the drag state machine of `shape` for one frame.
pub fn drive_drag(shape: &mut dyn Clickable, input: &Input, window: WindowSize) {
    let traits = shape.clickable_traits();
    if traits.drag == Drag::NotDraggable || !traits.interactive {
        shape.click_behavior_mut().drag_state = DragState::Idle;
        return;
    }

    let cursor = input.mouse_position();
    match shape.click_behavior().drag_state {
        DragState::Idle => {
            if !input.was_mouse_pressed(MouseButton::Left) || !shape.contains(cursor, window) {
                return;
            }
            let offset = match traits.drag {
                Drag::DraggableAtCenter => Vec2::ZERO,
                _ => shape.drag_origin(window) - cursor,
            };
            log::trace!("Drag started at {cursor} (offset {offset})");
            shape.click_behavior_mut().drag_state = DragState::Dragging { offset };
            shape.drag_to(cursor + offset, window);
        }
        DragState::Dragging { offset } => {
            if input.is_mouse_held(MouseButton::Left) {
                shape.drag_to(cursor + offset, window);
            } else {
                log::trace!("Drag released at {cursor}");
                shape.click_behavior_mut().drag_state = DragState::Idle;
            }
        }
    }
}
