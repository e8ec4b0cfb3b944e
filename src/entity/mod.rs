//! Entity Tree
//!
//! Entities are the nodes of a scene. Each one owns an [`EntityNode`] holding
//! its keyed children, its [`EntityTraits`] and its listener lists, and
//! implements the [`Entity`] lifecycle:
//!
//! ```text
//! constructed ──attach──▶ init ──▶ (update, draw)* ──▶ dispose
//! ```
//!
//! - `init` runs exactly once, when the parent attaches the entity (or when
//!   the scene holding a root is initialized).
//! - `update` and `draw` run once per frame. The default implementations
//!   forward to the children in insertion order.
//! - `dispose` runs when the entity is removed, replaced, or its scene is torn
//!   down. The default implementation disposes all children.
//!
//! Hit-testing is an opt-in capability: entities implementing [`Clickable`]
//! expose it through [`Entity::as_clickable_mut`], which the scene queries
//! while dispatching clicks.

pub mod clickable;
pub mod events;
pub mod node;

pub use clickable::{ClickBehavior, Clickable, ClickableEntityTraits, Drag, DragState, drive_drag};
pub use events::{ClickArgs, EntityEvents, KeyArgs, ResizeArgs};
pub use node::{ChildKey, EntityNode, EntityTraits};

use std::any::Any;

use crate::assets::Resources;
use crate::errors::Result;
use crate::geometry::WindowSize;
use crate::input::Input;
use crate::render::Renderer;
use crate::scene::Commands;

/// Per-frame state handed to [`Entity::update`].
#[derive(Debug, Clone, Copy)]
pub struct FrameContext<'a> {
    pub window: WindowSize,
    /// Milliseconds since the previous frame.
    pub delta_ms: u64,
    pub input: &'a Input,
}

/// Per-frame state handed to [`Entity::draw`].
pub struct DrawContext<'a> {
    pub renderer: &'a mut dyn Renderer,
    pub resources: &'a Resources,
    pub window: WindowSize,
    pub delta_ms: u64,
}

/// A node of the scene tree.
pub trait Entity: Any {
    fn node(&self) -> &EntityNode;

    fn node_mut(&mut self) -> &mut EntityNode;

    /// Builds the entity's own subtree. Called once, at attach time.
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    fn update(&mut self, ctx: &FrameContext<'_>) -> Result<()> {
        self.node_mut().update_children(ctx)
    }

    /// Renders the entity. Callers skip entities whose
    /// [`is_drawn`](Self::is_drawn) is false.
    fn draw(&mut self, ctx: &mut DrawContext<'_>) -> Result<()> {
        self.node_mut().draw_children(ctx)
    }

    /// Releases children and any cached resources the entity holds.
    fn dispose(&mut self) {
        self.node_mut().dispose_children();
    }

    /// Whether the entity and its subtree take part in drawing and clicking.
    fn is_drawn(&self) -> bool {
        self.node().traits.visible
    }

    fn as_clickable(&self) -> Option<&dyn Clickable> {
        None
    }

    fn as_clickable_mut(&mut self) -> Option<&mut dyn Clickable> {
        None
    }

    fn on_mouse_down(&mut self, args: &ClickArgs, commands: &mut Commands) {
        self.node_mut().events.fire_mouse_down(args, commands);
    }

    fn on_mouse_up(&mut self, args: &ClickArgs, commands: &mut Commands) {
        self.node_mut().events.fire_mouse_up(args, commands);
    }

    fn on_key_down(&mut self, args: &KeyArgs, commands: &mut Commands) {
        self.node_mut().events.fire_key_down(args, commands);
    }

    fn on_window_resized(&mut self, args: &ResizeArgs, commands: &mut Commands) {
        self.node_mut().events.fire_window_resized(args, commands);
    }
}

/// A plain container with no drawing of its own.
#[derive(Debug, Default)]
pub struct Group {
    node: EntityNode,
}

impl Group {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Entity for Group {
    fn node(&self) -> &EntityNode {
        &self.node
    }

    fn node_mut(&mut self) -> &mut EntityNode {
        &mut self.node
    }
}
