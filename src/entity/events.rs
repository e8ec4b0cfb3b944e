//! Input notifications delivered to entities.
//!
//! The scene calls the `on_*` hooks of [`Entity`](super::Entity) directly while
//! walking the tree. Entities that are assembled rather than subclassed can
//! still react to input through the listener lists stored in [`EntityEvents`],
//! which the default hook implementations fire.

use glam::Vec2;

use crate::geometry::WindowSize;
use crate::input::{Key, MouseButton};
use crate::scene::Commands;

/// Mouse press or release at a window-pixel position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickArgs {
    pub position: Vec2,
    pub button: MouseButton,
}

impl ClickArgs {
    #[must_use]
    pub fn new(x: i32, y: i32, button: MouseButton) -> Self {
        Self {
            position: Vec2::new(x as f32, y as f32),
            button,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyArgs {
    pub key: Key,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeArgs {
    pub size: WindowSize,
}

pub type ClickHandler = Box<dyn FnMut(&ClickArgs, &mut Commands)>;
pub type KeyHandler = Box<dyn FnMut(&KeyArgs, &mut Commands)>;
pub type ResizeHandler = Box<dyn FnMut(&ResizeArgs, &mut Commands)>;

/// Listener lists for the non-click notifications of one entity.
#[derive(Default)]
pub struct EntityEvents {
    mouse_down: Vec<ClickHandler>,
    mouse_up: Vec<ClickHandler>,
    key_down: Vec<KeyHandler>,
    window_resized: Vec<ResizeHandler>,
}

impl EntityEvents {
    pub fn on_mouse_down(&mut self, handler: impl FnMut(&ClickArgs, &mut Commands) + 'static) {
        self.mouse_down.push(Box::new(handler));
    }

    pub fn on_mouse_up(&mut self, handler: impl FnMut(&ClickArgs, &mut Commands) + 'static) {
        self.mouse_up.push(Box::new(handler));
    }

    pub fn on_key_down(&mut self, handler: impl FnMut(&KeyArgs, &mut Commands) + 'static) {
        self.key_down.push(Box::new(handler));
    }

    pub fn on_window_resized(&mut self, handler: impl FnMut(&ResizeArgs, &mut Commands) + 'static) {
        self.window_resized.push(Box::new(handler));
    }

    pub fn fire_mouse_down(&mut self, args: &ClickArgs, commands: &mut Commands) {
        for handler in &mut self.mouse_down {
            handler(args, commands);
        }
    }

    pub fn fire_mouse_up(&mut self, args: &ClickArgs, commands: &mut Commands) {
        for handler in &mut self.mouse_up {
            handler(args, commands);
        }
    }

    pub fn fire_key_down(&mut self, args: &KeyArgs, commands: &mut Commands) {
        for handler in &mut self.key_down {
            handler(args, commands);
        }
    }

    pub fn fire_window_resized(&mut self, args: &ResizeArgs, commands: &mut Commands) {
        for handler in &mut self.window_resized {
            handler(args, commands);
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mouse_down.is_empty()
            && self.mouse_up.is_empty()
            && self.key_down.is_empty()
            && self.window_resized.is_empty()
    }
}

impl std::fmt::Debug for EntityEvents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityEvents")
            .field("mouse_down", &self.mouse_down.len())
            .field("mouse_up", &self.mouse_up.len())
            .field("key_down", &self.key_down.len())
            .field("window_resized", &self.window_resized.len())
            .finish()
    }
}
