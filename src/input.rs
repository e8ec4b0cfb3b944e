//! Platform-agnostic input state.
//!
//! The platform layer translates native events into [`PlatformEvent`]s, and
//! the scene manager injects them here once per frame. Entities read this
//! state during `update` (drag handling is the main consumer).
//!
//! [`PlatformEvent`]: crate::platform::PlatformEvent

use glam::Vec2;
use rustc_hash::FxHashSet;

/// Keyboard key (platform-agnostic).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,

    Space,
    Enter,
    Escape,
    Backspace,
    Tab,
    Delete,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    Shift,
    Control,
    Alt,

    /// Any other key, identified by the platform's scan code.
    Other(u32),
}

/// Mouse button.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
    Other(u16),
}

/// Button or key state carried by an input event.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ButtonState {
    Pressed,
    Released,
}

/// Per-frame input snapshot.
#[derive(Debug, Clone, Default)]
pub struct Input {
    keys_held: FxHashSet<Key>,
    keys_pressed: FxHashSet<Key>,
    keys_released: FxHashSet<Key>,

    mouse_held: FxHashSet<MouseButton>,
    mouse_pressed: FxHashSet<MouseButton>,
    mouse_released: FxHashSet<MouseButton>,

    mouse_position: Vec2,
    screen_size: Vec2,
}

impl Input {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Injection (called by the scene manager) ==========

    /// Clears the pressed/released edges recorded during the previous frame.
    pub fn start_frame(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.mouse_pressed.clear();
        self.mouse_released.clear();
    }

    pub fn inject_key(&mut self, key: Key, state: ButtonState) {
        match state {
            ButtonState::Pressed => {
                if self.keys_held.insert(key) {
                    self.keys_pressed.insert(key);
                }
            }
            ButtonState::Released => {
                if self.keys_held.remove(&key) {
                    self.keys_released.insert(key);
                }
            }
        }
    }

    pub fn inject_mouse_button(&mut self, button: MouseButton, state: ButtonState) {
        match state {
            ButtonState::Pressed => {
                if self.mouse_held.insert(button) {
                    self.mouse_pressed.insert(button);
                }
            }
            ButtonState::Released => {
                if self.mouse_held.remove(&button) {
                    self.mouse_released.insert(button);
                }
            }
        }
    }

    pub fn inject_mouse_position(&mut self, position: Vec2) {
        self.mouse_position = position;
    }

    pub fn inject_resize(&mut self, width: u32, height: u32) {
        self.screen_size = Vec2::new(width as f32, height as f32);
    }

    // ========== Queries ==========

    #[must_use]
    pub fn is_key_held(&self, key: Key) -> bool {
        self.keys_held.contains(&key)
    }

    /// Whether the key went down during this frame.
    #[must_use]
    pub fn was_key_pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }

    #[must_use]
    pub fn was_key_released(&self, key: Key) -> bool {
        self.keys_released.contains(&key)
    }

    #[must_use]
    pub fn is_mouse_held(&self, button: MouseButton) -> bool {
        self.mouse_held.contains(&button)
    }

    /// Whether the button went down during this frame.
    #[must_use]
    pub fn was_mouse_pressed(&self, button: MouseButton) -> bool {
        self.mouse_pressed.contains(&button)
    }

    #[must_use]
    pub fn was_mouse_released(&self, button: MouseButton) -> bool {
        self.mouse_released.contains(&button)
    }

    /// Cursor position in window pixels.
    #[must_use]
    pub fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }

    #[must_use]
    pub fn screen_size(&self) -> Vec2 {
        self.screen_size
    }
}
