//! Windowing and event-source collaborator interface.
//!
//! The scene manager owns the frame loop but not the window. It talks to the
//! native layer through [`Platform`]: create the window, drain pending events,
//! query sizes and the cursor, and pace frames with a millisecond clock.
//!
//! - [`HeadlessPlatform`]: scripted events and a virtual clock, no window.
//! - [`winit`] (feature `winit`): translation of winit window events.

pub mod headless;
#[cfg(feature = "winit")]
pub mod winit;

pub use headless::HeadlessPlatform;

use glam::Vec2;

use crate::errors::Result;
use crate::geometry::WindowSize;
use crate::input::{Key, MouseButton};

/// A native event, already translated into engine types.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlatformEvent {
    Quit,
    MouseDown { x: i32, y: i32, button: MouseButton },
    MouseUp { x: i32, y: i32, button: MouseButton },
    KeyDown { key: Key },
    KeyUp { key: Key },
    WindowResized { width: u32, height: u32 },
}

/// Services the frame loop consumes from the native windowing layer.
pub trait Platform {
    /// Opens the window the frame loop will render into.
    fn create_window(&mut self, title: &str, width: u32, height: u32) -> Result<()>;

    /// Returns the next pending event without blocking.
    fn poll_event(&mut self) -> Option<PlatformEvent>;

    fn window_size(&self) -> WindowSize;

    /// Cursor position in window pixels.
    fn mouse_position(&self) -> Vec2;

    /// Milliseconds since the platform started.
    fn ticks(&self) -> u64;

    /// Blocks the calling thread for `ms` milliseconds.
    fn delay(&mut self, ms: u64);
}
