//! Window and frame-loop configuration.
//!
//! ```rust,ignore
//! use scenery::{Color, SceneManager, Settings};
//!
//! let settings = Settings::default()
//!     .with_title("Demo")
//!     .with_size(800, 600)
//!     .with_target_fps(60);
//!
//! let mut manager = SceneManager::new(settings);
//! ```

use crate::color::Color;

/// Configuration consumed by [`SceneManager`](crate::scene::SceneManager).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Window title.
    pub title: String,
    /// Initial window width in pixels.
    pub width: u32,
    /// Initial window height in pixels.
    pub height: u32,
    /// Color the frame is cleared with before drawing.
    pub background: Color,
    /// Frames per second the loop paces itself to. `0` disables pacing.
    pub target_fps: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title: "Scene Displayer".to_owned(),
            width: 1000,
            height: 600,
            background: Color::rgb(32, 64, 128),
            target_fps: 120,
        }
    }
}

impl Settings {
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[must_use]
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    #[must_use]
    pub fn with_target_fps(mut self, fps: u32) -> Self {
        self.target_fps = fps;
        self
    }

    /// Milliseconds one frame may take, `0` when pacing is disabled.
    #[must_use]
    pub fn frame_budget_ms(&self) -> u64 {
        if self.target_fps == 0 {
            0
        } else {
            1000 / u64::from(self.target_fps)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = Settings::default();
        assert_eq!(settings.title, "Scene Displayer");
        assert_eq!((settings.width, settings.height), (1000, 600));
        assert_eq!(settings.background, Color::rgb(32, 64, 128));
        assert_eq!(settings.frame_budget_ms(), 8);
    }

    #[test]
    fn zero_fps_disables_pacing() {
        assert_eq!(Settings::default().with_target_fps(0).frame_budget_ms(), 0);
    }
}
