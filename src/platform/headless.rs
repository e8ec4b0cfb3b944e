use std::collections::VecDeque;

use glam::Vec2;

use crate::errors::Result;
use crate::geometry::WindowSize;
use crate::platform::{Platform, PlatformEvent};

/// A [`Platform`] without a window.
///
/// Events are scripted frame by frame: each call to [`push_frame`] queues a
/// batch that is handed out during one frame's polling pass. Once the script
/// runs out the platform reports [`PlatformEvent::Quit`]. Mouse button events
/// also move the virtual cursor to their position. Time only moves when
/// the frame loop calls [`Platform::delay`] or the host calls [`advance`].
///
/// [`push_frame`]: Self::push_frame
/// [`advance`]: Self::advance
#[derive(Debug, Default)]
pub struct HeadlessPlatform {
    frames: VecDeque<VecDeque<PlatformEvent>>,
    current: Option<VecDeque<PlatformEvent>>,
    size: WindowSize,
    mouse: Vec2,
    clock_ms: u64,
    delayed_ms: u64,
    window_title: Option<String>,
}

impl HeadlessPlatform {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: WindowSize::new(width, height),
            ..Self::default()
        }
    }

    /// Queues the events delivered during one future frame.
    pub fn push_frame(&mut self, events: impl IntoIterator<Item = PlatformEvent>) -> &mut Self {
        self.frames.push_back(events.into_iter().collect());
        self
    }

    /// Queues a frame without events.
    pub fn push_idle_frame(&mut self) -> &mut Self {
        self.push_frame(std::iter::empty())
    }

    pub fn set_mouse_position(&mut self, position: Vec2) {
        self.mouse = position;
    }

    /// Resizes the virtual window without emitting an event.
    pub fn set_window_size(&mut self, width: u32, height: u32) {
        self.size = WindowSize::new(width, height);
    }

    pub fn advance(&mut self, ms: u64) {
        self.clock_ms += ms;
    }

    /// Total time spent in [`Platform::delay`].
    #[must_use]
    pub fn delayed_ms(&self) -> u64 {
        self.delayed_ms
    }

    #[must_use]
    pub fn window_title(&self) -> Option<&str> {
        self.window_title.as_deref()
    }

    #[must_use]
    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }
}

impl Platform for HeadlessPlatform {
    fn create_window(&mut self, title: &str, width: u32, height: u32) -> Result<()> {
        log::info!("Headless window '{title}' ({width}x{height})");
        self.window_title = Some(title.to_owned());
        self.size = WindowSize::new(width, height);
        Ok(())
    }

    fn poll_event(&mut self) -> Option<PlatformEvent> {
        if self.current.is_none() {
            let next = self
                .frames
                .pop_front()
                .unwrap_or_else(|| VecDeque::from([PlatformEvent::Quit]));
            self.current = Some(next);
        }

        let event = self.current.as_mut().and_then(VecDeque::pop_front);
        if event.is_none() {
            // End of this frame's batch; the next poll starts a new frame.
            self.current = None;
        }
        match event {
            Some(PlatformEvent::WindowResized { width, height }) => {
                self.size = WindowSize::new(width, height);
            }
            Some(PlatformEvent::MouseDown { x, y, .. } | PlatformEvent::MouseUp { x, y, .. }) => {
                self.mouse = Vec2::new(x as f32, y as f32);
            }
            _ => {}
        }
        event
    }

    fn window_size(&self) -> WindowSize {
        self.size
    }

    fn mouse_position(&self) -> Vec2 {
        self.mouse
    }

    fn ticks(&self) -> u64 {
        self.clock_ms
    }

    fn delay(&mut self, ms: u64) {
        self.clock_ms += ms;
        self.delayed_ms += ms;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batches_are_separated_by_none() {
        let mut platform = HeadlessPlatform::new(100, 100);
        platform
            .push_frame([PlatformEvent::KeyDown { key: crate::input::Key::A }])
            .push_idle_frame();

        assert!(matches!(platform.poll_event(), Some(PlatformEvent::KeyDown { .. })));
        assert_eq!(platform.poll_event(), None);
        assert_eq!(platform.poll_event(), None);
        assert_eq!(platform.poll_event(), Some(PlatformEvent::Quit));
    }

    #[test]
    fn resize_event_updates_window_size() {
        let mut platform = HeadlessPlatform::new(100, 100);
        platform.push_frame([PlatformEvent::WindowResized { width: 300, height: 200 }]);

        platform.poll_event();
        assert_eq!(platform.window_size(), WindowSize::new(300, 200));
    }
}
