/// Frame-rate measurement over one-second windows.
///
/// Driven by the millisecond deltas of the frame loop rather than a wall
/// clock, so it follows whatever clock the platform provides.
#[derive(Debug, Default, Clone)]
pub struct FpsCounter {
    frame_count: u32,
    accumulated_ms: u64,
    pub current_fps: f32,
}

impl FpsCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one frame. Returns the new rate once per elapsed second.
    pub fn tick(&mut self, delta_ms: u64) -> Option<f32> {
        self.frame_count += 1;
        self.accumulated_ms += delta_ms;

        // Update statistics every 1 second (1000ms)
        if self.accumulated_ms >= 1000 {
            self.current_fps = self.frame_count as f32 * 1000.0 / self.accumulated_ms as f32;

            self.accumulated_ms = 0;
            self.frame_count = 0;

            return Some(self.current_fps);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_once_per_second() {
        let mut counter = FpsCounter::new();
        for _ in 0..9 {
            assert_eq!(counter.tick(100), None);
        }
        let fps = counter.tick(100).unwrap();
        assert!((fps - 10.0).abs() < f32::EPSILON);
        assert_eq!(counter.tick(100), None);
    }
}
