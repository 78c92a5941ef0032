//! Frame timing
//!
//! Turns the engine's millisecond timer into per-frame deltas and keeps a
//! rolling FPS estimate for the window caption.

const FPS_WINDOW: usize = 60;

#[derive(Debug, Clone)]
pub struct FrameClock {
    then_ms: u32,
    // Timestamps of the last 60 frames (ring buffer)
    frame_times: [u32; FPS_WINDOW],
    frame_index: usize,
    frames_seen: usize,
    fps: u32,
    last_reported_fps: Option<u32>,
}

impl FrameClock {
    pub fn new(now_ms: u32) -> Self {
        Self {
            then_ms: now_ms,
            frame_times: [0; FPS_WINDOW],
            frame_index: 0,
            frames_seen: 0,
            fps: 0,
            last_reported_fps: None,
        }
    }

    /// Record a frame at `now_ms`; returns the delta since the previous
    /// frame in seconds
    pub fn frame(&mut self, now_ms: u32) -> f32 {
        let dt = now_ms.wrapping_sub(self.then_ms) as f32 / 1000.0;
        self.then_ms = now_ms;

        // Oldest entry is the one about to be overwritten
        let oldest = self.frame_times[self.frame_index];
        self.frame_times[self.frame_index] = now_ms;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;
        self.frames_seen += 1;

        if self.frames_seen > FPS_WINDOW {
            let elapsed = now_ms.wrapping_sub(oldest);
            if elapsed > 0 {
                self.fps = (FPS_WINDOW as f32 * 1000.0 / elapsed as f32).round() as u32;
            }
        }
        dt
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// New window caption, only when the FPS value changed since the last one
    pub fn caption_update(&mut self, title: &str, driver: &str) -> Option<String> {
        if self.last_reported_fps == Some(self.fps) {
            return None;
        }
        self.last_reported_fps = Some(self.fps);
        Some(format!("{} [{}] fps: {}", title, driver, self.fps))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_in_seconds() {
        let mut clock = FrameClock::new(1000);
        assert!((clock.frame(1016) - 0.016).abs() < 1e-6);
        assert!((clock.frame(1050) - 0.034).abs() < 1e-6);
    }

    #[test]
    fn test_fps_after_full_window() {
        let mut clock = FrameClock::new(0);
        for i in 1..=120u32 {
            clock.frame(i * 20);
        }
        assert_eq!(clock.fps(), 50);
    }

    #[test]
    fn test_caption_only_on_change() {
        let mut clock = FrameClock::new(0);
        assert_eq!(
            clock.caption_update("Unicycle Odyssey", "headless").as_deref(),
            Some("Unicycle Odyssey [headless] fps: 0")
        );
        assert!(clock.caption_update("Unicycle Odyssey", "headless").is_none());
    }
}
