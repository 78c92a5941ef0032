//! Linear travel animator
//!
//! Mirror of the engine's fly-straight animator: moves a node from one point
//! to another over a fixed duration. Keeping our own copy lets the simulation
//! know wall depths without asking the renderer.

use glam::Vec3;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearTravel {
    pub from: Vec3,
    pub to: Vec3,
    pub duration_ms: f32,
    pub looping: bool,
    elapsed_ms: f32,
}

impl LinearTravel {
    pub fn new(from: Vec3, to: Vec3, duration_ms: f32, looping: bool) -> Self {
        Self {
            from,
            to,
            duration_ms: duration_ms.max(0.0),
            looping,
            elapsed_ms: 0.0,
        }
    }

    /// A finished travel resting at `pos` (placeholder before the first cycle)
    pub fn parked(pos: Vec3) -> Self {
        Self::new(pos, pos, 0.0, false)
    }

    /// Advance by `dt` seconds
    pub fn advance(&mut self, dt: f32) {
        self.elapsed_ms += dt * 1000.0;
        if self.looping && self.duration_ms > 0.0 {
            self.elapsed_ms %= self.duration_ms;
        } else if self.elapsed_ms > self.duration_ms {
            self.elapsed_ms = self.duration_ms;
        }
    }

    /// Progress in [0, 1]
    pub fn progress(&self) -> f32 {
        if self.duration_ms <= 0.0 {
            1.0
        } else {
            (self.elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
        }
    }

    pub fn position(&self) -> Vec3 {
        self.from.lerp(self.to, self.progress())
    }

    /// One-shot travels finish at their end point; looping ones never do
    pub fn has_finished(&self) -> bool {
        !self.looping && self.elapsed_ms >= self.duration_ms
    }
}
