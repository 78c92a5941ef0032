//! Speed ramp
//!
//! One scalar drives both the wall travel time and the player's sideways
//! speed, so difficulty scales both together.

use serde::{Deserialize, Serialize};

use crate::lane_width;

/// Next speed value after a completed cycle
#[inline]
pub fn advance(current: f32, step: f32) -> f32 {
    current + step.max(0.0)
}

/// Wall travel duration (ms); inversely proportional to speed
#[inline]
pub fn travel_duration_ms(base_travel_ms: f32, speed: f32) -> f32 {
    base_travel_ms / speed
}

/// Player lateral speed (units/s) keeping the lane crossing time at
/// `lane_crossing_secs / speed`
#[inline]
pub fn lateral_speed(road_scale: f32, lane_crossing_secs: f32, speed: f32) -> f32 {
    lane_width(road_scale) / (lane_crossing_secs / speed)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedRamp {
    value: f32,
    step: f32,
    /// Completed cycles (number of times the ramp advanced)
    steps_taken: u32,
}

impl SpeedRamp {
    pub fn new(start: f32, step: f32) -> Self {
        Self {
            value: start,
            step,
            steps_taken: 0,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn steps_taken(&self) -> u32 {
        self.steps_taken
    }

    pub fn advance(&mut self) -> f32 {
        self.value = advance(self.value, self.step);
        self.steps_taken += 1;
        self.value
    }
}
