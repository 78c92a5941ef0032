//! Data-driven game balance
//!
//! Every gameplay constant lives here so a settings file can retune a run
//! without touching the simulation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Gameplay tuning knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Depth walls spawn at
    pub track_start_depth: f32,
    /// Depth walls stop at (end of a cycle)
    pub track_end_depth: f32,
    /// Wall travel duration at speed 1.0 (ms)
    pub base_travel_ms: f32,
    /// Speed scalar at session start
    pub speed_start: f32,
    /// Speed increment per completed cycle
    pub speed_step: f32,
    /// Seconds needed to cross one lane at speed 1.0
    pub lane_crossing_secs: f32,
    /// Road width multiplier
    pub road_scale: f32,
    /// Judgment window, near edge (exclusive)
    pub judgment_near: f32,
    /// Judgment window, far edge (exclusive)
    pub judgment_far: f32,
    /// Tolerance band around the lane center
    pub valid_window_length: f32,
    /// Player depth on the track
    pub player_depth: f32,
    /// Player height above the road
    pub player_height: f32,
    /// Lane the player starts in (0..=2)
    pub player_start_lane: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            track_start_depth: TRACK_START_DEPTH,
            track_end_depth: TRACK_END_DEPTH,
            base_travel_ms: BASE_TRAVEL_MS,
            speed_start: SPEED_START,
            speed_step: SPEED_STEP,
            lane_crossing_secs: LANE_CROSSING_SECS,
            road_scale: ROAD_SCALE,
            judgment_near: JUDGMENT_NEAR,
            judgment_far: JUDGMENT_FAR,
            valid_window_length: VALID_WINDOW_LENGTH,
            player_depth: PLAYER_DEPTH,
            player_height: PLAYER_HEIGHT,
            player_start_lane: 1,
        }
    }
}

/// Why a set of tuning knobs cannot describe a playable track
#[derive(Debug, Clone, PartialEq)]
pub enum TuningError {
    /// A knob that must be strictly positive was zero, negative or NaN
    NotPositive { field: &'static str, value: f32 },
    /// `speed_step` was negative or NaN; zero keeps the speed constant
    NegativeStep(f32),
    /// Walls would spawn at or behind the point where they stop
    TrackTooShort { start: f32, end: f32 },
    /// `judgment_near` is not in front of `judgment_far`
    InvertedWindow { near: f32, far: f32 },
    /// The judgment window reaches past either end of the track
    WindowOffTrack { near: f32, far: f32 },
    LaneOutOfRange(usize),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotPositive { field, value } => write!(f, "{field} must be positive, got {value}"),
            Self::NegativeStep(step) => write!(f, "speed_step must not be negative, got {step}"),
            Self::TrackTooShort { start, end } => {
                write!(f, "track_start_depth {start} must be beyond track_end_depth {end}")
            }
            Self::InvertedWindow { near, far } => {
                write!(f, "judgment window is inverted: ({near}, {far})")
            }
            Self::WindowOffTrack { near, far } => {
                write!(f, "judgment window ({near}, {far}) must lie on the track")
            }
            Self::LaneOutOfRange(lane) => {
                write!(f, "player_start_lane {lane} out of range (0..{LANE_COUNT})")
            }
        }
    }
}

impl std::error::Error for TuningError {}

impl Tuning {
    /// Check the knobs describe a playable track, stopping at the first problem
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("base_travel_ms", self.base_travel_ms),
            ("speed_start", self.speed_start),
            ("lane_crossing_secs", self.lane_crossing_secs),
            ("road_scale", self.road_scale),
            ("valid_window_length", self.valid_window_length),
        ];
        for (field, value) in positive {
            // Written as a negated comparison so NaN is rejected too
            if !(value > 0.0) {
                return Err(TuningError::NotPositive { field, value });
            }
        }
        if !(self.speed_step >= 0.0) {
            return Err(TuningError::NegativeStep(self.speed_step));
        }
        if !(self.track_start_depth > self.track_end_depth) {
            return Err(TuningError::TrackTooShort {
                start: self.track_start_depth,
                end: self.track_end_depth,
            });
        }
        let (near, far) = (self.judgment_near, self.judgment_far);
        if !(near < far) {
            return Err(TuningError::InvertedWindow { near, far });
        }
        if far > self.track_start_depth || near < self.track_end_depth {
            return Err(TuningError::WindowOffTrack { near, far });
        }
        if self.player_start_lane >= LANE_COUNT {
            return Err(TuningError::LaneOutOfRange(self.player_start_lane));
        }
        Ok(())
    }
}
