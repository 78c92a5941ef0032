//! Unicycle Odyssey - a three-lane wall-dodging arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (pose, obstacle cycles, scoring)
//! - `scene`: Hand-off to the external rendering/scene engine
//! - `hud`: Score digit breakdown for the glyph display
//! - `clock`: Frame delta and FPS tracking from the engine timer
//! - `script`: Scripted key input for the headless driver
//! - `tuning`: Data-driven game balance
//! - `settings`: Key bindings, asset table and tuning loaded from JSON

pub mod clock;
pub mod hud;
pub mod scene;
pub mod script;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::{Settings, SettingsError};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, matches the engine frame pacing)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Number of lanes on the road
    pub const LANE_COUNT: usize = 3;

    /// Walls spawn at the far end of the track...
    pub const TRACK_START_DEPTH: f32 = 24.0;
    /// ...and finish their travel at the near end
    pub const TRACK_END_DEPTH: f32 = 0.0;

    /// Wall travel duration at speed 1.0 (ms)
    pub const BASE_TRAVEL_MS: f32 = 4000.0;
    /// Speed scalar at session start
    pub const SPEED_START: f32 = 1.0;
    /// Speed added for every completed cycle
    pub const SPEED_STEP: f32 = 0.5;
    /// Time to cross one lane at speed 1.0 (seconds)
    pub const LANE_CROSSING_SECS: f32 = 0.4;

    /// Road width multiplier; lane centers sit at X = {1, 3, 5} * scale
    pub const ROAD_SCALE: f32 = 1.0;

    /// Judgment window (exclusive depth bounds)
    pub const JUDGMENT_NEAR: f32 = 3.3;
    pub const JUDGMENT_FAR: f32 = 4.0;
    /// Width around a lane center the player must be inside to pass
    pub const VALID_WINDOW_LENGTH: f32 = 1.0;

    /// Player sits at a fixed depth/height just in front of the window
    pub const PLAYER_DEPTH: f32 = 3.65;
    pub const PLAYER_HEIGHT: f32 = 0.0;

    /// Largest score the five-digit display can show
    pub const SCORE_DISPLAY_MAX: u32 = 99_999;
}

/// World X of a lane center for the given road scale
#[inline]
pub fn lane_center_x(lane_index: usize, road_scale: f32) -> f32 {
    (2 * lane_index + 1) as f32 * road_scale
}

/// Width of one lane for the given road scale
#[inline]
pub fn lane_width(road_scale: f32) -> f32 {
    2.0 * road_scale
}
