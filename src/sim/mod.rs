//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied frame delta only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod input;
pub mod obstacle;
pub mod pose;
pub mod scoring;
pub mod speed;
pub mod state;
pub mod tick;
pub mod travel;

pub use input::{GameKey, InputEvent, InputSnapshot};
pub use obstacle::{CycleSpawn, Lane, Obstacle, ObstacleCycle, WallTexture};
pub use pose::{ArmKey, ArmPosition, PoseCode, PoseState};
pub use scoring::{JudgmentWindow, Miss, ScoreCounter, Verdict, evaluate, judge};
pub use speed::SpeedRamp;
pub use state::{GameEvent, GameState, Player, SessionPhase};
pub use tick::{TickInput, tick};
pub use travel::LinearTravel;
