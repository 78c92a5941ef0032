//! Game state and core simulation types
//!
//! Everything one play session owns lives in `GameState`; the driver holds
//! it and nothing else mutates it.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::obstacle::{CycleSpawn, ObstacleCycle};
use super::pose::{PoseCode, PoseState};
use super::scoring::{Miss, ScoreCounter};
use super::speed::{self, SpeedRamp};
use crate::lane_center_x;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Title overlay, waiting for confirm
    StartScreen,
    /// Active gameplay
    Playing,
    /// Run ended (terminal)
    GameOver,
}

/// Things that happened during a tick, drained by the scene hand-off
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    SessionStarted,
    CycleStarted(CycleSpawn),
    PoseChanged(PoseCode),
    Scored { score: u32 },
    GameOver { score: u32, miss: Miss },
    QuitRequested,
}

/// The unicyclist
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// x = lateral, y = height, z = depth
    pub pos: Vec3,
    /// Units per second while a move key is held
    pub lateral_speed: f32,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec3::new(
                lane_center_x(tuning.player_start_lane, tuning.road_scale),
                tuning.player_height,
                tuning.player_depth,
            ),
            lateral_speed: speed::lateral_speed(
                tuning.road_scale,
                tuning.lane_crossing_secs,
                tuning.speed_start,
            ),
        }
    }

    /// Move sideways; `direction` is -1 (left) or +1 (right).
    ///
    /// Stays within the road edges.
    pub fn move_lateral(&mut self, direction: f32, dt: f32, road_scale: f32) {
        let road_right = crate::lane_width(road_scale) * crate::consts::LANE_COUNT as f32;
        self.pos.x = (self.pos.x + direction * self.lateral_speed * dt).clamp(0.0, road_right);
    }
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: SessionPhase,
    pub player: Player,
    pub pose: PoseState,
    pub cycle: ObstacleCycle,
    pub score: ScoreCounter,
    pub speed: SpeedRamp,
    /// Simulation tick counter (gameplay ticks only)
    pub time_ticks: u64,
    /// Quit was received; the driver should exit
    pub quit_requested: bool,
    /// Events produced since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new session on the start screen
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            phase: SessionPhase::StartScreen,
            player: Player::new(&tuning),
            pose: PoseState::default(),
            cycle: ObstacleCycle::new(seed, &tuning),
            score: ScoreCounter::default(),
            speed: SpeedRamp::new(tuning.speed_start, tuning.speed_step),
            time_ticks: 0,
            quit_requested: false,
            events: Vec::new(),
            tuning,
        }
    }

    /// START_SCREEN -> PLAYING; spawns the first cycle at the start speed
    pub fn on_start(&mut self) {
        if self.phase != SessionPhase::StartScreen {
            return;
        }
        self.phase = SessionPhase::Playing;
        log::info!("Session started (seed {})", self.seed);
        self.events.push(GameEvent::SessionStarted);
        self.events.push(GameEvent::PoseChanged(self.pose.code()));

        let spawn = self.cycle.spawn(self.speed.value(), &self.tuning);
        self.begin_cycle(spawn);
    }

    /// PLAYING -> GAME_OVER
    pub fn on_game_over(&mut self, miss: Miss) {
        if self.phase != SessionPhase::Playing {
            return;
        }
        self.phase = SessionPhase::GameOver;
        log::info!(
            "Game over after {} cycles: {:?}, score {}",
            self.cycle.cycle_index,
            miss,
            self.score.value()
        );
        self.events.push(GameEvent::GameOver {
            score: self.score.value(),
            miss,
        });
    }

    /// Adopt a freshly spawned cycle (speed-coupled player speed, event)
    pub fn begin_cycle(&mut self, spawn: CycleSpawn) {
        self.player.lateral_speed = spawn.lateral_speed;
        self.events.push(GameEvent::CycleStarted(spawn));
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_over(&self) -> bool {
        self.phase == SessionPhase::GameOver
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_waits_on_start_screen() {
        let state = GameState::new(1, Tuning::default());
        assert_eq!(state.phase, SessionPhase::StartScreen);
        assert_eq!(state.pose.code(), PoseCode::BOTH_DOWN);
        assert_eq!(state.player.pos.x, 3.0);
        assert_eq!(state.cycle.cycle_index, 0);
    }

    #[test]
    fn test_start_spawns_first_cycle_without_ramp() {
        let mut state = GameState::new(1, Tuning::default());
        state.on_start();
        assert_eq!(state.phase, SessionPhase::Playing);
        assert_eq!(state.cycle.cycle_index, 1);
        assert_eq!(state.speed.value(), state.tuning.speed_start);

        let events = state.drain_events();
        assert_eq!(events[0], GameEvent::SessionStarted);
        assert!(matches!(events.last(), Some(GameEvent::CycleStarted(_))));
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_start_is_ignored_once_playing() {
        let mut state = GameState::new(1, Tuning::default());
        state.on_start();
        state.on_start();
        assert_eq!(state.cycle.cycle_index, 1);
    }

    #[test]
    fn test_player_clamped_to_road() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        player.move_lateral(-1.0, 100.0, tuning.road_scale);
        assert_eq!(player.pos.x, 0.0);
        player.move_lateral(1.0, 100.0, tuning.road_scale);
        assert_eq!(player.pos.x, 6.0);
    }

    #[test]
    fn test_state_round_trip_preserves_rng() {
        let mut state = GameState::new(99, Tuning::default());
        state.on_start();

        let json = serde_json::to_string(&state).expect("serialize game state");
        let mut restored: GameState = serde_json::from_str(&json).expect("deserialize game state");

        for _ in 0..8 {
            let a = state.cycle.spawn(1.0, &state.tuning);
            let b = restored.cycle.spawn(1.0, &restored.tuning);
            assert_eq!(a.obstacle, b.obstacle);
        }
    }
}
