//! Per-frame simulation tick
//!
//! Fixed order: input -> pose -> wall travel -> judgment -> cycle respawn.
//! Rendering reads the state and drained events afterwards.

use super::autopilot;
use super::pose::ArmKey;
use super::scoring::{JudgmentWindow, Verdict, judge};
use super::state::{GameEvent, GameState, SessionPhase};

/// Keys held for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    pub arm_left_up: bool,
    pub arm_left_down: bool,
    pub arm_right_up: bool,
    pub arm_right_down: bool,
    /// Start the session from the title overlay
    pub confirm: bool,
    pub quit: bool,
    /// Demo mode - the autopilot fills in the keys
    pub autopilot: bool,
}

impl TickInput {
    /// The arm key to apply per arm; up wins when both are held
    fn arm_keys(&self) -> [Option<ArmKey>; 2] {
        let left = if self.arm_left_up {
            Some(ArmKey::LeftUp)
        } else if self.arm_left_down {
            Some(ArmKey::LeftDown)
        } else {
            None
        };
        let right = if self.arm_right_up {
            Some(ArmKey::RightUp)
        } else if self.arm_right_down {
            Some(ArmKey::RightDown)
        } else {
            None
        };
        [left, right]
    }
}

/// Advance the session by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.quit {
        if !state.quit_requested {
            log::info!("Quit requested");
            state.quit_requested = true;
            state.events.push(GameEvent::QuitRequested);
        }
        return;
    }

    let mut input = input.clone();
    if input.autopilot {
        autopilot::steer(state, &mut input, dt);
    }
    let input = &input;

    match state.phase {
        SessionPhase::StartScreen => {
            if input.confirm {
                state.on_start();
            }
            return;
        }
        SessionPhase::GameOver => return,
        SessionPhase::Playing => {}
    }

    state.time_ticks += 1;

    // Sideways movement; left wins when both are held
    if input.move_left {
        state.player.move_lateral(-1.0, dt, state.tuning.road_scale);
    } else if input.move_right {
        state.player.move_lateral(1.0, dt, state.tuning.road_scale);
    }

    for key in input.arm_keys().into_iter().flatten() {
        if let Some(code) = state.pose.on_arm_key(key) {
            log::debug!("Pose -> {} ({})", code.code(), code.frame_range_id());
            state.events.push(GameEvent::PoseChanged(code));
        }
    }

    let prev_depth = state.cycle.lead_depth();
    state.cycle.advance_walls(dt);

    // Judge before respawning: a fast wall can cross the window and finish
    // its travel within the same tick
    let window = JudgmentWindow::from_tuning(&state.tuning);
    if window.reached(prev_depth, state.cycle.lead_depth()) {
        judge_cycle(state);
        if state.phase != SessionPhase::Playing {
            return;
        }
    }

    if let Some(spawn) = state.cycle.tick(&mut state.speed, &state.tuning) {
        state.begin_cycle(spawn);
    }
}

/// Run the once-per-cycle check and apply its outcome
fn judge_cycle(state: &mut GameState) {
    let obstacle = state.cycle.obstacle;
    let verdict = judge(
        &mut state.cycle.checked,
        state.player.pos.x,
        state.pose.code(),
        &obstacle,
        &state.tuning,
    );
    match verdict {
        Some(Verdict::Pass) => {
            let score = state.score.add_point();
            log::debug!("Cycle {} passed, score {}", state.cycle.cycle_index, score);
            state.events.push(GameEvent::Scored { score });
        }
        Some(Verdict::Fail(miss)) => state.on_game_over(miss),
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::obstacle::{Lane, Obstacle};
    use crate::sim::pose::PoseCode;
    use crate::tuning::Tuning;

    fn playing(seed: u64) -> GameState {
        let mut state = GameState::new(seed, Tuning::default());
        tick(
            &mut state,
            &TickInput {
                confirm: true,
                ..Default::default()
            },
            SIM_DT,
        );
        assert_eq!(state.phase, SessionPhase::Playing);
        state
    }

    fn run_until_judged(state: &mut GameState, input: &TickInput) {
        for _ in 0..10_000 {
            tick(state, input, SIM_DT);
            if state.cycle.checked {
                return;
            }
        }
        panic!("cycle was never judged");
    }

    #[test]
    fn test_start_screen_waits_for_confirm() {
        let mut state = GameState::new(5, Tuning::default());
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, SessionPhase::StartScreen);
        assert_eq!(state.cycle.cycle_index, 0);
    }

    #[test]
    fn test_quit_stops_processing() {
        let mut state = playing(5);
        let input = TickInput {
            quit: true,
            move_left: true,
            ..Default::default()
        };
        let x = state.player.pos.x;
        tick(&mut state, &input, SIM_DT);
        assert!(state.quit_requested);
        assert_eq!(state.player.pos.x, x);
    }

    #[test]
    fn test_pass_scores_once() {
        let mut state = playing(5);
        state.cycle.obstacle = Obstacle::new(Lane::Middle, PoseCode::BOTH_DOWN);
        run_until_judged(&mut state, &TickInput::default());
        assert_eq!(state.score.value(), 1);

        // Remaining ticks of the same cycle never score again
        while state.cycle.cycle_index == 1 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.score.value(), 1);
        assert_eq!(state.phase, SessionPhase::Playing);
    }

    #[test]
    fn test_wrong_pose_ends_game() {
        let mut state = playing(5);
        state.cycle.obstacle = Obstacle::new(Lane::Middle, PoseCode::BOTH_UP);
        run_until_judged(&mut state, &TickInput::default());
        assert_eq!(state.phase, SessionPhase::GameOver);

        // Terminal: further ticks change nothing
        let ticks = state.time_ticks;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn test_arm_keys_change_pose() {
        let mut state = playing(5);
        state.drain_events();
        let input = TickInput {
            arm_left_up: true,
            arm_right_up: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.pose.code(), PoseCode::BOTH_UP);
        let changes = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::PoseChanged(_)))
            .count();
        assert_eq!(changes, 2);
    }

    #[test]
    fn test_movement_uses_lateral_speed() {
        let mut state = playing(5);
        let x = state.player.pos.x;
        let speed = state.player.lateral_speed;
        tick(
            &mut state,
            &TickInput {
                move_right: true,
                ..Default::default()
            },
            0.1,
        );
        assert!((state.player.pos.x - (x + speed * 0.1)).abs() < 1e-5);
    }

    #[test]
    fn test_cycle_completion_ramps_speed() {
        let mut state = playing(5);
        state.cycle.obstacle = Obstacle::new(Lane::Middle, PoseCode::BOTH_DOWN);
        let before = state.speed.value();
        let before_lateral = state.player.lateral_speed;
        while state.cycle.cycle_index == 1 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.speed.value(), before + state.tuning.speed_step);
        assert!(state.player.lateral_speed > before_lateral);
        assert!(!state.cycle.checked);
    }

    #[test]
    fn test_autopilot_survives_several_cycles() {
        let mut state = GameState::new(2024, Tuning::default());
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        while state.cycle.cycle_index <= 5 {
            tick(&mut state, &input, SIM_DT);
            assert_ne!(state.phase, SessionPhase::GameOver);
        }
        assert_eq!(state.score.value(), 5);
    }
}
