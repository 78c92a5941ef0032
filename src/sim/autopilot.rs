//! Demo mode: plays the game by steering toward the obstacle lane and
//! holding the pose painted on its wall.

use super::pose::ArmPosition;
use super::state::{GameState, SessionPhase};
use super::tick::TickInput;

/// Overwrite the movement/arm keys of `input` with the autopilot's choice
pub fn steer(state: &GameState, input: &mut TickInput, dt: f32) {
    match state.phase {
        SessionPhase::StartScreen => {
            input.confirm = true;
            return;
        }
        SessionPhase::GameOver => return,
        SessionPhase::Playing => {}
    }

    let obstacle = &state.cycle.obstacle;
    let target_x = obstacle.lane.center_x(state.tuning.road_scale);
    let dx = target_x - state.player.pos.x;

    // Stop once another step would overshoot by more than it gains
    let step = state.player.lateral_speed * dt;
    input.move_left = dx < -step / 2.0;
    input.move_right = dx > step / 2.0;

    let (left, right) = obstacle.shape.arms();
    input.arm_left_up = left == ArmPosition::Up;
    input.arm_left_down = left == ArmPosition::Down;
    input.arm_right_up = right == ArmPosition::Up;
    input.arm_right_down = right == ArmPosition::Down;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::obstacle::{Lane, Obstacle};
    use crate::sim::pose::PoseCode;
    use crate::tuning::Tuning;

    #[test]
    fn test_confirms_on_start_screen() {
        let state = GameState::new(1, Tuning::default());
        let mut input = TickInput::default();
        steer(&state, &mut input, SIM_DT);
        assert!(input.confirm);
    }

    #[test]
    fn test_heads_for_obstacle_lane_with_matching_arms() {
        let mut state = GameState::new(1, Tuning::default());
        state.on_start();
        state.cycle.obstacle = Obstacle::new(Lane::Left, PoseCode::LEFT_UP_RIGHT_DOWN);

        let mut input = TickInput::default();
        steer(&state, &mut input, SIM_DT);
        assert!(input.move_left);
        assert!(!input.move_right);
        assert!(input.arm_left_up && !input.arm_left_down);
        assert!(input.arm_right_down && !input.arm_right_up);
    }

    #[test]
    fn test_holds_still_on_target() {
        let mut state = GameState::new(1, Tuning::default());
        state.on_start();
        state.cycle.obstacle = Obstacle::new(Lane::Middle, PoseCode::BOTH_DOWN);

        let mut input = TickInput::default();
        steer(&state, &mut input, SIM_DT);
        assert!(!input.move_left && !input.move_right);
    }
}
