//! Collision and scoring
//!
//! When the lead wall passes the judgment window the player is checked
//! against the obstacle once: right lane and matching pose scores a point,
//! anything else ends the run.

use serde::{Deserialize, Serialize};

use super::obstacle::Obstacle;
use super::pose::PoseCode;
use crate::tuning::Tuning;

/// Depth band where the check fires (both edges exclusive)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JudgmentWindow {
    pub near: f32,
    pub far: f32,
}

impl JudgmentWindow {
    pub fn new(near: f32, far: f32) -> Self {
        Self { near, far }
    }

    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self::new(tuning.judgment_near, tuning.judgment_far)
    }

    pub fn contains(&self, depth: f32) -> bool {
        depth > self.near && depth < self.far
    }

    /// True when the wall is inside the window, or jumped clean over it
    /// between `prev_depth` and `depth` (large frame steps at high speed).
    pub fn reached(&self, prev_depth: f32, depth: f32) -> bool {
        self.contains(depth) || (prev_depth >= self.far && depth <= self.near)
    }
}

/// Why a check failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Miss {
    WrongLane,
    WrongPose,
}

/// Outcome of one check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Pass,
    Fail(Miss),
}

/// Pure pass/fail rule.
///
/// The player passes when within `valid_window_length / 2` of the obstacle
/// lane's center and holding the pose shown on the wall.
pub fn evaluate(
    player_x: f32,
    pose: PoseCode,
    obstacle: &Obstacle,
    road_scale: f32,
    valid_window_length: f32,
) -> Verdict {
    let center = obstacle.lane.center_x(road_scale);
    if (player_x - center).abs() > valid_window_length / 2.0 {
        return Verdict::Fail(Miss::WrongLane);
    }
    if pose != obstacle.shape {
        return Verdict::Fail(Miss::WrongPose);
    }
    Verdict::Pass
}

/// Gated check: runs `evaluate` only if the cycle has not been judged yet,
/// then closes the gate.
pub fn judge(
    checked: &mut bool,
    player_x: f32,
    pose: PoseCode,
    obstacle: &Obstacle,
    tuning: &Tuning,
) -> Option<Verdict> {
    if *checked {
        return None;
    }
    *checked = true;
    Some(evaluate(
        player_x,
        pose,
        obstacle,
        tuning.road_scale,
        tuning.valid_window_length,
    ))
}

/// Non-negative score; saturates instead of wrapping
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ScoreCounter(u32);

impl ScoreCounter {
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    pub fn add_point(&mut self) -> u32 {
        self.0 = self.0.saturating_add(1);
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::obstacle::Lane;

    fn check(player_x: f32, pose: PoseCode, obstacle: Obstacle) -> Verdict {
        evaluate(player_x, pose, &obstacle, 1.0, 1.0)
    }

    #[test]
    fn test_pass_at_lane_center() {
        let obstacle = Obstacle::new(Lane::Middle, PoseCode::BOTH_DOWN);
        assert_eq!(check(3.0, PoseCode::BOTH_DOWN, obstacle), Verdict::Pass);
    }

    #[test]
    fn test_tolerance_edges() {
        let obstacle = Obstacle::new(Lane::Left, PoseCode::BOTH_UP);
        assert_eq!(check(1.5, PoseCode::BOTH_UP, obstacle), Verdict::Pass);
        assert_eq!(check(0.5, PoseCode::BOTH_UP, obstacle), Verdict::Pass);
        assert_eq!(
            check(1.51, PoseCode::BOTH_UP, obstacle),
            Verdict::Fail(Miss::WrongLane)
        );
    }

    #[test]
    fn test_wrong_lane() {
        let obstacle = Obstacle::new(Lane::Left, PoseCode::LEFT_DOWN_RIGHT_UP);
        assert_eq!(
            check(5.0, PoseCode::LEFT_DOWN_RIGHT_UP, obstacle),
            Verdict::Fail(Miss::WrongLane)
        );
    }

    #[test]
    fn test_wrong_pose() {
        let obstacle = Obstacle::new(Lane::Right, PoseCode::BOTH_UP);
        assert_eq!(
            check(5.0, PoseCode::LEFT_UP_RIGHT_DOWN, obstacle),
            Verdict::Fail(Miss::WrongPose)
        );
    }

    #[test]
    fn test_judge_fires_once() {
        let tuning = Tuning::default();
        let obstacle = Obstacle::new(Lane::Middle, PoseCode::BOTH_DOWN);
        let mut checked = false;
        assert_eq!(
            judge(&mut checked, 3.0, PoseCode::BOTH_DOWN, &obstacle, &tuning),
            Some(Verdict::Pass)
        );
        assert!(checked);
        assert_eq!(
            judge(&mut checked, 3.0, PoseCode::BOTH_DOWN, &obstacle, &tuning),
            None
        );
    }

    #[test]
    fn test_window_bounds_exclusive() {
        let window = JudgmentWindow::new(3.3, 4.0);
        assert!(window.contains(3.65));
        assert!(!window.contains(4.0));
        assert!(!window.contains(3.3));
        assert!(!window.contains(10.0));
    }

    #[test]
    fn test_window_catches_skipped_frames() {
        let window = JudgmentWindow::new(3.3, 4.0);
        assert!(window.reached(4.2, 3.1));
        assert!(!window.reached(5.0, 4.5));
        assert!(!window.reached(3.2, 3.0));
    }

    #[test]
    fn test_score_does_not_wrap() {
        let mut score = ScoreCounter::new(49_999);
        assert_eq!(score.add_point(), 50_000);
        let mut score = ScoreCounter::new(u32::MAX);
        assert_eq!(score.add_point(), u32::MAX);
    }
}
