//! Player arm pose state machine
//!
//! Each arm is either up or down. The pair collapses into a pose code that
//! selects the character animation and is compared against wall shapes.

use serde::{Deserialize, Serialize};

use super::input::GameKey;

/// Position of a single arm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArmPosition {
    Up,
    Down,
}

/// The four arm keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArmKey {
    LeftUp,
    LeftDown,
    RightUp,
    RightDown,
}

impl ArmKey {
    /// Arm keys in the order they are polled each tick
    pub const ALL: [ArmKey; 4] = [
        ArmKey::LeftUp,
        ArmKey::LeftDown,
        ArmKey::RightUp,
        ArmKey::RightDown,
    ];

    pub fn from_game_key(key: GameKey) -> Option<Self> {
        match key {
            GameKey::ArmLeftUp => Some(ArmKey::LeftUp),
            GameKey::ArmLeftDown => Some(ArmKey::LeftDown),
            GameKey::ArmRightUp => Some(ArmKey::RightUp),
            GameKey::ArmRightDown => Some(ArmKey::RightDown),
            _ => None,
        }
    }
}

/// Combined arm pose, 0..=3. Also used as the shape code painted on walls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8")]
pub struct PoseCode(u8);

impl TryFrom<u8> for PoseCode {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        PoseCode::from_code(code).ok_or_else(|| format!("pose code {code} out of range (0..=3)"))
    }
}

impl PoseCode {
    pub const BOTH_UP: PoseCode = PoseCode(0);
    pub const LEFT_DOWN_RIGHT_UP: PoseCode = PoseCode(1);
    pub const LEFT_UP_RIGHT_DOWN: PoseCode = PoseCode(2);
    pub const BOTH_DOWN: PoseCode = PoseCode(3);

    pub const ALL: [PoseCode; 4] = [
        PoseCode::BOTH_UP,
        PoseCode::LEFT_DOWN_RIGHT_UP,
        PoseCode::LEFT_UP_RIGHT_DOWN,
        PoseCode::BOTH_DOWN,
    ];

    pub fn from_code(code: u8) -> Option<Self> {
        (code < 4).then_some(PoseCode(code))
    }

    pub fn code(self) -> u8 {
        self.0
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Frame range id handed to the animation player
    pub fn frame_range_id(self) -> &'static str {
        match self.0 {
            0 => "restBoth",
            1 => "leftDownRightUp",
            2 => "leftUpRightDown",
            _ => "bothDown",
        }
    }

    /// Arm positions that produce this code
    pub fn arms(self) -> (ArmPosition, ArmPosition) {
        use ArmPosition::*;
        match self.0 {
            0 => (Up, Up),
            1 => (Down, Up),
            2 => (Up, Down),
            _ => (Down, Down),
        }
    }
}

/// Current arm positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoseState {
    pub left: ArmPosition,
    pub right: ArmPosition,
}

impl Default for PoseState {
    fn default() -> Self {
        Self {
            left: ArmPosition::Down,
            right: ArmPosition::Down,
        }
    }
}

impl PoseState {
    pub fn new(left: ArmPosition, right: ArmPosition) -> Self {
        Self { left, right }
    }

    /// Derive the pose code
    pub fn code(&self) -> PoseCode {
        use ArmPosition::*;
        match (self.left, self.right) {
            (Up, Up) => PoseCode::BOTH_UP,
            (Down, Up) => PoseCode::LEFT_DOWN_RIGHT_UP,
            (Up, Down) => PoseCode::LEFT_UP_RIGHT_DOWN,
            (Down, Down) => PoseCode::BOTH_DOWN,
        }
    }

    /// React to a held arm key.
    ///
    /// Returns the new code when it changed, so the caller can request the
    /// matching animation only once.
    pub fn on_arm_key(&mut self, key: ArmKey) -> Option<PoseCode> {
        let before = self.code();
        match key {
            ArmKey::LeftUp => self.left = ArmPosition::Up,
            ArmKey::LeftDown => self.left = ArmPosition::Down,
            ArmKey::RightUp => self.right = ArmPosition::Up,
            ArmKey::RightDown => self.right = ArmPosition::Down,
        }
        let after = self.code();
        (after != before).then_some(after)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ArmPosition::*;

    #[test]
    fn test_code_table() {
        assert_eq!(PoseState::new(Up, Up).code().code(), 0);
        assert_eq!(PoseState::new(Down, Up).code().code(), 1);
        assert_eq!(PoseState::new(Up, Down).code().code(), 2);
        assert_eq!(PoseState::new(Down, Down).code().code(), 3);
    }

    #[test]
    fn test_frame_ids() {
        let ids: Vec<_> = PoseCode::ALL.iter().map(|c| c.frame_range_id()).collect();
        assert_eq!(
            ids,
            ["restBoth", "leftDownRightUp", "leftUpRightDown", "bothDown"]
        );
    }

    #[test]
    fn test_arms_inverts_code() {
        for code in PoseCode::ALL {
            let (left, right) = code.arms();
            assert_eq!(PoseState::new(left, right).code(), code);
        }
    }

    #[test]
    fn test_code_deserialize_checks_range() {
        assert_eq!(serde_json::from_str::<PoseCode>("1").unwrap(), PoseCode::LEFT_DOWN_RIGHT_UP);
        assert_eq!(serde_json::to_string(&PoseCode::BOTH_DOWN).unwrap(), "3");
        let err = serde_json::from_str::<PoseCode>("4").unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_default_is_both_down() {
        assert_eq!(PoseState::default().code(), PoseCode::BOTH_DOWN);
    }

    #[test]
    fn test_arm_key_reports_change_once() {
        let mut pose = PoseState::default();
        assert_eq!(pose.on_arm_key(ArmKey::LeftUp), Some(PoseCode::LEFT_UP_RIGHT_DOWN));
        // Holding the same key again changes nothing
        assert_eq!(pose.on_arm_key(ArmKey::LeftUp), None);
        assert_eq!(pose.on_arm_key(ArmKey::RightUp), Some(PoseCode::BOTH_UP));
    }

    #[test]
    fn test_pose_sticks_until_opposing_key() {
        let mut pose = PoseState::default();
        pose.on_arm_key(ArmKey::RightUp);
        pose.on_arm_key(ArmKey::LeftDown);
        assert_eq!(pose.code(), PoseCode::LEFT_DOWN_RIGHT_UP);
        pose.on_arm_key(ArmKey::RightDown);
        assert_eq!(pose.code(), PoseCode::BOTH_DOWN);
    }

    #[test]
    fn test_from_code_bounds() {
        assert_eq!(PoseCode::from_code(3), Some(PoseCode::BOTH_DOWN));
        assert_eq!(PoseCode::from_code(4), None);
    }
}
