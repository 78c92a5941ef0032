//! Input snapshot
//!
//! The engine delivers raw key events; the snapshot keeps a held/released
//! flag per game key and is read once per tick.

use serde::{Deserialize, Serialize};

use super::tick::TickInput;

/// The fixed set of keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameKey {
    MoveLeft,
    MoveRight,
    ArmLeftUp,
    ArmLeftDown,
    ArmRightUp,
    ArmRightDown,
    Confirm,
    Quit,
}

impl GameKey {
    pub const ALL: [GameKey; 8] = [
        GameKey::MoveLeft,
        GameKey::MoveRight,
        GameKey::ArmLeftUp,
        GameKey::ArmLeftDown,
        GameKey::ArmRightUp,
        GameKey::ArmRightDown,
        GameKey::Confirm,
        GameKey::Quit,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// Events delivered by the engine's event receiver
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A key changed state; `key` is the engine's key name
    Key { key: String, pressed: bool },
    /// The window was closed
    CloseRequested,
}

/// Per-key held state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    held: [bool; 8],
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one engine event into the snapshot.
    ///
    /// `resolve` maps an engine key name to a game key; names it does not
    /// know are ignored.
    pub fn apply<F>(&mut self, event: &InputEvent, resolve: F)
    where
        F: Fn(&str) -> Option<GameKey>,
    {
        match event {
            InputEvent::Key { key, pressed } => {
                if let Some(game_key) = resolve(key) {
                    self.held[game_key.index()] = *pressed;
                }
            }
            InputEvent::CloseRequested => self.held[GameKey::Quit.index()] = true,
        }
    }

    pub fn is_held(&self, key: GameKey) -> bool {
        self.held[key.index()]
    }

    pub fn set(&mut self, key: GameKey, held: bool) {
        self.held[key.index()] = held;
    }

    /// Build the input for the next tick
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            move_left: self.is_held(GameKey::MoveLeft),
            move_right: self.is_held(GameKey::MoveRight),
            arm_left_up: self.is_held(GameKey::ArmLeftUp),
            arm_left_down: self.is_held(GameKey::ArmLeftDown),
            arm_right_up: self.is_held(GameKey::ArmRightUp),
            arm_right_down: self.is_held(GameKey::ArmRightDown),
            confirm: self.is_held(GameKey::Confirm),
            quit: self.is_held(GameKey::Quit),
            autopilot: false,
        }
    }
}
