//! Game settings and preferences
//!
//! Loaded from a JSON file next to the binary. Every section is optional;
//! missing fields keep their defaults.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::consts::LANE_COUNT;
use crate::sim::{GameKey, Lane, PoseCode, WallTexture};
use crate::tuning::{Tuning, TuningError};

/// Why settings could not be loaded
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Tuning(TuningError),
    Invalid(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "cannot read settings: {e}"),
            Self::Parse(e) => write!(f, "malformed settings: {e}"),
            Self::Tuning(e) => write!(f, "invalid tuning: {e}"),
            Self::Invalid(reason) => write!(f, "invalid settings: {reason}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Tuning(e) => Some(e),
            Self::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

impl From<TuningError> for SettingsError {
    fn from(e: TuningError) -> Self {
        Self::Tuning(e)
    }
}

/// Engine key name -> game key
///
/// A settings file lists overrides only; they are layered on the defaults.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct KeyBindings(BTreeMap<String, GameKey>);

impl<'de> Deserialize<'de> for KeyBindings {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let overrides = BTreeMap::<String, GameKey>::deserialize(deserializer)?;
        let mut bindings = Self::default();
        for (key, game_key) in overrides {
            bindings.bind(&key, game_key);
        }
        Ok(bindings)
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        // AZERTY layout: Q/D steer, A/Z left arm, P/M right arm
        let pairs = [
            ("q", GameKey::MoveLeft),
            ("left", GameKey::MoveLeft),
            ("d", GameKey::MoveRight),
            ("right", GameKey::MoveRight),
            ("a", GameKey::ArmLeftUp),
            ("z", GameKey::ArmLeftDown),
            ("p", GameKey::ArmRightUp),
            ("m", GameKey::ArmRightDown),
            ("return", GameKey::Confirm),
            ("space", GameKey::Confirm),
            ("escape", GameKey::Quit),
        ];
        Self(pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
    }
}

impl KeyBindings {
    /// Look up a key name (case-insensitive)
    pub fn resolve(&self, key: &str) -> Option<GameKey> {
        self.0.get(&key.to_ascii_lowercase()).copied()
    }

    pub fn bind(&mut self, key: &str, game_key: GameKey) {
        self.0.insert(key.to_ascii_lowercase(), game_key);
    }

    /// Game keys with no key bound to them
    pub fn unbound(&self) -> Vec<GameKey> {
        GameKey::ALL
            .into_iter()
            .filter(|k| !self.0.values().any(|v| v == k))
            .collect()
    }
}

/// Asset paths handed to the scene engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Assets {
    pub character_mesh: String,
    pub road_texture: String,
    /// Obstacle wall texture per lane, per shape
    pub shape_textures: [[String; 4]; LANE_COUNT],
    /// Neutral wall texture per lane
    pub passable_textures: [String; LANE_COUNT],
    /// Score glyph per digit value
    pub digit_glyphs: [String; 10],
    pub start_overlay: String,
    pub game_over_overlay: String,
}

impl Default for Assets {
    fn default() -> Self {
        Self {
            character_mesh: "data/unicyclist.x".to_string(),
            road_texture: "data/road.png".to_string(),
            shape_textures: std::array::from_fn(|lane| {
                std::array::from_fn(|shape| format!("data/walls/lane{lane}_shape{shape}.png"))
            }),
            passable_textures: std::array::from_fn(|lane| format!("data/walls/lane{lane}_open.png")),
            digit_glyphs: std::array::from_fn(|d| format!("data/digits/{d}.png")),
            start_overlay: "data/gui/start.png".to_string(),
            game_over_overlay: "data/gui/game_over.png".to_string(),
        }
    }
}

impl Assets {
    /// Texture for a wall, keyed by (lane, shape)
    pub fn wall_texture(&self, texture: WallTexture) -> &str {
        match texture {
            WallTexture::Passable { lane } => &self.passable_textures[lane.index()],
            WallTexture::Shape { lane, shape } => &self.shape_textures[lane.index()][shape.index()],
        }
    }

    pub fn digit_glyph(&self, digit: u8) -> &str {
        &self.digit_glyphs[(digit % 10) as usize]
    }

    /// Every path, for preloading
    pub fn all_paths(&self) -> Vec<&str> {
        let mut paths = vec![
            self.character_mesh.as_str(),
            self.road_texture.as_str(),
            self.start_overlay.as_str(),
            self.game_over_overlay.as_str(),
        ];
        for lane in Lane::ALL {
            paths.push(self.wall_texture(WallTexture::Passable { lane }));
            for shape in PoseCode::ALL {
                paths.push(self.wall_texture(WallTexture::Shape { lane, shape }));
            }
        }
        paths.extend(self.digit_glyphs.iter().map(String::as_str));
        paths
    }
}

/// Window parameters passed to the engine at device creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            title: "Unicycle Odyssey".to_string(),
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub tuning: Tuning,
    pub bindings: KeyBindings,
    pub assets: Assets,
    pub window: WindowSettings,
    /// Fixed run seed; a fresh one is drawn when absent
    pub seed: Option<u64>,
    /// Let the autopilot play (demo mode)
    pub autopilot: bool,
}

impl Settings {
    /// Parse settings from JSON text and validate them
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        self.tuning.validate()?;
        if self.window.width == 0 || self.window.height == 0 {
            return Err(SettingsError::Invalid("window size must be non-zero".to_string()));
        }
        for key in self.bindings.unbound() {
            log::warn!("No key bound to {:?}", key);
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
