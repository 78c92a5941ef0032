//! Hand-off to the scene engine
//!
//! The engine owns meshes, textures, animators and GUI; the game only tells
//! it what changed. `present` drains the tick's events into a `Scene`.

use glam::Vec3;

use crate::hud::{SCORE_DIGITS, score_digits};
use crate::settings::Assets;
use crate::sim::{GameEvent, GameState, Lane, LinearTravel};

/// Full-screen GUI layers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    StartScreen,
    Hud,
    GameOver,
}

/// What the game needs from a rendering/scene engine
pub trait Scene {
    /// Replace the travel animator on a lane's wall
    fn set_wall_travel(&mut self, lane: Lane, travel: &LinearTravel);
    fn set_wall_texture(&mut self, lane: Lane, texture: &str);
    /// Ask the character's animation player for a named frame range
    fn play_frames(&mut self, frame_range_id: &str);
    fn set_player_position(&mut self, pos: Vec3);
    fn set_score_glyphs(&mut self, glyphs: [&str; SCORE_DIGITS]);
    fn show_overlay(&mut self, overlay: Overlay, texture: Option<&str>);

    fn preload(&mut self, _path: &str) {}
    fn set_caption(&mut self, _caption: &str) {}
    fn close(&mut self) {}
}

fn show_score(scene: &mut impl Scene, assets: &Assets, score: u32) {
    let digits = score_digits(score);
    scene.set_score_glyphs(digits.map(|d| assets.digit_glyph(d)));
}

/// Load assets and put up the title overlay
pub fn prepare(scene: &mut impl Scene, state: &GameState, assets: &Assets) {
    for path in assets.all_paths() {
        scene.preload(path);
    }
    scene.set_player_position(state.player.pos);
    scene.play_frames(state.pose.code().frame_range_id());
    scene.show_overlay(Overlay::StartScreen, Some(&assets.start_overlay));
}

/// Forward everything that happened since the last frame to the scene
pub fn present(state: &mut GameState, scene: &mut impl Scene, assets: &Assets) {
    for event in state.drain_events() {
        match event {
            GameEvent::SessionStarted => {
                scene.show_overlay(Overlay::Hud, None);
                show_score(scene, assets, state.score.value());
            }
            GameEvent::CycleStarted(spawn) => {
                let textures = spawn.obstacle.wall_textures();
                for lane in Lane::ALL {
                    scene.set_wall_travel(lane, &spawn.walls[lane.index()]);
                    scene.set_wall_texture(lane, assets.wall_texture(textures[lane.index()]));
                }
            }
            GameEvent::PoseChanged(code) => scene.play_frames(code.frame_range_id()),
            GameEvent::Scored { score } => show_score(scene, assets, score),
            GameEvent::GameOver { .. } => {
                scene.show_overlay(Overlay::GameOver, Some(&assets.game_over_overlay));
            }
            GameEvent::QuitRequested => scene.close(),
        }
    }
    scene.set_player_position(state.player.pos);
}

/// Scene that only logs; backs the headless driver
#[derive(Debug, Default)]
pub struct LogScene {
    pub frames_presented: u64,
}

impl Scene for LogScene {
    fn set_wall_travel(&mut self, lane: Lane, travel: &LinearTravel) {
        log::debug!(
            "{:?} wall: {:?} -> {:?} over {:.0} ms",
            lane,
            travel.from,
            travel.to,
            travel.duration_ms
        );
    }

    fn set_wall_texture(&mut self, lane: Lane, texture: &str) {
        log::debug!("{:?} wall texture: {}", lane, texture);
    }

    fn play_frames(&mut self, frame_range_id: &str) {
        log::debug!("Character frames: {}", frame_range_id);
    }

    fn set_player_position(&mut self, _pos: Vec3) {
        self.frames_presented += 1;
    }

    fn set_score_glyphs(&mut self, glyphs: [&str; SCORE_DIGITS]) {
        log::debug!("Score glyphs: {}", glyphs.join(" "));
    }

    fn show_overlay(&mut self, overlay: Overlay, texture: Option<&str>) {
        log::info!("Overlay {:?} ({})", overlay, texture.unwrap_or("none"));
    }

    fn set_caption(&mut self, caption: &str) {
        log::trace!("{}", caption);
    }

    fn close(&mut self) {
        log::info!("Scene closed after {} frames", self.frames_presented);
    }
}
