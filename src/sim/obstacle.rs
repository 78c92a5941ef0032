//! Obstacle cycle controller
//!
//! Three walls (one per lane) travel down the track together. When the lead
//! wall finishes, the speed ramps up, the walls restart from the far end and
//! a new obstacle is drawn: one lane carries a shape, the other two are
//! passable.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::pose::PoseCode;
use super::speed::{self, SpeedRamp};
use super::travel::LinearTravel;
use crate::consts::LANE_COUNT;
use crate::lane_center_x;
use crate::tuning::Tuning;

/// One of the three road lanes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Lane {
    Left,
    Middle,
    Right,
}

impl Lane {
    pub const ALL: [Lane; LANE_COUNT] = [Lane::Left, Lane::Middle, Lane::Right];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// World X of this lane's center
    pub fn center_x(self, road_scale: f32) -> f32 {
        lane_center_x(self.index(), road_scale)
    }
}

/// The active obstacle: which lane holds the shaped wall and what shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Obstacle {
    pub lane: Lane,
    pub shape: PoseCode,
}

impl Obstacle {
    pub fn new(lane: Lane, shape: PoseCode) -> Self {
        Self { lane, shape }
    }

    /// Draw a lane and a shape independently and uniformly
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let lane = Lane::ALL[rng.random_range(0..LANE_COUNT)];
        let shape = PoseCode::ALL[rng.random_range(0..PoseCode::ALL.len())];
        Self { lane, shape }
    }

    /// Texture key for every lane's wall
    pub fn wall_textures(&self) -> [WallTexture; LANE_COUNT] {
        Lane::ALL.map(|lane| {
            if lane == self.lane {
                WallTexture::Shape {
                    lane,
                    shape: self.shape,
                }
            } else {
                WallTexture::Passable { lane }
            }
        })
    }
}

/// Key into the wall texture table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallTexture {
    /// Neutral texture the player can ride through in any pose
    Passable { lane: Lane },
    /// Obstacle texture showing the pose needed to pass
    Shape { lane: Lane, shape: PoseCode },
}

/// Everything the scene needs to know about a freshly spawned cycle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CycleSpawn {
    /// 1-based cycle number
    pub index: u64,
    pub obstacle: Obstacle,
    pub duration_ms: f32,
    pub speed: f32,
    pub lateral_speed: f32,
    pub walls: [LinearTravel; LANE_COUNT],
}

/// Owns the walls, the active obstacle, the RNG and the scoring gate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleCycle {
    /// Wall travel per lane; the left wall leads
    pub walls: [LinearTravel; LANE_COUNT],
    pub obstacle: Obstacle,
    /// Cycles spawned so far
    pub cycle_index: u64,
    /// Set once the current cycle has been judged
    pub checked: bool,
    rng: Pcg32,
}

impl ObstacleCycle {
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        let walls = Lane::ALL.map(|lane| {
            LinearTravel::parked(Vec3::new(
                lane.center_x(tuning.road_scale),
                0.0,
                tuning.track_start_depth,
            ))
        });
        Self {
            walls,
            obstacle: Obstacle::new(Lane::Middle, PoseCode::BOTH_DOWN),
            cycle_index: 0,
            checked: false,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Depth of the lead (left lane) wall
    pub fn lead_depth(&self) -> f32 {
        self.walls[Lane::Left.index()].position().z
    }

    pub fn lead_finished(&self) -> bool {
        self.walls[Lane::Left.index()].has_finished()
    }

    pub fn advance_walls(&mut self, dt: f32) {
        for wall in &mut self.walls {
            wall.advance(dt);
        }
    }

    /// Start a new cycle at the given speed.
    ///
    /// Replaces every wall travel, draws a new obstacle and reopens the gate.
    pub fn spawn(&mut self, speed: f32, tuning: &Tuning) -> CycleSpawn {
        let duration_ms = speed::travel_duration_ms(tuning.base_travel_ms, speed);
        self.walls = Lane::ALL.map(|lane| {
            let x = lane.center_x(tuning.road_scale);
            LinearTravel::new(
                Vec3::new(x, 0.0, tuning.track_start_depth),
                Vec3::new(x, 0.0, tuning.track_end_depth),
                duration_ms,
                false,
            )
        });
        self.obstacle = Obstacle::random(&mut self.rng);
        self.cycle_index += 1;
        self.checked = false;

        log::debug!(
            "Cycle {}: obstacle {:?} shape {} ({:.0} ms at speed {:.1})",
            self.cycle_index,
            self.obstacle.lane,
            self.obstacle.shape.code(),
            duration_ms,
            speed
        );

        CycleSpawn {
            index: self.cycle_index,
            obstacle: self.obstacle,
            duration_ms,
            speed,
            lateral_speed: speed::lateral_speed(tuning.road_scale, tuning.lane_crossing_secs, speed),
            walls: self.walls,
        }
    }

    /// Per-tick check: if the lead wall finished, ramp speed and respawn
    pub fn tick(&mut self, speed: &mut SpeedRamp, tuning: &Tuning) -> Option<CycleSpawn> {
        if !self.lead_finished() {
            return None;
        }
        let new_speed = speed.advance();
        Some(self.spawn(new_speed, tuning))
    }
}
