//! Game state and core simulation types
//!
//! Everything a session mutates between frames lives here.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::Aabb;
use super::obstacles::ObstacleStream;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start prompt shown, nothing moves until the first input
    Ready,
    /// Active gameplay
    Running,
    /// Run ended by a collision; next input restarts
    Ended,
}

/// Which flap sprite the avatar shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WingPose {
    Up,
    Mid,
    Down,
}

/// What ended a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashCause {
    /// Touched the top or bottom of the playfield
    Boundary,
    /// Overlapped an obstacle of the given pair
    Obstacle { pair_id: u32 },
}

/// Things that happened during a tick or an input, for the host to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Ready -> Running
    Started,
    /// Ended -> Running with a fresh run
    Restarted,
    /// Jump applied
    Flapped,
    /// A pair was cleared; carries the new score
    Scored { score: u32 },
    /// Running -> Ended
    Crashed { cause: CrashCause },
}

/// The player's avatar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Avatar {
    /// Top-left corner; x never changes after spawn
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (per frame, positive = downward)
    pub vel_y: f32,
}

impl Avatar {
    /// Spawn at the tuning's start pose, at rest
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: tuning.avatar_start(),
            size: Vec2::new(tuning.avatar_width, tuning.avatar_height),
            vel_y: 0.0,
        }
    }

    /// Unconditional downward acceleration, no terminal velocity
    #[inline]
    pub fn apply_gravity(&mut self, gravity: f32) {
        self.vel_y += gravity;
    }

    /// Flap: overwrite velocity with the jump impulse
    #[inline]
    pub fn apply_jump(&mut self, jump_velocity: f32) {
        self.vel_y = jump_velocity;
    }

    /// Move vertically by the current velocity
    #[inline]
    pub fn integrate(&mut self) {
        self.pos.y += self.vel_y;
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    pub fn wing_pose(&self) -> WingPose {
        if self.vel_y < -1.0 {
            WingPose::Up
        } else if self.vel_y > 1.0 {
            WingPose::Down
        } else {
            WingPose::Mid
        }
    }
}

/// A top and bottom obstacle sharing one x and one gap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstaclePair {
    pub id: u32,
    /// Left edge shared by both obstacles
    pub x: f32,
    /// Top edge of the top obstacle (negative: pushed above the playfield)
    pub top_y: f32,
    pub width: f32,
    pub height: f32,
    pub gap: f32,
    /// Set once the avatar has cleared this pair
    pub scored: bool,
}

impl ObstaclePair {
    /// Right edge shared by both obstacles
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge of the top obstacle
    #[inline]
    pub fn gap_top(&self) -> f32 {
        self.top_y + self.height
    }

    /// Top edge of the bottom obstacle
    #[inline]
    pub fn gap_bottom(&self) -> f32 {
        self.gap_top() + self.gap
    }

    pub fn top_bounds(&self) -> Aabb {
        Aabb::new(
            Vec2::new(self.x, self.top_y),
            Vec2::new(self.width, self.height),
        )
    }

    pub fn bottom_bounds(&self) -> Aabb {
        Aabb::new(
            Vec2::new(self.x, self.gap_bottom()),
            Vec2::new(self.width, self.height),
        )
    }
}

/// Complete session state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub score: u32,
    /// Highest score reached since the process started
    pub best_score: u32,
    /// Frames advanced while Running in the current run
    pub frame: u64,
    pub avatar: Avatar,
    pub obstacles: ObstacleStream,
    /// Spawn RNG; keeps running across restarts
    pub rng: Pcg32,
}

impl GameState {
    /// Create a new session state in the Ready phase
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            tuning,
            phase: GamePhase::Ready,
            score: 0,
            best_score: 0,
            frame: 0,
            avatar: Avatar::new(&tuning),
            obstacles: ObstacleStream::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Fresh avatar, empty obstacle stream, zero score and frame counter
    pub fn reset_run(&mut self) {
        self.score = 0;
        self.frame = 0;
        self.avatar = Avatar::new(&self.tuning);
        self.obstacles = ObstacleStream::new();
    }
}
