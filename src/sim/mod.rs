//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per display frame, constants in frame units
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod geometry;
pub mod obstacles;
pub mod scoring;
pub mod state;
pub mod tick;

pub use collision::{avatar_hits_pair, avatar_out_of_bounds, collides};
pub use geometry::Aabb;
pub use obstacles::{ObstacleStream, place_pair, roll_offset};
pub use state::{
    Avatar, CrashCause, GameEvent, GamePhase, GameState, ObstaclePair, WingPose,
};
pub use tick::{activate, tick};
