//! Collision checks
//!
//! Pure functions: they read boxes and never touch state.

use super::geometry::Aabb;
use super::state::{Avatar, ObstaclePair};

/// True if the avatar touches or leaves the top or bottom of the playfield
pub fn avatar_out_of_bounds(avatar: &Avatar, playfield_height: f32) -> bool {
    let bounds = avatar.bounds();
    bounds.top() <= 0.0 || bounds.bottom() >= playfield_height
}

/// Strict AABB overlap; boxes that only share an edge do not collide
#[inline]
pub fn collides(a: &Aabb, b: &Aabb) -> bool {
    a.overlaps(b)
}

/// True if the avatar overlaps either obstacle of the pair
pub fn avatar_hits_pair(avatar: &Avatar, pair: &ObstaclePair) -> bool {
    let bounds = avatar.bounds();
    collides(&bounds, &pair.top_bounds()) || collides(&bounds, &pair.bottom_bounds())
}
