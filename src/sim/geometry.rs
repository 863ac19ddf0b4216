//! Axis-aligned box geometry for the avatar and obstacles
//!
//! Screen space: x grows rightward, y grows downward, origin at the
//! playfield's top-left corner.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Top-left corner
    pub min: Vec2,
    /// Bottom-right corner
    pub max: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.max.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Open-interval overlap on both axes; shared edges do not overlap
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let b = Aabb::new(Vec2::new(50.0, 308.0), Vec2::new(34.0, 24.0));
        assert_eq!(b.left(), 50.0);
        assert_eq!(b.right(), 84.0);
        assert_eq!(b.top(), 308.0);
        assert_eq!(b.bottom(), 332.0);
        assert_eq!(b.size(), Vec2::new(34.0, 24.0));
    }

    #[test]
    fn test_overlap_strict() {
        let a = Aabb::new(Vec2::ZERO, Vec2::splat(10.0));
        let inside = Aabb::new(Vec2::splat(5.0), Vec2::splat(10.0));
        let touching_x = Aabb::new(Vec2::new(10.0, 0.0), Vec2::splat(10.0));
        let touching_y = Aabb::new(Vec2::new(0.0, 10.0), Vec2::splat(10.0));
        let corner = Aabb::new(Vec2::splat(10.0), Vec2::splat(10.0));

        assert!(a.overlaps(&inside));
        assert!(!a.overlaps(&touching_x));
        assert!(!a.overlaps(&touching_y));
        assert!(!a.overlaps(&corner));
    }
}
