//! Procedural obstacle stream
//!
//! Pairs spawn at the right edge of the playfield on a fixed frame cadence,
//! scroll left every frame, and are pruned once fully past the left edge.
//! Because every pair spawns at the same x and all move at the same speed,
//! insertion order is also left-to-right screen order.

use rand::Rng;

use super::state::ObstaclePair;
use crate::tuning::Tuning;

/// Roll a spawn offset: `base - uniform(0..span)`
///
/// With the reference tuning this is an integer in -349..=-100.
pub fn roll_offset<R: Rng>(rng: &mut R, tuning: &Tuning) -> i32 {
    let roll = rng.random_range(0..tuning.spawn_offset_span);
    let offset = i64::from(tuning.spawn_offset_base) - i64::from(roll);
    offset.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Build a pair at the spawn x for a given vertical offset
///
/// The offset is the top obstacle's top edge; the gap opens at
/// `offset + obstacle_height`.
pub fn place_pair(id: u32, offset: i32, tuning: &Tuning) -> ObstaclePair {
    ObstaclePair {
        id,
        x: tuning.playfield_width,
        top_y: offset as f32,
        width: tuning.obstacle_width,
        height: tuning.obstacle_height,
        gap: tuning.obstacle_gap,
        scored: false,
    }
}

/// Ordered live obstacle pairs plus the spawn timer
#[derive(Debug, Clone, PartialEq)]
pub struct ObstacleStream {
    pairs: Vec<ObstaclePair>,
    last_spawn_frame: u64,
    next_id: u32,
}

impl Default for ObstacleStream {
    fn default() -> Self {
        Self::new()
    }
}

impl ObstacleStream {
    pub fn new() -> Self {
        Self {
            pairs: Vec::new(),
            last_spawn_frame: 0,
            next_id: 1,
        }
    }

    /// Live pairs in spawn (= screen) order
    pub fn pairs(&self) -> &[ObstaclePair] {
        &self.pairs
    }

    pub fn pairs_mut(&mut self) -> &mut [ObstaclePair] {
        &mut self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn last_spawn_frame(&self) -> u64 {
        self.last_spawn_frame
    }

    /// Append a pair with the next id; returns that id
    pub fn push_pair(&mut self, offset: i32, tuning: &Tuning) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.pairs.push(place_pair(id, offset, tuning));
        id
    }

    /// Spawn if the interval has elapsed, then scroll every pair
    ///
    /// Returns true if a pair was spawned this call.
    pub fn tick<R: Rng>(&mut self, frame: u64, rng: &mut R, tuning: &Tuning) -> bool {
        let spawned = frame.saturating_sub(self.last_spawn_frame) >= tuning.spawn_interval;
        if spawned {
            let offset = roll_offset(rng, tuning);
            let id = self.push_pair(offset, tuning);
            self.last_spawn_frame = frame;
            log::debug!("Spawned pair {} at frame {} (offset {})", id, frame, offset);
        }

        for pair in &mut self.pairs {
            pair.x += tuning.scroll_speed;
        }

        spawned
    }

    /// Drop every pair whose right edge is past the left playfield edge
    ///
    /// Returns the number of pairs removed.
    pub fn prune(&mut self) -> usize {
        let before = self.pairs.len();
        self.pairs.retain(|p| p.right() >= 0.0);
        let removed = before - self.pairs.len();
        if removed > 0 {
            log::debug!("Pruned {} pair(s), {} live", removed, self.pairs.len());
        }
        removed
    }
}
