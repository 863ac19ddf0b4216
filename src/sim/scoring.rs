//! Scoring policy
//!
//! A pair is worth one point, awarded the first frame its right edge is
//! strictly left of the avatar's left edge.

use super::state::{Avatar, ObstaclePair};

/// Mark the pair scored if the avatar has just cleared it
///
/// Returns true exactly once per pair.
pub fn evaluate(avatar: &Avatar, pair: &mut ObstaclePair) -> bool {
    if pair.scored || pair.right() >= avatar.pos.x {
        return false;
    }
    pair.scored = true;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::obstacles::place_pair;
    use crate::tuning::Tuning;

    #[test]
    fn test_threshold_uses_avatar_left_edge() {
        let tuning = Tuning::default();
        let avatar = Avatar::new(&tuning);
        let mut pair = place_pair(1, -200, &tuning);

        pair.x = 349.0;
        assert!(!evaluate(&avatar, &mut pair));
        pair.x = 0.0;
        assert!(!evaluate(&avatar, &mut pair));
        // Right edge 50 is not strictly left of x = 50
        pair.x = -14.0;
        assert!(!evaluate(&avatar, &mut pair));
        pair.x = -16.0;
        assert!(evaluate(&avatar, &mut pair));
        assert!(pair.scored);
    }

    #[test]
    fn test_scores_once() {
        let tuning = Tuning::default();
        let avatar = Avatar::new(&tuning);
        let mut pair = place_pair(1, -200, &tuning);
        pair.x = -20.0;

        assert!(evaluate(&avatar, &mut pair));
        for _ in 0..10 {
            pair.x -= 2.0;
            assert!(!evaluate(&avatar, &mut pair));
        }
    }
}
