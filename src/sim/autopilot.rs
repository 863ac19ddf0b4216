//! Demo autopilot
//!
//! Decides whether to flap this frame by aiming for the next gap ahead of the
//! avatar. Used for the attract/demo mode and headless runs.

use super::state::{GamePhase, GameState};

/// Keep the avatar's bottom edge at least this far above the gap floor
const FLOOR_MARGIN: f32 = 18.0;

/// Vertical band the autopilot steers into: (top, bottom)
pub fn target_band(state: &GameState) -> (f32, f32) {
    let avatar_left = state.avatar.pos.x;
    state
        .obstacles
        .pairs()
        .iter()
        .find(|p| p.right() >= avatar_left)
        .map(|p| (p.gap_top(), p.gap_bottom()))
        .unwrap_or_else(|| {
            // No obstacle ahead: hold the middle of the playfield
            let mid = state.tuning.playfield_height / 2.0;
            let half = state.tuning.obstacle_gap / 2.0;
            (mid - half, mid + half)
        })
}

/// Should the autopilot send an input this frame?
///
/// Starts the run from Ready; never restarts from Ended.
pub fn wants_flap(state: &GameState) -> bool {
    match state.phase {
        GamePhase::Ready => true,
        GamePhase::Ended => false,
        GamePhase::Running => {
            let avatar = &state.avatar;
            if avatar.vel_y < 0.0 {
                return false;
            }
            let (gap_top, gap_bottom) = target_band(state);
            let next_vel = avatar.vel_y + state.tuning.gravity;
            let next_bottom = avatar.pos.y + avatar.size.y + next_vel;
            // A flap rises ~45 units before falling again; don't overshoot the ceiling
            let headroom = avatar.pos.y - gap_top;
            next_bottom > gap_bottom - FLOOR_MARGIN && headroom > 0.0
        }
    }
}
