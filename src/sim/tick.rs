//! Per-frame simulation step and input handling
//!
//! Both entry points append what happened to an event buffer; the caller
//! decides what to do with them (sound cues, logging).

use super::collision::{avatar_hits_pair, avatar_out_of_bounds};
use super::scoring;
use super::state::{CrashCause, GameEvent, GamePhase, GameState};

/// Handle one "activate" input (key, click or touch; devices are not told apart)
pub fn activate(state: &mut GameState, events: &mut Vec<GameEvent>) {
    match state.phase {
        GamePhase::Ready => {
            state.reset_run();
            state.phase = GamePhase::Running;
            log::info!("Run started (seed {})", state.seed);
            events.push(GameEvent::Started);
            // The input that starts the run also flaps
            flap(state, events);
        }
        GamePhase::Running => flap(state, events),
        GamePhase::Ended => {
            state.reset_run();
            state.phase = GamePhase::Running;
            log::info!("Run restarted");
            events.push(GameEvent::Restarted);
        }
    }
}

fn flap(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.avatar.apply_jump(state.tuning.jump_velocity);
    events.push(GameEvent::Flapped);
}

/// Advance the game state by one frame
///
/// Ready and Ended leave the state untouched.
pub fn tick(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.phase != GamePhase::Running {
        return;
    }

    let tuning = state.tuning;

    state.avatar.apply_gravity(tuning.gravity);
    state.avatar.integrate();

    if avatar_out_of_bounds(&state.avatar, tuning.playfield_height) {
        end_run(state, CrashCause::Boundary, events);
        return;
    }

    state.frame += 1;
    state.obstacles.tick(state.frame, &mut state.rng, &tuning);

    let mut hit = None;
    for pair in state.obstacles.pairs_mut() {
        if scoring::evaluate(&state.avatar, pair) {
            state.score += 1;
            log::debug!("Cleared pair {}, score {}", pair.id, state.score);
            events.push(GameEvent::Scored { score: state.score });
        }

        if avatar_hits_pair(&state.avatar, pair) {
            hit = Some(pair.id);
            break;
        }
    }

    if let Some(pair_id) = hit {
        end_run(state, CrashCause::Obstacle { pair_id }, events);
        return;
    }

    state.obstacles.prune();
}

fn end_run(state: &mut GameState, cause: CrashCause, events: &mut Vec<GameEvent>) {
    state.phase = GamePhase::Ended;
    state.best_score = state.best_score.max(state.score);
    log::info!(
        "Run ended by {:?} at frame {} with score {} (best {})",
        cause,
        state.frame,
        state.score,
        state.best_score
    );
    events.push(GameEvent::Crashed { cause });
}
