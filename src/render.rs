//! Drawable snapshot and the renderer contract
//!
//! The session copies its state into a [`Frame`] every advance and hands it to
//! a [`Renderer`]. Renderers never see live game state.

use anyhow::Result;
use glam::Vec2;
use serde::Serialize;

use crate::sim::{Aabb, GamePhase, GameState, WingPose};

/// Width of one score digit cell
pub const DIGIT_WIDTH: f32 = 24.0;
/// Height of one score digit cell
pub const DIGIT_HEIGHT: f32 = 36.0;
/// Top edge of the score row
pub const SCORE_TOP: f32 = 20.0;

/// One obstacle pair as drawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ObstacleSprite {
    pub id: u32,
    pub top: Aabb,
    pub bottom: Aabb,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub phase: GamePhase,
    pub playfield: Vec2,
    pub avatar: Aabb,
    pub pose: WingPose,
    pub obstacles: Vec<ObstacleSprite>,
    pub score: u32,
    pub best_score: u32,
}

impl Frame {
    pub fn capture(state: &GameState) -> Self {
        Self {
            phase: state.phase,
            playfield: state.tuning.playfield(),
            avatar: state.avatar.bounds(),
            pose: state.avatar.wing_pose(),
            obstacles: state
                .obstacles
                .pairs()
                .iter()
                .map(|p| ObstacleSprite {
                    id: p.id,
                    top: p.top_bounds(),
                    bottom: p.bottom_bounds(),
                })
                .collect(),
            score: state.score,
            best_score: state.best_score,
        }
    }

    /// Score digit cells, centred horizontally along the top of the playfield
    pub fn score_digits(&self) -> Vec<(u8, Aabb)> {
        layout_digits(self.score, self.playfield.x)
    }
}

/// Lay out the decimal digits of `value` as centred cells
pub fn layout_digits(value: u32, playfield_width: f32) -> Vec<(u8, Aabb)> {
    let digits: Vec<u8> = value.to_string().bytes().map(|b| b - b'0').collect();
    let start_x = (playfield_width - digits.len() as f32 * DIGIT_WIDTH) / 2.0;
    digits
        .into_iter()
        .enumerate()
        .map(|(i, d)| {
            let pos = Vec2::new(start_x + i as f32 * DIGIT_WIDTH, SCORE_TOP);
            (d, Aabb::new(pos, Vec2::new(DIGIT_WIDTH, DIGIT_HEIGHT)))
        })
        .collect()
}

/// Draws frames; failures are reported, never retried
pub trait Renderer {
    fn draw(&mut self, frame: &Frame) -> Result<()>;
}

/// Draws nothing (headless runs)
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn draw(&mut self, _frame: &Frame) -> Result<()> {
        Ok(())
    }
}
