//! Data-driven game balance
//!
//! Every gameplay constant lives here so a run can be retuned from a JSON
//! file without touching the simulation. Missing fields fall back to the
//! reference values in [`crate::consts`].

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Gameplay constants for one session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub playfield_width: f32,
    pub playfield_height: f32,

    pub avatar_x: f32,
    pub avatar_width: f32,
    pub avatar_height: f32,

    pub obstacle_width: f32,
    pub obstacle_height: f32,
    pub obstacle_gap: f32,

    /// Horizontal obstacle velocity per frame (must be negative)
    pub scroll_speed: f32,
    pub gravity: f32,
    pub jump_velocity: f32,

    pub spawn_interval: u64,
    pub spawn_offset_base: i32,
    pub spawn_offset_span: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,
            avatar_x: AVATAR_X,
            avatar_width: AVATAR_WIDTH,
            avatar_height: AVATAR_HEIGHT,
            obstacle_width: OBSTACLE_WIDTH,
            obstacle_height: OBSTACLE_HEIGHT,
            obstacle_gap: OBSTACLE_GAP,
            scroll_speed: SCROLL_SPEED,
            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,
            spawn_interval: SPAWN_INTERVAL,
            spawn_offset_base: SPAWN_OFFSET_BASE,
            spawn_offset_span: SPAWN_OFFSET_SPAN,
        }
    }
}

impl Tuning {
    /// Playfield size as a vector (width, height)
    #[inline]
    pub fn playfield(&self) -> Vec2 {
        Vec2::new(self.playfield_width, self.playfield_height)
    }

    /// Avatar spawn position: fixed x, vertically centred
    pub fn avatar_start(&self) -> Vec2 {
        Vec2::new(
            self.avatar_x,
            self.playfield_height / 2.0 - self.avatar_height / 2.0,
        )
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        let sizes = [
            ("playfield_width", self.playfield_width),
            ("playfield_height", self.playfield_height),
            ("avatar_width", self.avatar_width),
            ("avatar_height", self.avatar_height),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_height", self.obstacle_height),
            ("obstacle_gap", self.obstacle_gap),
        ];
        for (name, value) in sizes {
            if !(value.is_finite() && value > 0.0) {
                bail!("{name} must be a positive number, got {value}");
            }
        }
        if !(self.scroll_speed.is_finite() && self.scroll_speed < 0.0) {
            bail!("scroll_speed must be negative, got {}", self.scroll_speed);
        }
        if !self.gravity.is_finite() || !self.jump_velocity.is_finite() {
            bail!("gravity and jump_velocity must be finite");
        }
        if self.spawn_interval == 0 {
            bail!("spawn_interval must be at least one frame");
        }
        if self.spawn_offset_span == 0 {
            bail!("spawn_offset_span must be at least 1");
        }
        let lowest = i64::from(self.spawn_offset_base) - i64::from(self.spawn_offset_span) + 1;
        if lowest < i64::from(i32::MIN) {
            bail!(
                "spawn_offset_base {} minus spawn_offset_span {} leaves the i32 range",
                self.spawn_offset_base,
                self.spawn_offset_span
            );
        }
        Ok(())
    }

    /// Parse and validate tuning from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Tuning = serde_json::from_str(json).context("invalid tuning JSON")?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read tuning file {}", path.display()))?;
        let tuning = Self::from_json(&json)
            .with_context(|| format!("failed to load tuning from {}", path.display()))?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_reference() {
        let t = Tuning::default();
        assert_eq!(t.playfield(), Vec2::new(360.0, 640.0));
        assert_eq!(t.avatar_start(), Vec2::new(50.0, 308.0));
        assert_eq!(t.spawn_interval, 90);
        assert!(t.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let t = Tuning::from_json(r#"{ "gravity": 0.5, "spawn_interval": 120 }"#).unwrap();
        assert_eq!(t.gravity, 0.5);
        assert_eq!(t.spawn_interval, 120);
        assert_eq!(t.obstacle_gap, OBSTACLE_GAP);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(Tuning::from_json(r#"{ "spawn_interval": 0 }"#).is_err());
        assert!(Tuning::from_json(r#"{ "scroll_speed": 2.0 }"#).is_err());
        assert!(Tuning::from_json(r#"{ "obstacle_gap": -1.0 }"#).is_err());
        assert!(Tuning::from_json("not json").is_err());
    }

    #[test]
    fn test_rejects_oversized_offset_span() {
        assert!(Tuning::from_json(r#"{ "spawn_offset_span": 4294967295 }"#).is_err());
        assert!(Tuning::from_json(r#"{ "spawn_offset_span": 2147483648 }"#).is_err());

        let span = |base: i32, span: u32| {
            format!(r#"{{ "spawn_offset_base": {base}, "spawn_offset_span": {span} }}"#)
        };
        // Lowest roll lands exactly on i32::MIN
        assert!(Tuning::from_json(&span(i32::MIN + 10, 11)).is_ok());
        assert!(Tuning::from_json(&span(i32::MIN + 10, 12)).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Tuning::load("/nonexistent/flapper-tuning.json").unwrap_err();
        assert!(err.to_string().contains("tuning"));
    }
}
