//! Flapper - a single-screen flap-through-the-pipes arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, scoring)
//! - `session`: Game session wiring the simulation to its collaborators
//! - `render`: Drawable frame snapshot and the renderer contract
//! - `audio`: Best-effort sound cues
//! - `terminal`: Crossterm front end
//! - `tuning`: Data-driven game balance
//! - `settings`: Host preferences

pub mod audio;
pub mod render;
pub mod session;
pub mod settings;
pub mod sim;
pub mod terminal;
pub mod tuning;

pub use audio::{AudioBackend, AudioManager, SoundEffect};
pub use render::{Frame, Renderer};
pub use session::GameSession;
pub use settings::Settings;
pub use tuning::Tuning;

/// Reference tuning, in playfield units (pixels) and frames
pub mod consts {
    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 360.0;
    pub const PLAYFIELD_HEIGHT: f32 = 640.0;

    /// Avatar box, spawned vertically centred
    pub const AVATAR_X: f32 = 50.0;
    pub const AVATAR_WIDTH: f32 = 34.0;
    pub const AVATAR_HEIGHT: f32 = 24.0;

    /// Obstacle sprite size (both halves of a pair)
    pub const OBSTACLE_WIDTH: f32 = 64.0;
    pub const OBSTACLE_HEIGHT: f32 = 532.0;
    /// Vertical opening between the top and bottom obstacle
    pub const OBSTACLE_GAP: f32 = 120.0;

    /// Horizontal obstacle velocity (per frame, negative = leftward)
    pub const SCROLL_SPEED: f32 = -2.0;
    /// Downward acceleration (per frame²)
    pub const GRAVITY: f32 = 0.4;
    /// Velocity set by a flap (overwrites, never adds)
    pub const JUMP_VELOCITY: f32 = -6.0;

    /// Frames between obstacle spawns (~1.5s at 60 Hz)
    pub const SPAWN_INTERVAL: u64 = 90;
    /// Spawn offset is `SPAWN_OFFSET_BASE - uniform(0..SPAWN_OFFSET_SPAN)`
    pub const SPAWN_OFFSET_BASE: i32 = -100;
    pub const SPAWN_OFFSET_SPAN: u32 = 250;

    /// Display refresh the simulation is tuned for
    pub const TARGET_FPS: u32 = 60;
}
