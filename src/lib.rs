//! Breakout - a single-screen brick breaking arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, level state machine)
//! - `game`: Frame driver tying the simulation to persistence
//! - `platform`: Frame clock and the browser bridge
//! - `persistence`: Key/value storage for high score and settings
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use highscores::HighScore;
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Velocities are expressed in pixels per this many milliseconds
    pub const REFERENCE_FRAME_MS: f32 = 10.0;
    /// Largest step the integrator will take (tab-switch lag would tunnel)
    pub const MAX_FRAME_MS: f32 = 30.0;
    /// Duration of one display refresh at 60 Hz
    pub const FRAME_60HZ_MS: f32 = 1000.0 / 60.0;

    /// Play field dimensions
    pub const FIELD_WIDTH: f32 = 515.0;
    pub const FIELD_HEIGHT: f32 = 350.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 75.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    /// Keyboard paddle speed, pixels per 60 Hz frame
    pub const PADDLE_KEY_SPEED: f32 = 7.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_START_DX: f32 = 2.0;
    pub const BALL_START_DY: f32 = -2.0;
    /// Spawn height above the field bottom on a fresh game or lost life
    pub const BALL_SPAWN_OFFSET: f32 = 100.0;
    /// Spawn height above the field bottom when a new level starts
    pub const BALL_LEVEL_SPAWN_OFFSET: f32 = 120.0;

    /// Brick layout
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_PADDING: f32 = 10.0;
    pub const BRICK_OFFSET_TOP: f32 = 30.0;
    pub const BRICK_OFFSET_LEFT: f32 = 35.0;
    pub const BRICK_ROWS_START: usize = 5;
    pub const BRICK_COLUMNS_START: usize = 7;
    pub const BRICK_ROWS_MAX: usize = 8;
    pub const BRICK_COLUMNS_MAX: usize = 17;

    /// Message fade: full opacity for the first frames, then a linear fade
    pub const MESSAGE_FADE_FRAMES: u32 = 120;
    pub const MESSAGE_OPAQUE_FRAMES: u32 = 60;
}

/// Scale factor applied to per-reference-interval velocities for a step of `delta_ms`
#[inline]
pub fn step_scale(delta_ms: f32) -> f32 {
    delta_ms / consts::REFERENCE_FRAME_MS
}

/// Hue (degrees) used to tint a level's bricks
#[inline]
pub fn level_hue(level: u32) -> u16 {
    ((level * 34) % 360) as u16
}
