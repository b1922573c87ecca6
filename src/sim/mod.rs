//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only enters through the elapsed milliseconds passed to `tick`
//! - Seeded RNG only
//! - Stable iteration order (column-major over the brick grid)
//! - No rendering or platform dependencies

pub mod collision;
pub mod level;
pub mod particles;
pub mod state;
pub mod tick;

pub use collision::{
    Aabb, WallContact, ball_in_paddle_band, brick_overlap_bounce, confine_to_bounds,
    enforce_min_speed, wall_contact,
};
pub use level::{LevelParams, Pattern, generate_grid};
pub use particles::{Particle, ParticleKind, spawn_burst, spawn_trail, update_particles};
pub use state::{
    Ball, Brick, BrickGrid, BrickStatus, GameEvent, GamePhase, GameState, MAX_PARTICLES, Message,
    Paddle,
};
pub use tick::{TickInput, award_points, reset_game, start_next_level, tick};
