//! Data-driven game balance
//!
//! Every gameplay constant the state machine consults lives in [`Tuning`].
//! Defaults reproduce the classic single-screen game; a JSON document can
//! override any subset of fields.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// How many points a broken brick is worth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScorePolicy {
    /// Every brick is worth the same
    Flat { points: u32 },
    /// Higher rows pay more: `top - row`, never below 1
    RowBonus { top: u32 },
    /// Multi-hit bricks pay per hit point they started with
    HitPoints { per_hit: u32 },
}

impl Default for ScorePolicy {
    fn default() -> Self {
        ScorePolicy::RowBonus { top: 5 }
    }
}

impl ScorePolicy {
    /// Point value for a brick in `row` that starts with `hit_points`
    pub fn points_for(&self, row: usize, hit_points: u8) -> u32 {
        match *self {
            ScorePolicy::Flat { points } => points,
            ScorePolicy::RowBonus { top } => top.saturating_sub(row as u32).max(1),
            ScorePolicy::HitPoints { per_hit } => per_hit * hit_points.max(1) as u32,
        }
    }
}

/// Gameplay balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub field_width: f32,
    pub field_height: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub ball_radius: f32,
    /// Initial ball velocity (pixels per reference interval)
    pub ball_start_dx: f32,
    pub ball_start_dy: f32,
    /// Floor applied to each velocity axis after a wall or paddle reflection
    pub min_axis_speed: f32,
    /// Ceiling applied to each velocity axis when a level speeds the ball up
    pub max_axis_speed: f32,
    /// Multiplicative speed-up applied at every level transition
    pub level_speedup: f32,
    /// Ball stays frozen this long after entering the waiting phase
    pub start_delay_ms: f32,
    /// Pause between clearing a level and generating the next one
    pub level_delay_ms: f32,
    pub starting_lives: u8,
    pub max_lives: u8,
    pub score_policy: ScorePolicy,
    /// Every multiple of this score fires a milestone event
    pub milestone_interval: u64,
    /// Every multiple of this score grants an extra life
    pub extra_life_interval: u64,
    pub multi_hit_from_level: u32,
    pub multi_hit_chance: f32,
    pub max_hit_points: u8,
    pub moving_from_level: u32,
    pub moving_chance: f32,
    /// Horizontal speed of moving bricks (pixels per reference interval)
    pub moving_speed: f32,
    /// Disintegration particles spawned per broken brick
    pub burst_particles: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            ball_radius: BALL_RADIUS,
            ball_start_dx: BALL_START_DX,
            ball_start_dy: BALL_START_DY,
            min_axis_speed: 1.0,
            max_axis_speed: 6.0,
            level_speedup: 1.1,
            start_delay_ms: 2000.0,
            level_delay_ms: 2000.0,
            starting_lives: 3,
            max_lives: 9,
            score_policy: ScorePolicy::default(),
            milestone_interval: 100,
            extra_life_interval: 1000,
            multi_hit_from_level: 2,
            multi_hit_chance: 0.2,
            max_hit_points: 3,
            moving_from_level: 3,
            moving_chance: 0.15,
            moving_speed: 0.6,
            burst_particles: 12,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    /// Clamp values that would make the simulation degenerate
    pub fn sanitized(mut self) -> Self {
        let defaults = Tuning::default();

        if !(self.field_width > 0.0 && self.field_height > 0.0) {
            log::warn!("Invalid field size {}x{}, using defaults", self.field_width, self.field_height);
            self.field_width = defaults.field_width;
            self.field_height = defaults.field_height;
        }
        if !(self.paddle_width > 0.0 && self.paddle_width < self.field_width) {
            log::warn!("Paddle width {} out of range, using default", self.paddle_width);
            self.paddle_width = defaults.paddle_width.min(self.field_width / 2.0);
        }
        if self.ball_radius <= 0.0 {
            log::warn!("Ball radius {} out of range, using default", self.ball_radius);
            self.ball_radius = defaults.ball_radius;
        }
        if self.min_axis_speed <= 0.0 {
            log::warn!("min_axis_speed must be positive, using default");
            self.min_axis_speed = defaults.min_axis_speed;
        }
        if self.max_axis_speed < self.min_axis_speed {
            log::warn!(
                "max_axis_speed {} below min_axis_speed {}, raising",
                self.max_axis_speed,
                self.min_axis_speed
            );
            self.max_axis_speed = self.min_axis_speed;
        }
        if !self.ball_start_dx.is_finite() || self.ball_start_dx.abs() < self.min_axis_speed {
            log::warn!("ball_start_dx {} too slow, raising to min_axis_speed", self.ball_start_dx);
            let sign = if self.ball_start_dx.is_finite() { self.ball_start_dx.signum() } else { 1.0 };
            self.ball_start_dx = self.min_axis_speed * sign;
        }
        if !self.ball_start_dy.is_finite() || self.ball_start_dy.abs() < self.min_axis_speed {
            log::warn!("ball_start_dy {} too slow, raising to min_axis_speed", self.ball_start_dy);
            self.ball_start_dy = -self.min_axis_speed;
        }
        if self.ball_start_dy > 0.0 {
            log::warn!("ball_start_dy {} points down, flipping", self.ball_start_dy);
            self.ball_start_dy = -self.ball_start_dy;
        }
        if self.level_speedup < 1.0 {
            log::warn!("level_speedup {} would slow the ball, clamping to 1.0", self.level_speedup);
            self.level_speedup = 1.0;
        }
        self.start_delay_ms = self.start_delay_ms.max(0.0);
        self.level_delay_ms = self.level_delay_ms.max(0.0);
        if self.starting_lives == 0 {
            log::warn!("starting_lives must be at least 1");
            self.starting_lives = 1;
        }
        self.max_lives = self.max_lives.max(self.starting_lives);
        self.milestone_interval = self.milestone_interval.max(1);
        self.extra_life_interval = self.extra_life_interval.max(1);
        self.max_hit_points = self.max_hit_points.max(1);
        self.multi_hit_chance = self.multi_hit_chance.clamp(0.0, 1.0);
        self.moving_chance = self.moving_chance.clamp(0.0, 1.0);
        self.moving_speed = self.moving_speed.max(0.0);
        self
    }

    /// Y coordinate of the paddle's top edge
    pub fn paddle_top(&self) -> f32 {
        self.field_height - self.paddle_height - self.paddle_height * 2.0
    }

    /// Paddle x that centres it in the field
    pub fn paddle_center_x(&self) -> f32 {
        (self.field_width - self.paddle_width) / 2.0
    }
}
