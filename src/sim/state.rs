//! Game state and core simulation types
//!
//! Everything the renderer reads and the state machine mutates lives here,
//! owned by a single [`GameState`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::level::Pattern;
use super::particles::Particle;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball in flight
    Playing,
    /// Ball frozen for a short delay after a reset, lost life or new level
    Waiting,
    /// Level cleared, next grid not generated yet
    Paused,
    /// Out of lives, waiting for a restart
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Playing => "playing",
            GamePhase::Waiting => "waiting",
            GamePhase::Paused => "paused",
            GamePhase::GameOver => "gameover",
        }
    }
}

/// Discrete things that happened during a tick, for audio/visual hooks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Multi-hit brick lost a hit point but survived
    BrickHit { column: usize, row: usize },
    BrickBroken { column: usize, row: usize, points: u32 },
    PaddleHit,
    WallBounce,
    /// Ball left through the bottom of the field
    BallLost,
    LifeLost { lives_left: u8 },
    LevelComplete { level: u32 },
    LevelStarted { level: u32 },
    GameOver { score: u64 },
    /// First time this game the score passed the stored high score
    NewHighScore { score: u64 },
    Milestone { score: u64 },
    ExtraLife { lives: u8 },
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Pixels per reference interval
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self { pos, vel, radius }
    }

    /// Position after a step of `scale` reference intervals
    #[inline]
    pub fn projected(&self, scale: f32) -> Vec2 {
        self.pos + self.vel * scale
    }

    /// Force the ball to travel upward
    pub fn send_upward(&mut self) {
        self.vel.y = -self.vel.y.abs();
    }

    /// Scale velocity, keeping each axis within `max_axis`
    pub fn accelerate(&mut self, factor: f32, max_axis: f32) {
        let scaled = self.vel * factor;
        self.vel = Vec2::new(
            scaled.x.clamp(-max_axis, max_axis),
            scaled.y.clamp(-max_axis, max_axis),
        );
    }
}

/// The player's paddle (y is fixed by the tuning)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Paddle {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            x: tuning.paddle_center_x(),
            y: tuning.paddle_top(),
            width: tuning.paddle_width,
            height: tuning.paddle_height,
        }
    }

    /// Keep the paddle inside `[0, field_width - width]`
    pub fn clamp(&mut self, field_width: f32) {
        self.x = self.x.clamp(0.0, (field_width - self.width).max(0.0));
    }

    /// Centre the paddle on a pointer x. Pointers outside the field are ignored.
    pub fn follow_pointer(&mut self, pointer_x: f32, field_width: f32) {
        if pointer_x > 0.0 && pointer_x < field_width {
            self.x = pointer_x - self.width / 2.0;
            self.clamp(field_width);
        }
    }

    pub fn nudge(&mut self, dx: f32, field_width: f32) {
        self.x += dx;
        self.clamp(field_width);
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(Vec2::new(self.x, self.y), Vec2::new(self.width, self.height))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrickStatus {
    Alive,
    Broken,
}

/// A brick cell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub column: usize,
    pub row: usize,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub status: BrickStatus,
    pub hit_points: u8,
    /// Score awarded when the brick breaks
    pub points: u32,
    /// Zero for stationary bricks
    pub vel: Vec2,
}

impl Brick {
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.status == BrickStatus::Alive
    }

    #[inline]
    pub fn is_moving(&self) -> bool {
        self.vel != Vec2::ZERO
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Take one hit. Returns true if the brick broke.
    pub fn hit(&mut self) -> bool {
        self.hit_points = self.hit_points.saturating_sub(1);
        if self.hit_points == 0 {
            self.status = BrickStatus::Broken;
            true
        } else {
            false
        }
    }
}

/// Column-major grid of bricks, indexed `[column][row]`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrickGrid {
    pub columns: usize,
    pub rows: usize,
    /// Tint (degrees) for this level
    pub hue: u16,
    pub pattern: Pattern,
    pub cells: Vec<Vec<Brick>>,
}

impl BrickGrid {
    pub fn get(&self, column: usize, row: usize) -> Option<&Brick> {
        self.cells.get(column)?.get(row)
    }

    pub fn get_mut(&mut self, column: usize, row: usize) -> Option<&mut Brick> {
        self.cells.get_mut(column)?.get_mut(row)
    }

    /// Every cell in column-major order
    pub fn iter(&self) -> impl Iterator<Item = &Brick> {
        self.cells.iter().flatten()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Brick> {
        self.cells.iter_mut().flatten()
    }

    pub fn alive_count(&self) -> usize {
        self.iter().filter(|b| b.is_alive()).count()
    }

    pub fn has_moving(&self) -> bool {
        self.iter().any(|b| b.is_alive() && b.is_moving())
    }

    /// Region moving bricks bounce around in: full field width, brick rows only
    pub fn zone(&self, field_width: f32) -> Aabb {
        let height = self.rows as f32 * (BRICK_HEIGHT + BRICK_PADDING) - BRICK_PADDING;
        Aabb::new(
            Vec2::new(0.0, BRICK_OFFSET_TOP),
            Vec2::new(field_width, height.max(BRICK_HEIGHT)),
        )
    }
}

/// Centre-screen text with a frame-counted fade
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    /// Frames left on screen
    pub timer: u32,
}

impl Message {
    pub fn show(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.timer = MESSAGE_FADE_FRAMES;
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.timer = 0;
    }

    pub fn is_visible(&self) -> bool {
        self.timer > 0
    }

    /// Opaque for the first frames, then fades linearly to zero
    pub fn alpha(&self) -> f32 {
        let fade_frames = MESSAGE_FADE_FRAMES - MESSAGE_OPAQUE_FRAMES;
        if self.timer == 0 {
            0.0
        } else if self.timer < fade_frames {
            self.timer as f32 / fade_frames as f32
        } else {
            1.0
        }
    }

    /// Count down one frame
    pub fn tick(&mut self) {
        self.timer = self.timer.saturating_sub(1);
    }
}

/// Complete game session state
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    pub tuning: Tuning,
    /// Run seed for reproducibility
    pub seed: u64,
    #[serde(skip)]
    pub rng: Pcg32,
    /// 1-based level number
    pub level: u32,
    pub lives: u8,
    pub score: u64,
    pub high_score: u64,
    pub phase: GamePhase,
    /// Simulation clock (milliseconds of wall time fed to `tick`)
    pub clock_ms: f64,
    /// Clock value when the current phase was entered
    pub phase_entered_ms: f64,
    pub ball: Ball,
    pub paddle: Paddle,
    pub grid: BrickGrid,
    /// Always equal to `grid.alive_count()`
    pub bricks_remaining: usize,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub particle_cap: usize,
    pub trails: bool,
    pub message: Message,
    /// Highest milestone multiple already announced
    pub milestones_reached: u64,
    /// Highest extra-life multiple already granted
    pub extra_lives_reached: u64,
    /// Whether this game already announced a new high score
    pub high_score_announced: bool,
    /// Events produced since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

/// Default particle budget when no settings are applied
pub const MAX_PARTICLES: usize = 256;

impl GameState {
    /// Create a new session, ready to start in the waiting phase
    pub fn new(tuning: Tuning, seed: u64, high_score: u64) -> Self {
        let tuning = tuning.sanitized();
        let mut state = Self {
            ball: Ball::new(Vec2::ZERO, Vec2::ZERO, tuning.ball_radius),
            paddle: Paddle::new(&tuning),
            grid: BrickGrid {
                columns: 0,
                rows: 0,
                hue: 0,
                pattern: Pattern::Full,
                cells: Vec::new(),
            },
            tuning,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            level: 1,
            lives: 0,
            score: 0,
            high_score,
            phase: GamePhase::Waiting,
            clock_ms: 0.0,
            phase_entered_ms: 0.0,
            bricks_remaining: 0,
            particles: Vec::new(),
            particle_cap: MAX_PARTICLES,
            trails: true,
            message: Message::default(),
            milestones_reached: 0,
            extra_lives_reached: 0,
            high_score_announced: false,
            events: Vec::new(),
        };
        super::tick::reset_game(&mut state);
        state
    }

    /// Switch phase and remember when it happened
    pub fn enter_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            log::info!("Phase {} -> {} (level {})", self.phase.as_str(), phase.as_str(), self.level);
        }
        self.phase = phase;
        self.phase_entered_ms = self.clock_ms;
    }

    /// Milliseconds spent in the current phase
    pub fn time_in_phase(&self) -> f64 {
        self.clock_ms - self.phase_entered_ms
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take every event produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Ball is drawn while it is in play or about to be
    pub fn ball_visible(&self) -> bool {
        matches!(self.phase, GamePhase::Playing | GamePhase::Waiting)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paddle_clamps_to_field() {
        let tuning = Tuning::default();
        let mut paddle = Paddle::new(&tuning);
        paddle.nudge(-1000.0, tuning.field_width);
        assert_eq!(paddle.x, 0.0);
        paddle.nudge(1000.0, tuning.field_width);
        assert_eq!(paddle.x, tuning.field_width - tuning.paddle_width);
    }

    #[test]
    fn test_paddle_follows_pointer_inside_field_only() {
        let tuning = Tuning::default();
        let mut paddle = Paddle::new(&tuning);
        paddle.follow_pointer(200.0, tuning.field_width);
        assert_eq!(paddle.x, 200.0 - 37.5);

        paddle.follow_pointer(-5.0, tuning.field_width);
        assert_eq!(paddle.x, 200.0 - 37.5);

        // Near the edge the paddle stops at the wall
        paddle.follow_pointer(10.0, tuning.field_width);
        assert_eq!(paddle.x, 0.0);
    }

    #[test]
    fn test_brick_hit_points() {
        let mut brick = Brick {
            column: 0,
            row: 0,
            pos: Vec2::ZERO,
            size: Vec2::new(55.0, 20.0),
            status: BrickStatus::Alive,
            hit_points: 2,
            points: 5,
            vel: Vec2::ZERO,
        };
        assert!(!brick.hit());
        assert!(brick.is_alive());
        assert!(brick.hit());
        assert!(!brick.is_alive());
    }

    #[test]
    fn test_ball_accelerate_caps_each_axis() {
        let mut ball = Ball::new(Vec2::ZERO, Vec2::new(2.0, -5.8), 10.0);
        ball.accelerate(1.1, 6.0);
        assert!((ball.vel.x - 2.2).abs() < 1e-5);
        assert_eq!(ball.vel.y, -6.0);
    }

    #[test]
    fn test_message_fade() {
        let mut message = Message::default();
        assert_eq!(message.alpha(), 0.0);

        message.show("Level 2");
        assert_eq!(message.alpha(), 1.0);
        for _ in 0..60 {
            message.tick();
        }
        // Half way through: fade just starting
        assert_eq!(message.timer, 60);
        assert_eq!(message.alpha(), 1.0);
        for _ in 0..30 {
            message.tick();
        }
        assert!((message.alpha() - 0.5).abs() < 1e-6);
        for _ in 0..100 {
            message.tick();
        }
        assert!(!message.is_visible());
        assert_eq!(message.alpha(), 0.0);
    }

    #[test]
    fn test_new_state_starts_waiting_on_level_one() {
        let state = GameState::new(Tuning::default(), 1, 40);
        assert_eq!(state.phase, GamePhase::Waiting);
        assert_eq!(state.level, 1);
        assert_eq!(state.lives, 3);
        assert_eq!(state.high_score, 40);
        assert_eq!(state.bricks_remaining, 35);
        assert_eq!(state.bricks_remaining, state.grid.alive_count());
        assert_eq!(state.ball.pos, Vec2::new(257.5, 250.0));
    }

    #[test]
    fn test_ball_hidden_between_levels_and_after_game_over() {
        let mut state = GameState::new(Tuning::default(), 1, 0);
        assert!(state.ball_visible());
        state.enter_phase(GamePhase::Paused);
        assert!(!state.ball_visible());
        state.enter_phase(GamePhase::GameOver);
        assert!(!state.ball_visible());
    }
}
