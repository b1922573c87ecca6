//! Per-frame simulation tick
//!
//! Core game loop that advances the simulation by one display frame. Within
//! a frame the order is fixed: paddle input, brick collision, wall/paddle/miss
//! resolution, phase timers, ball integration, moving bricks, particles and
//! finally the message timer. Collision decisions always use the ball
//! position from the end of the previous frame.

use glam::Vec2;

use super::collision::{
    ball_in_paddle_band, brick_overlap_bounce, confine_to_bounds, enforce_min_speed, wall_contact,
};
use super::level::{LevelParams, generate_grid};
use super::particles::{spawn_burst, spawn_trail, update_particles};
use super::state::{Ball, GameEvent, GamePhase, GameState, Paddle};
use crate::consts::*;
use crate::step_scale;

/// Input sampled for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer/touch x relative to the field's left edge, if it moved
    pub pointer_x: Option<f32>,
    /// Left arrow held
    pub left: bool,
    /// Right arrow held
    pub right: bool,
    /// Restart request (click/tap); only honoured after game over
    pub restart: bool,
}

/// Advance the game by one frame that took `elapsed_ms` of wall time
///
/// Phase timers see the full elapsed time; motion integrates at most
/// `MAX_FRAME_MS` so a long stall can't tunnel the ball through bricks.
pub fn tick(state: &mut GameState, input: &TickInput, elapsed_ms: f32) {
    let elapsed_ms = if elapsed_ms.is_finite() { elapsed_ms.max(0.0) } else { 0.0 };
    state.clock_ms += elapsed_ms as f64;
    let step_ms = elapsed_ms.min(MAX_FRAME_MS);
    let scale = step_scale(step_ms);

    if input.restart && state.phase == GamePhase::GameOver {
        reset_game(state);
    }

    update_paddle(state, input, step_ms);

    if state.phase == GamePhase::Playing {
        resolve_brick_collision(state);
    }
    if state.phase == GamePhase::Playing {
        resolve_field_bounds(state, scale);
    }

    advance_phase_timers(state);

    if state.phase == GamePhase::Playing {
        state.ball.pos += state.ball.vel * scale;
        if state.trails {
            spawn_trail(&mut state.particles, &mut state.rng, state.ball.pos, state.particle_cap);
        }
    }

    if matches!(state.phase, GamePhase::Playing | GamePhase::Waiting) {
        update_moving_bricks(state, scale);
    }

    update_particles(&mut state.particles, scale);
    state.message.tick();
}

/// Apply pointer and keyboard input, keeping the paddle on the field
fn update_paddle(state: &mut GameState, input: &TickInput, step_ms: f32) {
    let field_width = state.tuning.field_width;
    if let Some(x) = input.pointer_x {
        state.paddle.follow_pointer(x, field_width);
    }

    let key_step = PADDLE_KEY_SPEED * step_ms / FRAME_60HZ_MS;
    if input.right {
        state.paddle.nudge(key_step, field_width);
    } else if input.left {
        state.paddle.nudge(-key_step, field_width);
    }
}

/// Test the ball centre against alive bricks; the first hit in grid order wins
fn resolve_brick_collision(state: &mut GameState) {
    let ball_pos = state.ball.pos;
    let Some((column, row)) = state
        .grid
        .iter()
        .find(|b| b.is_alive() && b.bounds().contains_point(ball_pos))
        .map(|b| (b.column, b.row))
    else {
        return;
    };

    state.ball.vel.y = -state.ball.vel.y;

    let Some(brick) = state.grid.get_mut(column, row) else {
        return;
    };
    if !brick.hit() {
        state.push_event(GameEvent::BrickHit { column, row });
        return;
    }
    let points = brick.points;
    let center = brick.bounds().center();

    state.bricks_remaining = state.bricks_remaining.saturating_sub(1);
    log::debug!(
        "Brick ({}, {}) broken for {} points, {} left",
        column,
        row,
        points,
        state.bricks_remaining
    );
    state.push_event(GameEvent::BrickBroken { column, row, points });

    spawn_burst(
        &mut state.particles,
        &mut state.rng,
        center,
        state.grid.hue,
        state.tuning.burst_particles,
        state.particle_cap,
    );

    award_points(state, points as u64);

    if state.bricks_remaining == 0 {
        complete_level(state);
    }
}

/// Add score, track the high score and fire milestone side effects
pub fn award_points(state: &mut GameState, points: u64) {
    state.score += points;

    if state.score > state.high_score {
        state.high_score = state.score;
        if !state.high_score_announced {
            state.high_score_announced = true;
            state.push_event(GameEvent::NewHighScore { score: state.score });
        }
    }

    // Edge-triggered: a single big jump fires once, not once per multiple
    let milestone = state.score / state.tuning.milestone_interval;
    if milestone > state.milestones_reached {
        state.milestones_reached = milestone;
        state.push_event(GameEvent::Milestone {
            score: milestone * state.tuning.milestone_interval,
        });
    }

    let bonus = state.score / state.tuning.extra_life_interval;
    if bonus > state.extra_lives_reached {
        let gained = u8::try_from(bonus - state.extra_lives_reached).unwrap_or(u8::MAX);
        state.extra_lives_reached = bonus;
        let lives = state.lives.saturating_add(gained).min(state.tuning.max_lives);
        if lives > state.lives {
            state.lives = lives;
            log::info!("Extra life at {} points, {} lives", state.score, lives);
            state.push_event(GameEvent::ExtraLife { lives });
        }
    }
}

/// Walls, ceiling, paddle band and the bottom edge
fn resolve_field_bounds(state: &mut GameState, scale: f32) {
    let tuning = &state.tuning;
    let (field_width, field_height, min_speed) =
        (tuning.field_width, tuning.field_height, tuning.min_axis_speed);

    let next = state.ball.projected(scale);
    let contact = wall_contact(next, state.ball.radius, field_width);
    if contact.any() {
        state.ball.vel = enforce_min_speed(contact.reflect(state.ball.vel), min_speed);
        state.push_event(GameEvent::WallBounce);
    }
    if contact.ceiling {
        return;
    }

    if ball_in_paddle_band(state.ball.pos, next, &state.paddle.bounds()) {
        // Strictly upward: a sign flip could bounce twice inside the band
        state.ball.send_upward();
        state.ball.vel = enforce_min_speed(state.ball.vel, min_speed);
        state.push_event(GameEvent::PaddleHit);
    } else if next.y > field_height && state.phase != GamePhase::GameOver {
        lose_life(state);
    }
}

fn complete_level(state: &mut GameState) {
    log::info!("Level {} complete, score {}", state.level, state.score);
    state.message.show(format!("Level {} Complete!", state.level));
    state.push_event(GameEvent::LevelComplete { level: state.level });
    state.enter_phase(GamePhase::Paused);
}

fn lose_life(state: &mut GameState) {
    state.push_event(GameEvent::BallLost);
    state.lives = state.lives.saturating_sub(1);

    if state.lives == 0 {
        log::info!("Game over at level {} with {} points", state.level, state.score);
        state.message.show("Game Over");
        state.push_event(GameEvent::GameOver { score: state.score });
        state.enter_phase(GamePhase::GameOver);
        return;
    }

    let lives_left = state.lives;
    state.message.show(if lives_left == 1 {
        "1 life left".to_string()
    } else {
        format!("{} lives left", lives_left)
    });
    state.push_event(GameEvent::LifeLost { lives_left });
    respawn(state, BALL_SPAWN_OFFSET);
    state.enter_phase(GamePhase::Waiting);
}

/// Ball back above the paddle heading up, paddle centred
fn respawn(state: &mut GameState, height_above_bottom: f32) {
    state.ball.pos = Vec2::new(
        state.tuning.field_width / 2.0,
        state.tuning.field_height - height_above_bottom,
    );
    state.ball.send_upward();
    state.paddle = Paddle::new(&state.tuning);
}

/// Poll phase timers: waiting ends after the start delay, a cleared level
/// becomes the next level after the level delay
fn advance_phase_timers(state: &mut GameState) {
    match state.phase {
        GamePhase::Waiting if state.time_in_phase() >= state.tuning.start_delay_ms as f64 => {
            state.enter_phase(GamePhase::Playing);
        }
        GamePhase::Paused if state.time_in_phase() >= state.tuning.level_delay_ms as f64 => {
            start_next_level(state);
        }
        _ => {}
    }
}

/// Regenerate the grid for the next level and speed the ball up
pub fn start_next_level(state: &mut GameState) {
    let tuning = &state.tuning;
    let (speedup, max_axis) = (tuning.level_speedup, tuning.max_axis_speed);
    state.ball.accelerate(speedup, max_axis);
    respawn(state, BALL_LEVEL_SPAWN_OFFSET);

    state.level += 1;
    load_level(state);

    state.message.show(format!("Level {}", state.level));
    state.push_event(GameEvent::LevelStarted { level: state.level });
    state.enter_phase(GamePhase::Waiting);
}

/// Full reset: score, level, lives, grid, ball and paddle
///
/// Entering the waiting phase restamps the phase clock, so a level
/// transition that was pending when the reset happened can never fire.
pub fn reset_game(state: &mut GameState) {
    let tuning = &state.tuning;
    state.ball = Ball::new(
        Vec2::new(tuning.field_width / 2.0, tuning.field_height - BALL_SPAWN_OFFSET),
        Vec2::new(tuning.ball_start_dx, tuning.ball_start_dy),
        tuning.ball_radius,
    );
    state.paddle = Paddle::new(tuning);
    state.lives = tuning.starting_lives;
    state.score = 0;
    state.level = 1;
    state.milestones_reached = 0;
    state.extra_lives_reached = 0;
    state.high_score_announced = false;
    state.particles.clear();
    state.message.clear();

    load_level(state);
    log::info!("New game (seed {}, high score {})", state.seed, state.high_score);

    state.push_event(GameEvent::LevelStarted { level: 1 });
    state.enter_phase(GamePhase::Waiting);
}

fn load_level(state: &mut GameState) {
    let params = LevelParams::for_level(state.level, &state.tuning);
    state.grid = generate_grid(&params, &state.tuning, &mut state.rng);
    state.bricks_remaining = state.grid.alive_count();
}

/// Slide moving bricks, bounce them off the zone edges and each other
fn update_moving_bricks(state: &mut GameState, scale: f32) {
    if !state.grid.has_moving() {
        return;
    }
    let zone = state.grid.zone(state.tuning.field_width);

    for brick in state.grid.iter_mut().filter(|b| b.is_alive() && b.is_moving()) {
        brick.pos += brick.vel * scale;
        brick.vel = confine_to_bounds(&brick.bounds(), brick.vel, &zone);
    }

    // O(n^2) over at most 136 bricks
    let snapshot: Vec<_> = state
        .grid
        .iter()
        .filter(|b| b.is_alive())
        .map(|b| (b.column, b.row, b.bounds()))
        .collect();

    for brick in state.grid.iter_mut().filter(|b| b.is_alive() && b.is_moving()) {
        for &(column, row, other) in &snapshot {
            if (column, row) == (brick.column, brick.row) {
                continue;
            }
            if let Some(vel) = brick_overlap_bounce(&brick.bounds(), brick.vel, &other) {
                brick.vel = vel;
                brick.pos += vel;
            }
        }
    }
}
