//! Particle physics for brick bursts and the ball trail
//!
//! Purely visual: nothing here feeds back into gameplay. Rendering is left
//! to the caller; only motion and lifetime are simulated.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Downward pull on burst particles (pixels per reference interval, per interval)
const BURST_GRAVITY: f32 = 0.05;
/// Life lost per reference interval
const BURST_DECAY: f32 = 0.02;
const TRAIL_DECAY: f32 = 0.06;
/// Launch speed range of burst particles
const BURST_SPEED_MIN: f32 = 0.5;
const BURST_SPEED_MAX: f32 = 2.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    /// Fragment of a broken brick
    Burst,
    /// Fading dot left behind the ball
    Trail,
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub kind: ParticleKind,
    pub pos: Vec2,
    pub vel: Vec2,
    /// 1.0 at spawn, removed at 0.0; doubles as render alpha
    pub life: f32,
    pub size: f32,
    /// Tint (degrees), copied from the brick grid
    pub hue: u16,
}

impl Particle {
    /// Advance by `scale` reference intervals. Returns false once expired.
    pub fn update(&mut self, scale: f32) -> bool {
        match self.kind {
            ParticleKind::Burst => {
                self.vel.y += BURST_GRAVITY * scale;
                self.pos += self.vel * scale;
                self.life -= BURST_DECAY * scale;
            }
            ParticleKind::Trail => {
                self.pos += self.vel * scale;
                self.life -= TRAIL_DECAY * scale;
                self.size *= 1.0 - 0.02 * scale;
            }
        }
        self.life > 0.0
    }
}

/// Spawn a ring of fragments where a brick broke
pub fn spawn_burst<R: Rng>(
    particles: &mut Vec<Particle>,
    rng: &mut R,
    center: Vec2,
    hue: u16,
    count: usize,
    cap: usize,
) {
    let room = cap.saturating_sub(particles.len());
    for _ in 0..count.min(room) {
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let speed = rng.random_range(BURST_SPEED_MIN..BURST_SPEED_MAX);
        particles.push(Particle {
            kind: ParticleKind::Burst,
            pos: center,
            vel: Vec2::from_angle(angle) * speed,
            life: 1.0,
            size: rng.random_range(2.0..4.0),
            hue,
        });
    }
}

/// Drop one trail particle at the ball's position
pub fn spawn_trail<R: Rng>(particles: &mut Vec<Particle>, rng: &mut R, pos: Vec2, cap: usize) {
    if particles.len() >= cap {
        return;
    }
    let jitter = Vec2::new(rng.random_range(-0.1..0.1), rng.random_range(-0.1..0.1));
    particles.push(Particle {
        kind: ParticleKind::Trail,
        pos,
        vel: jitter,
        life: 1.0,
        size: 6.0,
        hue: 0,
    });
}

/// Advance every particle and drop the expired ones
pub fn update_particles(particles: &mut Vec<Particle>, scale: f32) {
    particles.retain_mut(|p| p.update(scale));
}
