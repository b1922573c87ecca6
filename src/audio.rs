//! Sound cues for simulation events
//!
//! The simulation only reports what happened; this module decides which
//! sample to play and how. Actual playback belongs to the host page.

use serde::Serialize;

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SoundEffect {
    /// Ball hits paddle
    PaddleHit,
    /// Ball hits a side wall or the ceiling
    WallHit,
    /// Multi-hit brick takes damage
    BrickHit,
    /// Brick breaks
    BrickBreak,
    /// Ball falls out the bottom
    Lose,
    /// Level cleared
    Win,
    /// Out of lives
    GameOver,
    /// New high score, milestones and extra lives
    Fanfare,
}

/// A sound to play
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SoundCue {
    pub effect: SoundEffect,
    /// Sample playback rate (1.0 = unchanged pitch)
    pub playback_rate: f32,
    pub volume: f32,
}

/// Playback rate for a broken brick: higher rows ring higher
pub fn brick_pitch(row: usize) -> f32 {
    const MAX_PITCH: f32 = 1.6;
    (MAX_PITCH - row as f32 * 0.15).max(0.7)
}

impl SoundCue {
    /// Cue for an event, or `None` when muted or the event is silent
    pub fn for_event(event: &GameEvent, settings: &Settings) -> Option<SoundCue> {
        let volume = settings.effective_volume();
        if volume <= 0.0 {
            return None;
        }

        let (effect, playback_rate) = match *event {
            GameEvent::BrickBroken { row, .. } => (SoundEffect::BrickBreak, brick_pitch(row)),
            GameEvent::BrickHit { row, .. } => (SoundEffect::BrickHit, brick_pitch(row)),
            GameEvent::PaddleHit => (SoundEffect::PaddleHit, 1.0),
            GameEvent::WallBounce => (SoundEffect::WallHit, 1.0),
            GameEvent::BallLost => (SoundEffect::Lose, 1.0),
            GameEvent::LevelComplete { .. } => (SoundEffect::Win, 1.0),
            GameEvent::GameOver { .. } => (SoundEffect::GameOver, 1.0),
            GameEvent::NewHighScore { .. } | GameEvent::ExtraLife { .. } => (SoundEffect::Fanfare, 1.0),
            GameEvent::Milestone { .. } => (SoundEffect::Fanfare, 1.25),
            GameEvent::LifeLost { .. } | GameEvent::LevelStarted { .. } => return None,
        };

        Some(SoundCue {
            effect,
            playback_rate,
            volume,
        })
    }
}
