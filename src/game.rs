//! Frame driver
//!
//! [`Game`] owns the session state and its storage, runs one simulation tick
//! per animation frame and writes the high score back whenever it rises.

use crate::audio::SoundCue;
use crate::highscores::HighScore;
use crate::persistence::KeyValueStore;
use crate::platform::FrameClock;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, TickInput, reset_game, tick};
use crate::tuning::Tuning;

pub struct Game<S: KeyValueStore> {
    pub state: GameState,
    settings: Settings,
    high_score: HighScore,
    clock: FrameClock,
    store: S,
}

impl<S: KeyValueStore> Game<S> {
    /// Start a session, restoring the high score and settings from `store`
    pub fn new(store: S, tuning: Tuning, seed: u64) -> Self {
        let high_score = HighScore::load(&store);
        let settings = Settings::load(&store);
        let mut state = GameState::new(tuning, seed, high_score.best);
        settings.apply(&mut state);

        Self {
            state,
            settings,
            high_score,
            clock: FrameClock::new(),
            store,
        }
    }

    /// Run one animation frame stamped `timestamp_ms`
    pub fn frame(&mut self, timestamp_ms: f64, input: &TickInput) -> Vec<GameEvent> {
        let elapsed = self.clock.advance(timestamp_ms);
        self.step(elapsed, input)
    }

    /// Run one tick of `elapsed_ms` and return the events it produced
    pub fn step(&mut self, elapsed_ms: f32, input: &TickInput) -> Vec<GameEvent> {
        tick(&mut self.state, input, elapsed_ms);

        if self.high_score.record(self.state.high_score) {
            self.high_score.save(&mut self.store);
        }

        self.state.drain_events()
    }

    /// Reset to level 1 from any phase
    pub fn restart(&mut self) {
        reset_game(&mut self.state);
    }

    /// Drop the frame clock's last timestamp so a long pause isn't one giant frame
    pub fn resume(&mut self) {
        self.clock.reset();
    }

    pub fn high_score(&self) -> u64 {
        self.high_score.best
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace settings, apply them to the running game and persist them
    pub fn set_settings(&mut self, settings: Settings) {
        settings.apply(&mut self.state);
        settings.save(&mut self.store);
        self.settings = settings;
    }

    /// Browsers only allow audio after a user gesture
    pub fn enable_sound(&mut self) {
        if !self.settings.sound_enabled {
            self.settings.sound_enabled = true;
            log::info!("Sound enabled");
        }
    }

    /// Sound cues for a batch of events
    pub fn sound_cues(&self, events: &[GameEvent]) -> Vec<SoundCue> {
        events
            .iter()
            .filter_map(|e| SoundCue::for_event(e, &self.settings))
            .collect()
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
