//! Browser bridge
//!
//! The host page owns the canvas, audio elements and DOM listeners. It feeds
//! pointer/key state in, calls `frame` from `requestAnimationFrame`, and reads
//! back JSON for drawing and sound.

use wasm_bindgen::prelude::*;

use crate::game::Game;
use crate::persistence::LocalStore;
use crate::sim::TickInput;
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Breakout starting...");
}

#[wasm_bindgen]
pub struct WebGame {
    game: Game<LocalStore>,
    input: TickInput,
}

#[wasm_bindgen]
impl WebGame {
    /// `tuning_json` may be empty for the default balance
    #[wasm_bindgen(constructor)]
    pub fn new(tuning_json: &str) -> WebGame {
        let tuning = if tuning_json.trim().is_empty() {
            Tuning::default()
        } else {
            Tuning::from_json(tuning_json).unwrap_or_else(|e| {
                log::warn!("Bad tuning JSON ({}), using defaults", e);
                Tuning::default()
            })
        };
        let seed = js_sys::Date::now() as u64;
        log::info!("Seed: {}", seed);

        WebGame {
            game: Game::new(LocalStore, tuning, seed),
            input: TickInput::default(),
        }
    }

    /// Pointer or touch x relative to the canvas
    pub fn pointer_move(&mut self, x: f32) {
        self.input.pointer_x = Some(x);
        self.game.enable_sound();
    }

    pub fn set_keys(&mut self, left: bool, right: bool) {
        self.input.left = left;
        self.input.right = right;
        if left || right {
            self.game.enable_sound();
        }
    }

    /// Click/tap: restarts after game over
    pub fn click(&mut self) {
        self.input.restart = true;
        self.game.enable_sound();
    }

    /// Tab became visible again
    pub fn resume(&mut self) {
        self.game.resume();
    }

    /// Run one frame; returns the sound cues it produced as JSON
    pub fn frame(&mut self, timestamp_ms: f64) -> String {
        let events = self.game.frame(timestamp_ms, &self.input);

        // One-shot inputs
        self.input.pointer_x = None;
        self.input.restart = false;

        let cues = self.game.sound_cues(&events);
        serde_json::to_string(&cues).unwrap_or_else(|_| "[]".to_string())
    }

    /// Full game state as JSON for the renderer
    pub fn snapshot(&self) -> String {
        serde_json::to_string(&self.game.state).unwrap_or_else(|e| {
            log::error!("Snapshot failed: {}", e);
            "{}".to_string()
        })
    }

    /// Fade alpha of the overlay message
    pub fn message_alpha(&self) -> f32 {
        self.game.state.message.alpha()
    }

    pub fn message_visible(&self) -> bool {
        self.game.state.message.is_visible()
    }

    /// Whether the renderer should draw the ball this frame
    pub fn ball_visible(&self) -> bool {
        self.game.state.ball_visible()
    }

    pub fn high_score(&self) -> f64 {
        self.game.high_score() as f64
    }
}
