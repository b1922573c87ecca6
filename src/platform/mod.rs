//! Platform glue
//!
//! - `FrameClock`: turns animation-frame timestamps into elapsed time
//! - `web`: wasm-bindgen bridge for the browser page (WASM only)

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Elapsed time between animation-frame callbacks
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds since the previous timestamp
    ///
    /// The first call, and any timestamp that goes backwards, yields 0.
    pub fn advance(&mut self, timestamp_ms: f64) -> f32 {
        let elapsed = match self.last_ms {
            Some(last) if timestamp_ms >= last => timestamp_ms - last,
            _ => 0.0,
        };
        self.last_ms = Some(timestamp_ms);
        elapsed as f32
    }

    /// Forget the last timestamp (e.g. after the tab was hidden)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}
