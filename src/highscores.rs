//! Persisted high score
//!
//! A single number stored under one key, read at startup and rewritten
//! whenever the running score beats it.

use crate::persistence::KeyValueStore;

/// Best score seen on this device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighScore {
    pub best: u64,
}

impl HighScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "breakoutHighScore";

    pub fn new(best: u64) -> Self {
        Self { best }
    }

    /// Record a score. Returns true if it beat the stored best.
    pub fn record(&mut self, score: u64) -> bool {
        if score > self.best {
            self.best = score;
            true
        } else {
            false
        }
    }

    /// Load from storage; a missing or unreadable value counts as 0
    pub fn load(store: &impl KeyValueStore) -> Self {
        let Some(raw) = store.get_item(Self::STORAGE_KEY) else {
            log::info!("No high score found, starting fresh");
            return Self::default();
        };

        // Older saves may hold a float, e.g. "120" written as "120.0"
        let parsed = raw
            .trim()
            .parse::<u64>()
            .ok()
            .or_else(|| raw.trim().parse::<f64>().ok().filter(|v| *v >= 0.0).map(|v| v as u64));

        match parsed {
            Some(best) => {
                log::info!("Loaded high score {}", best);
                Self::new(best)
            }
            None => {
                log::warn!("Ignoring unreadable high score {:?}", raw);
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &mut impl KeyValueStore) {
        store.set_item(Self::STORAGE_KEY, &self.best.to_string());
        log::debug!("High score saved ({})", self.best);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_record_only_raises() {
        let mut high = HighScore::new(50);
        assert!(!high.record(40));
        assert!(!high.record(50));
        assert!(high.record(51));
        assert_eq!(high.best, 51);
    }

    #[test]
    fn test_load_defaults_to_zero() {
        let store = MemoryStore::new();
        assert_eq!(HighScore::load(&store).best, 0);
    }

    #[test]
    fn test_save_and_load() {
        let mut store = MemoryStore::new();
        HighScore::new(1234).save(&mut store);
        assert_eq!(store.get_item(HighScore::STORAGE_KEY).as_deref(), Some("1234"));
        assert_eq!(HighScore::load(&store).best, 1234);
    }

    #[test]
    fn test_load_tolerates_bad_values() {
        let mut store = MemoryStore::new();
        store.set_item(HighScore::STORAGE_KEY, "120.0");
        assert_eq!(HighScore::load(&store).best, 120);

        store.set_item(HighScore::STORAGE_KEY, "lots");
        assert_eq!(HighScore::load(&store).best, 0);

        store.set_item(HighScore::STORAGE_KEY, "-5");
        assert_eq!(HighScore::load(&store).best, 0);
    }
}
