//! Best-score persistence
//!
//! A single best score per browser, stored in LocalStorage under a versioned
//! key. Recorded live whenever the running score exceeds it, so a closed tab
//! never loses a record.

use serde::{Deserialize, Serialize};

/// Persisted best score
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HighScore {
    pub score: u64,
}

impl HighScore {
    /// LocalStorage key (used only in wasm32); bump the suffix when the
    /// stored format changes
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "lung_defender_highscore_v1";

    pub fn new() -> Self {
        Self::default()
    }

    /// Record a score if it beats the stored best. Returns whether a new
    /// record was set; persisting is the caller's job via [`Self::save`].
    pub fn record(&mut self, score: u64) -> bool {
        if score > self.score {
            self.score = score;
            true
        } else {
            false
        }
    }

    /// Load the best score from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(best) = serde_json::from_str::<HighScore>(&json) {
                    log::info!("Loaded high score: {}", best.score);
                    return best;
                }
            }
        }

        log::info!("No high score found, starting fresh");
        Self::new()
    }

    /// Save the best score to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_only_on_improvement() {
        let mut best = HighScore::new();
        assert!(best.record(100));
        assert_eq!(best.score, 100);

        // Same score is not a new record
        assert!(!best.record(100));
        assert!(!best.record(50));
        assert_eq!(best.score, 100);

        assert!(best.record(101));
        assert_eq!(best.score, 101);
    }

    #[test]
    fn test_zero_is_never_a_record() {
        let mut best = HighScore::new();
        assert!(!best.record(0));
        assert_eq!(best.score, 0);
    }

    #[test]
    fn test_serde_round_trip() {
        let best = HighScore { score: 4321 };
        let json = serde_json::to_string(&best).unwrap();
        assert_eq!(serde_json::from_str::<HighScore>(&json).unwrap(), best);
    }
}
