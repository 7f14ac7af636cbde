//! Persisted player progress
//!
//! Per-level best scores and the unlock front, kept in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::tuning::MAX_LEVEL;

/// What changed after recording a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressUpdate {
    /// The run set a new best for its level
    pub new_best: bool,
    /// The run unlocked the next level
    pub unlocked_level: Option<u32>,
}

/// Saved progress across runs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Progress {
    /// Best score per level, indexed by level - 1
    pub best_scores: Vec<i32>,
    /// Levels 1..=unlocked_levels are playable
    pub unlocked_levels: u32,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            best_scores: vec![0; MAX_LEVEL as usize],
            unlocked_levels: 1,
        }
    }
}

impl Progress {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "heart_hunter_progress";

    pub fn new() -> Self {
        Self::default()
    }

    /// Best score recorded for a 1-based level
    pub fn best_score(&self, level: u32) -> i32 {
        level
            .checked_sub(1)
            .and_then(|i| self.best_scores.get(i as usize))
            .copied()
            .unwrap_or(0)
    }

    pub fn is_unlocked(&self, level: u32) -> bool {
        level >= 1 && level <= self.unlocked_levels
    }

    /// Record a finished run. The best only moves up, and success on the
    /// current unlock front opens the next level.
    pub fn record_run(&mut self, level: u32, score: i32, success: bool) -> ProgressUpdate {
        let mut update = ProgressUpdate {
            new_best: false,
            unlocked_level: None,
        };
        let Some(slot) = level
            .checked_sub(1)
            .and_then(|i| self.best_scores.get_mut(i as usize))
        else {
            log::warn!("Ignoring result for unknown level {}", level);
            return update;
        };
        if score > *slot {
            *slot = score;
            update.new_best = true;
        }
        if success && level < MAX_LEVEL && self.unlocked_levels <= level {
            self.unlocked_levels = level + 1;
            update.unlocked_level = Some(level + 1);
        }
        update
    }

    /// Wipe back to a fresh profile
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Load progress from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(progress) = serde_json::from_str::<Progress>(&json) {
                    log::info!(
                        "Loaded progress: {} level(s) unlocked",
                        progress.unlocked_levels
                    );
                    return progress;
                }
            }
        }

        log::info!("No saved progress, starting fresh");
        Self::new()
    }

    /// Save progress to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Progress saved");
            }
        }
    }

    /// Remove saved progress from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn clear_saved() {
        if let Some(storage) = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
        {
            let _ = storage.remove_item(Self::STORAGE_KEY);
            log::info!("Saved progress cleared");
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

    #[cfg(not(target_arch = "wasm32"))]
    pub fn clear_saved() {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_profile() {
        let progress = Progress::new();
        assert!(progress.is_unlocked(1));
        assert!(!progress.is_unlocked(2));
        assert_eq!(progress.best_score(1), 0);
    }

    #[test]
    fn test_best_only_improves() {
        let mut progress = Progress::new();
        let update = progress.record_run(1, 40, false);
        assert!(update.new_best);
        let update = progress.record_run(1, 25, false);
        assert!(!update.new_best);
        assert_eq!(progress.best_score(1), 40);
    }

    #[test]
    fn test_success_unlocks_next_level_once() {
        let mut progress = Progress::new();
        let update = progress.record_run(1, 120, true);
        assert_eq!(update.unlocked_level, Some(2));
        assert!(progress.is_unlocked(2));
        // Replaying a cleared level does not re-announce the unlock
        let update = progress.record_run(1, 130, true);
        assert_eq!(update.unlocked_level, None);
        assert_eq!(progress.unlocked_levels, 2);
    }

    #[test]
    fn test_failure_never_unlocks() {
        let mut progress = Progress::new();
        progress.record_run(1, 99, false);
        assert!(!progress.is_unlocked(2));
    }

    #[test]
    fn test_last_level_success_has_nothing_to_unlock() {
        let mut progress = Progress::new();
        progress.unlocked_levels = MAX_LEVEL;
        let update = progress.record_run(MAX_LEVEL, 200, true);
        assert_eq!(update.unlocked_level, None);
        assert_eq!(progress.unlocked_levels, MAX_LEVEL);
    }

    #[test]
    fn test_reset() {
        let mut progress = Progress::new();
        progress.record_run(1, 120, true);
        progress.reset();
        assert_eq!(progress.unlocked_levels, 1);
        assert_eq!(progress.best_score(1), 0);
    }

    #[test]
    fn test_json_round_trip() {
        let mut progress = Progress::new();
        progress.record_run(1, 120, true);
        progress.record_run(2, -4, false);
        let json = serde_json::to_string(&progress).unwrap();
        let back: Progress = serde_json::from_str(&json).unwrap();
        assert_eq!(back.best_scores, progress.best_scores);
        assert_eq!(back.unlocked_levels, progress.unlocked_levels);
    }
}
