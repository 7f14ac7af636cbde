//! Data-driven game balance
//!
//! Per-level spawn pacing, speeds, hazard odds and score targets. The table
//! is immutable for the duration of a run; looking up an unknown level is a
//! caller bug and surfaces as `None` so integration code can fail fast.

/// Highest playable level
pub const MAX_LEVEL: u32 = 3;

/// Balance parameters for one level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelConfig {
    /// Horizontal step per frame before the multiplier and jitter
    pub base_speed: f32,
    pub speed_multiplier: f32,
    /// Probability of a hazard heart, in [0, 1]
    pub hazard_chance: f32,
    /// Starting spawn interval; decays over the run
    pub spawn_interval_ms: f32,
    /// Score needed to clear the level
    pub required_score: i32,
}

/// Look up the balance table for a 1-based level number
pub fn level_config(level: u32) -> Option<LevelConfig> {
    match level {
        1 => Some(LevelConfig {
            base_speed: 2.0,
            speed_multiplier: 1.0,
            hazard_chance: 0.1,
            spawn_interval_ms: 1500.0,
            required_score: 100,
        }),
        2 => Some(LevelConfig {
            base_speed: 3.0,
            speed_multiplier: 1.3,
            hazard_chance: 0.2,
            spawn_interval_ms: 1200.0,
            required_score: 120,
        }),
        3 => Some(LevelConfig {
            base_speed: 4.0,
            speed_multiplier: 1.6,
            hazard_chance: 0.3,
            spawn_interval_ms: 900.0,
            required_score: 150,
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_levels_present() {
        for level in 1..=MAX_LEVEL {
            assert!(level_config(level).is_some(), "level {}", level);
        }
        assert!(level_config(0).is_none());
        assert!(level_config(MAX_LEVEL + 1).is_none());
    }

    #[test]
    fn test_difficulty_ramps() {
        let configs: Vec<_> = (1..=MAX_LEVEL).map(|l| level_config(l).unwrap()).collect();
        for pair in configs.windows(2) {
            assert!(pair[1].base_speed > pair[0].base_speed);
            assert!(pair[1].hazard_chance > pair[0].hazard_chance);
            assert!(pair[1].spawn_interval_ms < pair[0].spawn_interval_ms);
            assert!(pair[1].required_score > pair[0].required_score);
        }
    }

    #[test]
    fn test_hazard_chance_in_unit_interval() {
        for level in 1..=MAX_LEVEL {
            let config = level_config(level).unwrap();
            assert!((0.0..=1.0).contains(&config.hazard_chance));
        }
    }
}
