//! Runtime configuration read from `CUPSTACK_*` environment variables.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// Game configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Seed for round generation; random when unset.
    pub seed: u32,
    pub best_time_path: PathBuf,
    pub log_path: PathBuf,
    pub muted: bool,
    /// Animation playback speed multiplier.
    pub animation_speed: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: clock_seed(),
            best_time_path: PathBuf::from("cupstack_best_time.json"),
            log_path: PathBuf::from("cupstack.log"),
            muted: false,
            animation_speed: 1.0,
        }
    }
}

impl Config {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from an arbitrary key lookup. Unparseable values fall back to
    /// the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let seed = non_empty("CUPSTACK_SEED")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.seed);

        let best_time_path = non_empty("CUPSTACK_BEST_TIME_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.best_time_path);

        let log_path = non_empty("CUPSTACK_LOG_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.log_path);

        let muted = non_empty("CUPSTACK_MUTED")
            .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
            .unwrap_or(defaults.muted);

        let animation_speed = non_empty("CUPSTACK_ANIMATION_SPEED")
            .and_then(|s| s.parse::<f32>().ok())
            .filter(|v| v.is_finite() && *v > 0.0)
            .unwrap_or(defaults.animation_speed);

        Self {
            seed,
            best_time_path,
            log_path,
            muted,
            animation_speed,
        }
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.best_time_path, PathBuf::from("cupstack_best_time.json"));
        assert_eq!(config.log_path, PathBuf::from("cupstack.log"));
        assert!(!config.muted);
        assert_eq!(config.animation_speed, 1.0);
    }

    #[test]
    fn test_reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("CUPSTACK_SEED", "42"),
            ("CUPSTACK_BEST_TIME_PATH", "/tmp/best.json"),
            ("CUPSTACK_LOG_PATH", " /tmp/game.log "),
            ("CUPSTACK_MUTED", "TRUE"),
            ("CUPSTACK_ANIMATION_SPEED", "2.5"),
        ]));
        assert_eq!(config.seed, 42);
        assert_eq!(config.best_time_path, PathBuf::from("/tmp/best.json"));
        assert_eq!(config.log_path, PathBuf::from("/tmp/game.log"));
        assert!(config.muted);
        assert_eq!(config.animation_speed, 2.5);
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = Config::from_lookup(lookup(&[
            ("CUPSTACK_MUTED", "maybe"),
            ("CUPSTACK_ANIMATION_SPEED", "-1"),
            ("CUPSTACK_LOG_PATH", "   "),
        ]));
        assert!(!config.muted);
        assert_eq!(config.animation_speed, 1.0);
        assert_eq!(config.log_path, PathBuf::from("cupstack.log"));
    }
}
