//! Timer and score module - elapsed play time and the persisted best time.
//!
//! Time only accumulates through [`ElapsedTimer::tick`], so the core stays
//! deterministic. Scores are compared at one decimal place of seconds.

use tracing::{info, warn};

use crate::error::StoreError;

/// Elapsed play time in milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ElapsedTimer {
    elapsed_ms: u64,
    running: bool,
}

impl ElapsedTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn reset(&mut self) {
        self.elapsed_ms = 0;
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn tick(&mut self, elapsed_ms: u32) {
        if self.running {
            self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms as u64);
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn seconds(&self) -> f64 {
        round_tenths(self.elapsed_ms)
    }
}

/// Milliseconds to seconds, rounded to one decimal place.
pub fn round_tenths(ms: u64) -> f64 {
    (ms as f64 / 100.0).round() / 10.0
}

/// Seconds as shown to the player (`"12.3"`).
pub fn format_seconds(seconds: f64) -> String {
    format!("{seconds:.1}")
}

/// Key-value persistence of the best time.
pub trait BestTimeStore {
    /// `Ok(None)` when nothing has been stored yet.
    fn load(&self) -> Result<Option<f64>, StoreError>;
    fn save(&mut self, seconds: f64) -> Result<(), StoreError>;
}

/// In-memory store, optionally failing every call.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<f64>,
    broken: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(seconds: f64) -> Self {
        Self {
            value: Some(seconds),
            broken: false,
        }
    }

    /// A store whose every load and save fails.
    pub fn broken() -> Self {
        Self {
            value: None,
            broken: true,
        }
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }
}

impl BestTimeStore for MemoryStore {
    fn load(&self) -> Result<Option<f64>, StoreError> {
        if self.broken {
            return Err(StoreError::Unavailable);
        }
        Ok(self.value)
    }

    fn save(&mut self, seconds: f64) -> Result<(), StoreError> {
        if self.broken {
            return Err(StoreError::Unavailable);
        }
        self.value = Some(seconds);
        Ok(())
    }
}

/// Result of finishing a game.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreOutcome {
    pub time: f64,
    /// Best time after this game (equals `time` on a new best).
    pub best: Option<f64>,
    pub new_best: bool,
}

/// Read the best time, treating failures and nonsense values as absent.
pub fn load_best(store: &dyn BestTimeStore) -> Option<f64> {
    match store.load() {
        Ok(Some(v)) if v.is_finite() && v >= 0.0 => Some(v),
        Ok(Some(v)) => {
            warn!(value = v, "ignoring invalid best time");
            None
        }
        Ok(None) => None,
        Err(e) => {
            warn!(error = %e, "could not load best time");
            None
        }
    }
}

/// Compare `time` to the stored best and persist it when it is better.
pub fn record_time(store: &mut dyn BestTimeStore, time: f64) -> ScoreOutcome {
    let best = load_best(store);
    match best {
        Some(b) if time >= b => ScoreOutcome {
            time,
            best,
            new_best: false,
        },
        _ => {
            if let Err(e) = store.save(time) {
                warn!(error = %e, "could not save best time");
            }
            info!(time, previous = ?best, "new best time");
            ScoreOutcome {
                time,
                best: Some(time),
                new_best: true,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_only_counts_while_running() {
        let mut t = ElapsedTimer::new();
        t.tick(500);
        assert_eq!(t.elapsed_ms(), 0);
        t.start();
        t.tick(1250);
        t.stop();
        t.tick(1000);
        assert_eq!(t.elapsed_ms(), 1250);
        assert_eq!(t.seconds(), 1.3);
        t.reset();
        assert_eq!(t.elapsed_ms(), 0);
        assert!(!t.is_running());
    }

    #[test]
    fn test_round_tenths_and_format() {
        assert_eq!(round_tenths(0), 0.0);
        assert_eq!(round_tenths(12_340), 12.3);
        assert_eq!(format_seconds(round_tenths(9_960)), "10.0");
    }

    #[test]
    fn test_first_time_is_new_best() {
        let mut store = MemoryStore::new();
        let out = record_time(&mut store, 42.5);
        assert!(out.new_best);
        assert_eq!(out.best, Some(42.5));
        assert_eq!(store.value(), Some(42.5));
    }

    #[test]
    fn test_slower_time_keeps_best() {
        let mut store = MemoryStore::with_value(30.0);
        let out = record_time(&mut store, 30.0);
        assert!(!out.new_best);
        assert_eq!(out.best, Some(30.0));
        assert_eq!(store.value(), Some(30.0));
    }

    #[test]
    fn test_faster_time_replaces_best() {
        let mut store = MemoryStore::with_value(30.0);
        let out = record_time(&mut store, 29.9);
        assert!(out.new_best);
        assert_eq!(store.value(), Some(29.9));
    }

    #[test]
    fn test_broken_store_is_not_fatal() {
        let mut store = MemoryStore::broken();
        assert_eq!(load_best(&store), None);
        let out = record_time(&mut store, 10.0);
        assert!(out.new_best);
        assert_eq!(out.best, Some(10.0));
    }

    #[test]
    fn test_invalid_stored_value_is_ignored() {
        let store = MemoryStore::with_value(f64::NAN);
        assert_eq!(load_best(&store), None);
    }
}
