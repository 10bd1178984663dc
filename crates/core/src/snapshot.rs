use crate::cup::Cup;
use crate::score::{format_seconds, round_tenths, ScoreOutcome};
use crate::types::{Phase, Screen, Side};

/// Read-only view of a session for renderers.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub screen: Screen,
    pub phase: Phase,
    /// Round shown to the player (never above `max_rounds`).
    pub round: u32,
    pub max_rounds: u32,
    pub elapsed_ms: u64,
    pub cups: Vec<Cup>,
    pub active: Option<usize>,
    pub input_blocked: bool,
    pub muted: bool,
    pub best_time: Option<f64>,
    pub score: Option<ScoreOutcome>,
}

impl GameSnapshot {
    pub fn active_cup(&self) -> Option<&Cup> {
        self.active.and_then(|i| self.cups.get(i))
    }

    pub fn elapsed_display(&self) -> String {
        format_seconds(round_tenths(self.elapsed_ms))
    }

    pub fn round_display(&self) -> String {
        format!("{}/{}", self.round, self.max_rounds)
    }

    /// Whether an empty slot should be drawn.
    ///
    /// During stacking only the active level of the active side shows its
    /// remaining empty slots.
    pub fn placeholder_visible(&self, index: usize) -> bool {
        let (Some(cup), Some(active)) = (self.cups.get(index), self.active_cup()) else {
            return false;
        };
        self.phase.is_stacking()
            && !cup.is_stacked
            && cup.side == active.side
            && cup.level == active.level
    }

    pub fn cups_on(&self, side: Side) -> impl Iterator<Item = (usize, &Cup)> {
        self.cups.iter().enumerate().filter(move |(_, c)| c.side == side)
    }
}
