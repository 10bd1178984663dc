//! Phase state machine - which cup is next, and when a phase is done.
//!
//! Stacking fills the deepest level first (the foundation row), unstacking
//! clears the top level first. Within a level cups go left to right.
//! These functions are pure over the cup slice; the session owns the state.

use crate::cup::Cup;
use crate::types::Phase;

/// Result of asking the phase machine to move on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The current phase still has work; `usize` is the next cup.
    Stay(usize),
    /// A later phase was entered with this cup.
    Enter(Phase, usize),
    /// Every phase is exhausted.
    RoundComplete,
    /// Called during `Transition`; nothing to do.
    Idle,
}

/// Index of the next cup for `phase`, or `None` when the phase has no work.
pub fn find_next_cup(cups: &[Cup], phase: Phase) -> Option<usize> {
    let side = phase.side()?;
    let stacking = phase.is_stacking();

    let candidates = || {
        cups.iter()
            .enumerate()
            .filter(move |(_, c)| c.side == side && c.qualifies_for(stacking))
    };

    let levels = candidates().map(|(_, c)| c.level);
    let level = if stacking { levels.max()? } else { levels.min()? };

    candidates()
        .filter(|(_, c)| c.level == level)
        .min_by_key(|(_, c)| c.position)
        .map(|(i, _)| i)
}

/// Phase a fresh round starts in.
pub fn initial_phase(cups: &[Cup]) -> Phase {
    [Phase::StackLeft, Phase::StackRight]
        .into_iter()
        .find(|&p| find_next_cup(cups, p).is_some())
        .unwrap_or(Phase::UnstackLeft)
}

/// Move from `current` to the next phase that has work.
pub fn advance(cups: &[Cup], current: Phase) -> Advance {
    if current == Phase::Transition {
        return Advance::Idle;
    }

    if let Some(i) = find_next_cup(cups, current) {
        return Advance::Stay(i);
    }

    let start = Phase::ORDER
        .iter()
        .position(|&p| p == current)
        .map_or(Phase::ORDER.len(), |i| i + 1);

    Phase::ORDER[start..]
        .iter()
        .find_map(|&p| find_next_cup(cups, p).map(|i| Advance::Enter(p, i)))
        .unwrap_or(Advance::RoundComplete)
}
