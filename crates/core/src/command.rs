//! Effect requests emitted by the session.
//!
//! The session never performs I/O or waits. It appends [`Command`]s to an
//! outbox that the driver drains after every call and carries out against
//! the render/audio/animation collaborators.

use arrayvec::ArrayVec;

use crate::cup::Cup;
use crate::types::*;

/// Work the session wants done later, after a fixed delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Deferred {
    /// Pick the next cup after a correct key.
    AdvancePhase,
    /// Re-open input after the wrong-key shake.
    Unblock,
    /// Build the next round once the transition is over.
    StartRound,
}

impl Deferred {
    pub fn delay_ms(&self) -> u32 {
        match self {
            Deferred::AdvancePhase => ADVANCE_DELAY_MS,
            Deferred::Unblock => SHAKE_MS,
            Deferred::StartRound => ROUND_START_DELAY_MS,
        }
    }
}

/// Animations that together make up a round transition.
pub type TransitionSet = ArrayVec<AnimationKind, 4>;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Place a cup's slot (placeholder or cup) at `at`.
    Render { index: usize, cup: Cup, at: Point },
    /// Drop every cup visual.
    ClearArea,
    PlaySound { effect: SoundEffect, volume: f32 },
    /// Silence a long-running or looping sound.
    StopSound(SoundEffect),
    SetMuted(bool),
    /// Fire-and-forget cup effect; gameplay does not wait for it.
    Animate {
        kind: AnimationKind,
        cup: Option<usize>,
    },
    /// Call back [`crate::GameSession::fire`] after `after_ms`.
    Schedule {
        deferred: Deferred,
        after_ms: u32,
        generation: u32,
    },
    /// Run all animations concurrently, then call back
    /// [`crate::GameSession::transition_finished`] once every one has ended.
    Transition {
        animations: TransitionSet,
        generation: u32,
    },
    /// The game is over; compare against the best time.
    RecordTime { seconds: f64 },
    /// Abort every pending timer and transition.
    CancelPending,
}
