//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the rules of the cup stacking typing game. It has
//! **no I/O**: effects are returned as [`Command`]s and delays come back in
//! as explicit calls, which makes it:
//!
//! - **Deterministic**: the same seed produces the same rounds and letters
//! - **Testable**: every rule can be driven step by step without timers
//! - **Portable**: terminal, GUI or headless drivers share the same core
//!
//! # Module Structure
//!
//! - [`layout`]: triangular slot indexing and cup coordinates
//! - [`round`]: round configurations and cup generation
//! - [`phase`]: stacking/unstacking order and phase advancement
//! - [`session`]: the explicit game session value (screens, rounds, timer)
//! - [`gate`]: keystroke validation against the active cup
//! - [`score`]: elapsed time and best-time persistence seam
//! - [`command`]: effect requests drained by a driver
//!
//! # Game Rules
//!
//! - Each round builds one or two pyramids of lettered cups
//! - Phases run stack-left, stack-right, unstack-left, unstack-right; empty phases are skipped
//! - Stacking fills the bottom row first, unstacking clears the top row first
//! - A wrong key locks input for a short shake; time keeps running
//! - After the last round the elapsed time is compared with the best time
//!
//! # Example
//!
//! ```
//! use cupstack_core::{Deferred, GameSession, KeyOutcome};
//! use cupstack_types::{Screen, SessionAction};
//!
//! let mut session = GameSession::new(12345);
//! session.apply(SessionAction::Start);
//! session.apply(SessionAction::Play);
//! assert_eq!(session.screen(), Screen::Playing);
//!
//! let letter = session.active_cup().unwrap().letter;
//! assert!(matches!(session.key_press(letter), KeyOutcome::Correct { .. }));
//!
//! // The driver calls back once the advance delay has passed.
//! let generation = session.generation();
//! session.fire(Deferred::AdvancePhase, generation);
//! assert!(!session.input_blocked());
//! ```

pub mod command;
pub mod cup;
pub mod error;
pub mod gate;
pub mod layout;
pub mod phase;
pub mod rng;
pub mod round;
pub mod score;
pub mod session;
pub mod snapshot;

pub use cupstack_types as types;

pub use command::{Command, Deferred, TransitionSet};
pub use cup::Cup;
pub use error::StoreError;
pub use gate::KeyOutcome;
pub use layout::{level_and_position, stack_position, Layout};
pub use phase::{advance, find_next_cup, initial_phase, Advance};
pub use rng::{draw_letters, LetterPool, SimpleRng};
pub use round::{triangular, RoundConfig, RoundGenerator, RoundRules};
pub use score::{
    format_seconds, load_best, record_time, round_tenths, BestTimeStore, ElapsedTimer, MemoryStore,
    ScoreOutcome,
};
pub use session::GameSession;
pub use snapshot::GameSnapshot;
