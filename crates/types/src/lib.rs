//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the game.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, effect driver, terminal rendering).
//!
//! # Rounds
//!
//! A game is [`MAX_ROUNDS`] rounds long. Every round builds one pyramid per side,
//! except round [`SINGLE_STACK_ROUND`] which builds a single centred pyramid of
//! height [`SINGLE_STACK_HEIGHT`]. Two-stack rounds draw each height from
//! `MIN_STACK_HEIGHT..=MAX_STACK_HEIGHT` and never use the same height twice.
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `STACK_ANIMATION_MS` | 700 | Cup flying onto / off a stack |
//! | `ROLL_ANIMATION_MS` | 1200 | Cups rolling off between rounds |
//! | `BIRD_FLIGHT_MS` | 2500 | Bird crossing the screen between rounds |
//! | `TRANSITION_SETTLE_MS` | 100 | Buffer added to transition animations |
//! | `ADVANCE_DELAY_MS` | 10 | Correct key → phase advancement |
//! | `SHAKE_MS` | 300 | Input lockout after a wrong key |
//! | `ROUND_START_DELAY_MS` | 100 | Transition finished → next round |
//! | `TIMER_TICK_MS` | 100 | Elapsed-time display refresh |
//!
//! # Examples
//!
//! ```
//! use cupstack_types::{Phase, Side, LETTER_POOL};
//!
//! assert_eq!(Phase::StackLeft.side(), Some(Side::Left));
//! assert!(Phase::UnstackRight.is_unstacking());
//! assert_eq!(Phase::from_str("stack_right"), Some(Phase::StackRight));
//! assert_eq!(LETTER_POOL.len(), 26);
//! ```

/// Number of rounds in a game.
pub const MAX_ROUNDS: u32 = 4;

/// The round that builds a single, centred stack.
pub const SINGLE_STACK_ROUND: u32 = 3;

/// Height of the single-stack round's pyramid (15 cups).
pub const SINGLE_STACK_HEIGHT: u32 = 5;

/// Smallest pyramid height in a two-stack round.
pub const MIN_STACK_HEIGHT: u32 = 2;

/// Largest pyramid height in a two-stack round.
pub const MAX_STACK_HEIGHT: u32 = 4;

/// Letters a cup can carry.
pub const LETTER_POOL: [char; 26] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R',
    'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

/// Cup sprite width in layout units.
pub const CUP_WIDTH: f32 = 128.0;

/// Cup sprite height in layout units.
pub const CUP_HEIGHT: f32 = 128.0;

/// Vertical distance between pyramid levels.
pub const LEVEL_OFFSET: f32 = 80.0;

/// Horizontal distance between cups of one level.
pub const CUP_SPACING: f32 = 100.0;

/// Base line of every pyramid, as a percentage of the area height.
pub const BASE_Y_PERCENT: f32 = 85.0;

/// Horizontal centre of the left pyramid (percent of area width).
pub const LEFT_STACK_X_PERCENT: f32 = 30.0;

/// Horizontal centre of the right pyramid (percent of area width).
pub const RIGHT_STACK_X_PERCENT: f32 = 70.0;

/// Horizontal centre of the single-stack pyramid (percent of area width).
pub const CENTER_STACK_X_PERCENT: f32 = 50.0;

pub const STACK_ANIMATION_MS: u32 = 700;
pub const ROLL_ANIMATION_MS: u32 = 1200;
pub const BIRD_FLIGHT_MS: u32 = 2500;
pub const TRANSITION_SETTLE_MS: u32 = 100;
pub const CORRECT_FLASH_MS: u32 = 150;
pub const INCORRECT_FLASH_MS: u32 = 200;
pub const ADVANCE_DELAY_MS: u32 = 10;
pub const SHAKE_MS: u32 = 300;
pub const ROUND_START_DELAY_MS: u32 = 100;
pub const TIMER_TICK_MS: u32 = 100;

/// Key under which the best time is persisted.
pub const BEST_TIME_KEY: &str = "cupStackTypingBestTime";

/// Volume of the instruction voice-over.
pub const INSTRUCTION_VOLUME: f32 = 0.5;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_defaults() {
        assert_eq!(MAX_ROUNDS, 4);
        assert_eq!(SINGLE_STACK_ROUND, 3);
        assert_eq!(SINGLE_STACK_HEIGHT, 5);
        assert!(MIN_STACK_HEIGHT < MAX_STACK_HEIGHT);
        assert!(SINGLE_STACK_ROUND <= MAX_ROUNDS);
    }

    #[test]
    fn letter_pool_is_unique_uppercase() {
        for (i, a) in LETTER_POOL.iter().enumerate() {
            assert!(a.is_ascii_uppercase());
            assert!(!LETTER_POOL[i + 1..].contains(a));
        }
    }

    #[test]
    fn phase_order_is_canonical() {
        assert_eq!(
            Phase::ORDER,
            [
                Phase::StackLeft,
                Phase::StackRight,
                Phase::UnstackLeft,
                Phase::UnstackRight
            ]
        );
        assert_eq!(Phase::Transition.side(), None);
        assert!(!Phase::Transition.is_stacking());
        assert!(!Phase::Transition.is_unstacking());
    }
}

/// Which pyramid a cup belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

/// The current sub-task of a round.
///
/// The four working phases run in [`Phase::ORDER`]; `Transition` marks the
/// changeover between rounds and never has an active cup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    StackLeft,
    StackRight,
    UnstackLeft,
    UnstackRight,
    Transition,
}

impl Phase {
    /// Canonical phase order within a round.
    pub const ORDER: [Phase; 4] = [
        Phase::StackLeft,
        Phase::StackRight,
        Phase::UnstackLeft,
        Phase::UnstackRight,
    ];

    /// Side this phase works on (`None` for `Transition`).
    pub fn side(&self) -> Option<Side> {
        match self {
            Phase::StackLeft | Phase::UnstackLeft => Some(Side::Left),
            Phase::StackRight | Phase::UnstackRight => Some(Side::Right),
            Phase::Transition => None,
        }
    }

    pub fn is_stacking(&self) -> bool {
        matches!(self, Phase::StackLeft | Phase::StackRight)
    }

    pub fn is_unstacking(&self) -> bool {
        matches!(self, Phase::UnstackLeft | Phase::UnstackRight)
    }

    /// Parse phase from its snake_case name.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "stack_left" => Some(Phase::StackLeft),
            "stack_right" => Some(Phase::StackRight),
            "unstack_left" => Some(Phase::UnstackLeft),
            "unstack_right" => Some(Phase::UnstackRight),
            "transition" => Some(Phase::Transition),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::StackLeft => "stack_left",
            Phase::StackRight => "stack_right",
            Phase::UnstackLeft => "unstack_left",
            Phase::UnstackRight => "unstack_right",
            Phase::Transition => "transition",
        }
    }
}

/// Top-level screen of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Screen {
    #[default]
    Start,
    Instructions,
    Playing,
    Paused,
    GameOver,
}

/// Menu/navigation actions a player can take outside of typing letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    /// Start screen → instructions
    Start,
    /// Instructions → first round
    Play,
    /// Game over → new game
    PlayAgain,
    Pause,
    Resume,
    /// Abandon the session and return to the start screen
    Home,
    ToggleMute,
}

/// Sound effects the core can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    Instruction,
    EndCard,
    CupStack,
    CupRolling,
    CorrectType,
    IncorrectType,
    ButtonClick,
    BirdFly,
}

impl SoundEffect {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundEffect::Instruction => "instruction",
            SoundEffect::EndCard => "end_card",
            SoundEffect::CupStack => "cup_stack",
            SoundEffect::CupRolling => "cup_rolling",
            SoundEffect::CorrectType => "correct_type",
            SoundEffect::IncorrectType => "incorrect_type",
            SoundEffect::ButtonClick => "button_click",
            SoundEffect::BirdFly => "bird_fly",
        }
    }
}

/// Visual transitions performed by the animation collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationKind {
    /// Cup flies from the staging area onto its slot
    Stack,
    /// Cup is knocked off its slot
    Unstack,
    /// Green letter flash after a correct key
    FlashCorrect,
    /// Red letter flash after a wrong key
    FlashIncorrect,
    /// Target shakes after a wrong key
    Shake,
    /// All cups roll off screen at the end of a round
    RollOff,
    /// Bird crosses the screen at the end of a round
    BirdFly,
}

impl AnimationKind {
    /// Nominal playback time, including any settle buffer.
    pub fn duration_ms(&self) -> u32 {
        match self {
            AnimationKind::Stack | AnimationKind::Unstack => STACK_ANIMATION_MS,
            AnimationKind::FlashCorrect => CORRECT_FLASH_MS,
            AnimationKind::FlashIncorrect => INCORRECT_FLASH_MS,
            AnimationKind::Shake => SHAKE_MS,
            AnimationKind::RollOff => ROLL_ANIMATION_MS + TRANSITION_SETTLE_MS,
            AnimationKind::BirdFly => BIRD_FLIGHT_MS + TRANSITION_SETTLE_MS,
        }
    }
}

/// How an animation ended. Both outcomes count as completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationOutcome {
    Completed,
    Interrupted,
}

/// A position in layout units (origin top-left).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Size of the play area in layout units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AreaSize {
    pub width: f32,
    pub height: f32,
}

impl AreaSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}
