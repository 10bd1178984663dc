//! Input gate - validates keystrokes against the active cup.
//!
//! A keystroke is only considered while a round is being played, input is
//! not blocked and a cup is active. Any considered keystroke blocks input
//! until its feedback is over: a correct key until the phase machine has
//! picked the next cup, a wrong key until the shake has finished. The active
//! cup is never reassigned here.

use tracing::{debug, warn};

use crate::command::Deferred;
use crate::session::GameSession;
use crate::types::*;

/// What a keystroke did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Not accepted (wrong screen, blocked, no active cup, not a letter).
    Ignored,
    /// Matched the active cup, which was stacked or unstacked.
    Correct { cup: usize },
    /// Did not match the active cup.
    Incorrect { cup: usize },
}

impl GameSession {
    /// Feed a typed character to the game.
    pub fn key_press(&mut self, key: char) -> KeyOutcome {
        if self.screen != Screen::Playing || self.input_blocked {
            return KeyOutcome::Ignored;
        }
        let Some(index) = self.active else {
            return KeyOutcome::Ignored;
        };

        let key = key.to_ascii_uppercase();
        if !LETTER_POOL.contains(&key) {
            return KeyOutcome::Ignored;
        }

        let Some(cup) = self.cups.get(index).copied() else {
            warn!(index, "active cup index has no cup");
            return KeyOutcome::Ignored;
        };

        self.input_blocked = true;

        if key != cup.letter {
            debug!(expected = %cup.letter, got = %key, "incorrect key");
            self.play(SoundEffect::IncorrectType, 1.0);
            self.animate(AnimationKind::Shake, Some(index));
            self.animate(AnimationKind::FlashIncorrect, Some(index));
            self.schedule(Deferred::Unblock);
            return KeyOutcome::Incorrect { cup: index };
        }

        debug!(letter = %key, unstacking = cup.is_stacked, "correct key");
        self.play(SoundEffect::CorrectType, 1.0);
        self.animate(AnimationKind::FlashCorrect, Some(index));
        if cup.is_stacked {
            self.cups[index].is_stacked = false;
            self.animate(AnimationKind::Unstack, Some(index));
        } else {
            self.cups[index].is_stacked = true;
            self.animate(AnimationKind::Stack, Some(index));
        }
        self.play(SoundEffect::CupStack, 1.0);
        self.schedule(Deferred::AdvancePhase);

        KeyOutcome::Correct { cup: index }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Command;

    fn playing() -> GameSession {
        let mut s = GameSession::new(17);
        s.apply(SessionAction::Start);
        s.apply(SessionAction::Play);
        s.take_commands();
        s
    }

    fn wrong_letter(s: &GameSession) -> char {
        let letter = s.active_cup().unwrap().letter;
        if letter == 'A' {
            'B'
        } else {
            'A'
        }
    }

    #[test]
    fn test_correct_key_stacks_and_blocks() {
        let mut s = playing();
        let index = s.active().unwrap();
        let letter = s.active_cup().unwrap().letter;

        assert_eq!(s.key_press(letter), KeyOutcome::Correct { cup: index });
        assert!(s.cups()[index].is_stacked);
        assert!(s.input_blocked());
        // Active cup stays put until the phase machine runs.
        assert_eq!(s.active(), Some(index));

        let commands = s.take_commands();
        assert!(commands.contains(&Command::Animate {
            kind: AnimationKind::Stack,
            cup: Some(index)
        }));
        assert!(commands.iter().any(|c| matches!(
            c,
            Command::Schedule {
                deferred: Deferred::AdvancePhase,
                after_ms: ADVANCE_DELAY_MS,
                ..
            }
        )));
    }

    #[test]
    fn test_lowercase_key_matches() {
        let mut s = playing();
        let letter = s.active_cup().unwrap().letter.to_ascii_lowercase();
        assert!(matches!(s.key_press(letter), KeyOutcome::Correct { .. }));
    }

    #[test]
    fn test_blocked_input_is_ignored() {
        let mut s = playing();
        let letter = s.active_cup().unwrap().letter;
        s.key_press(letter);
        assert_eq!(s.key_press(letter), KeyOutcome::Ignored);
    }

    #[test]
    fn test_non_letters_are_ignored() {
        let mut s = playing();
        assert_eq!(s.key_press('1'), KeyOutcome::Ignored);
        assert_eq!(s.key_press(' '), KeyOutcome::Ignored);
        assert!(!s.input_blocked());
    }

    #[test]
    fn test_incorrect_key_shakes_then_unblocks() {
        let mut s = playing();
        let index = s.active().unwrap();
        let wrong = wrong_letter(&s);

        assert_eq!(s.key_press(wrong), KeyOutcome::Incorrect { cup: index });
        assert!(!s.cups()[index].is_stacked);
        assert!(s.input_blocked());

        let commands = s.take_commands();
        assert!(commands.contains(&Command::Animate {
            kind: AnimationKind::Shake,
            cup: Some(index)
        }));
        assert!(commands.contains(&Command::PlaySound {
            effect: SoundEffect::IncorrectType,
            volume: 1.0
        }));

        let generation = s.generation();
        s.fire(Deferred::Unblock, generation);
        assert!(!s.input_blocked());
        assert_eq!(s.active(), Some(index));
    }

    #[test]
    fn test_unstacking_clears_flag() {
        let mut s = playing();
        let generation = s.generation();
        while s.phase().is_stacking() {
            let letter = s.active_cup().unwrap().letter;
            s.key_press(letter);
            s.fire(Deferred::AdvancePhase, generation);
        }
        assert!(s.phase().is_unstacking());
        let index = s.active().unwrap();
        assert!(s.cups()[index].is_stacked);
        let letter = s.cups()[index].letter;
        s.key_press(letter);
        assert!(!s.cups()[index].is_stacked);
    }

    #[test]
    fn test_ignored_outside_playing() {
        let mut s = GameSession::new(1);
        assert_eq!(s.key_press('A'), KeyOutcome::Ignored);
    }
}
