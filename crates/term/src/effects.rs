//! Terminal animations.
//!
//! [`TermAnimator`] records every animation it is asked to play on a shared
//! [`EffectBoard`] and reports completion after the animation's duration.
//! The view reads the board each frame to draw flashes, shakes, the roll-off
//! and the bird.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use tokio::sync::oneshot;

use crate::engine::{Animator, TimedAnimator};
use crate::types::{AnimationKind, AnimationOutcome};

/// One running (or finished) animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Effect {
    pub kind: AnimationKind,
    pub target: Option<usize>,
    pub started: Instant,
    pub duration: Duration,
}

impl Effect {
    pub fn new(kind: AnimationKind, target: Option<usize>, started: Instant, duration: Duration) -> Self {
        Self {
            kind,
            target,
            started,
            duration,
        }
    }

    /// Fraction played at `now`, in `0.0..=1.0`.
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    pub fn is_over(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= self.duration
    }
}

#[derive(Debug, Clone, Default)]
pub struct EffectBoard {
    effects: Rc<RefCell<Vec<Effect>>>,
}

impl EffectBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, effect: Effect) {
        self.effects.borrow_mut().push(effect);
    }

    /// Effects still playing at `now`; finished ones are dropped.
    pub fn active(&self, now: Instant) -> Vec<Effect> {
        let mut effects = self.effects.borrow_mut();
        effects.retain(|e| !e.is_over(now));
        effects.clone()
    }

    pub fn clear(&self) {
        self.effects.borrow_mut().clear();
    }
}

/// Animator that plays effects through the terminal view.
///
/// Must be used from inside a tokio runtime.
#[derive(Debug, Clone)]
pub struct TermAnimator {
    board: EffectBoard,
    timing: TimedAnimator,
}

impl TermAnimator {
    pub fn new(board: EffectBoard) -> Self {
        Self::with_speed(board, 1.0)
    }

    pub fn with_speed(board: EffectBoard, speed: f32) -> Self {
        Self {
            board,
            timing: TimedAnimator::with_speed(speed),
        }
    }
}

impl Animator for TermAnimator {
    fn animate(
        &mut self,
        kind: AnimationKind,
        target: Option<usize>,
    ) -> oneshot::Receiver<AnimationOutcome> {
        let duration = self.timing.duration(kind);
        self.board
            .push(Effect::new(kind, target, Instant::now(), duration));
        self.timing.animate(kind, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_is_clamped() {
        let start = Instant::now();
        let effect = Effect::new(AnimationKind::Shake, Some(0), start, Duration::from_millis(300));
        assert_eq!(effect.progress(start), 0.0);
        let half = effect.progress(start + Duration::from_millis(150));
        assert!((half - 0.5).abs() < 1e-3);
        assert_eq!(effect.progress(start + Duration::from_secs(5)), 1.0);
        assert!(effect.is_over(start + Duration::from_millis(300)));
    }

    #[test]
    fn test_board_drops_finished_effects() {
        let board = EffectBoard::new();
        let start = Instant::now();
        board.push(Effect::new(AnimationKind::FlashCorrect, Some(1), start, Duration::from_millis(150)));
        board.push(Effect::new(AnimationKind::BirdFly, None, start, Duration::from_millis(2600)));

        let later = start + Duration::from_millis(500);
        let active = board.active(later);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].kind, AnimationKind::BirdFly);
    }

    #[tokio::test]
    async fn test_animator_records_and_completes() {
        let board = EffectBoard::new();
        let mut animator = TermAnimator::with_speed(board.clone(), 10.0);
        let rx = animator.animate(AnimationKind::Stack, Some(3));
        assert_eq!(board.active(Instant::now()).len(), 1);
        assert_eq!(rx.await.unwrap(), AnimationOutcome::Completed);
    }
}
