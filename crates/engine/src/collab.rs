//! Collaborator interfaces the driver performs effects through.
//!
//! Rendering is mandatory; audio and animation are optional. A missing
//! animator completes every animation immediately so the session never
//! waits on an effect that cannot run.

use std::time::Duration;

use tokio::sync::oneshot;

use crate::core::Cup;
use crate::types::{AnimationKind, AnimationOutcome, Point, SoundEffect};

/// Places cup visuals. Repeating an identical call must be harmless.
pub trait Renderer {
    fn render(&mut self, index: usize, cup: &Cup, at: Point);
    fn clear(&mut self);
}

/// Fire-and-forget sound playback.
pub trait Audio {
    fn play_sound(&mut self, effect: SoundEffect, volume: f32);
    /// Stop `effect` if it is still playing.
    fn stop_sound(&mut self, effect: SoundEffect);
    fn set_muted(&mut self, muted: bool);
}

/// Starts an animation and reports its end exactly once.
///
/// Dropping the sender without sending counts as
/// [`AnimationOutcome::Interrupted`].
pub trait Animator {
    fn animate(
        &mut self,
        kind: AnimationKind,
        target: Option<usize>,
    ) -> oneshot::Receiver<AnimationOutcome>;
}

/// A receiver that is already resolved with `Completed`.
pub fn completed() -> oneshot::Receiver<AnimationOutcome> {
    let (tx, rx) = oneshot::channel();
    let _ = tx.send(AnimationOutcome::Completed);
    rx
}

/// Wait for an animation, mapping a dropped sender to `Interrupted`.
pub async fn outcome(rx: oneshot::Receiver<AnimationOutcome>) -> AnimationOutcome {
    rx.await.unwrap_or(AnimationOutcome::Interrupted)
}

/// Animator that plays nothing and completes after each animation's
/// nominal duration.
///
/// Must be used from inside a tokio runtime.
#[derive(Debug, Clone, Copy)]
pub struct TimedAnimator {
    speed: f32,
}

impl TimedAnimator {
    pub fn new() -> Self {
        Self { speed: 1.0 }
    }

    /// Playback speed multiplier (2.0 = twice as fast).
    pub fn with_speed(speed: f32) -> Self {
        Self {
            speed: if speed > 0.0 { speed } else { 1.0 },
        }
    }

    pub fn duration(&self, kind: AnimationKind) -> Duration {
        Duration::from_millis((kind.duration_ms() as f32 / self.speed) as u64)
    }
}

impl Default for TimedAnimator {
    fn default() -> Self {
        Self::new()
    }
}

impl Animator for TimedAnimator {
    fn animate(
        &mut self,
        kind: AnimationKind,
        _target: Option<usize>,
    ) -> oneshot::Receiver<AnimationOutcome> {
        let (tx, rx) = oneshot::channel();
        let duration = self.duration(kind);
        tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            let _ = tx.send(AnimationOutcome::Completed);
        });
        rx
    }
}

/// Renderer that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _index: usize, _cup: &Cup, _at: Point) {}
    fn clear(&mut self) {}
}
