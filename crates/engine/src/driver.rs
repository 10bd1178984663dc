//! Driver - runs a [`GameSession`] against real time and collaborators.
//!
//! The session itself is synchronous. The driver drains its commands after
//! every call, performs them, and turns delays into tokio tasks that report
//! back over a channel. Only the driver's owner mutates the session, so
//! keystrokes, ticks and completions are processed one at a time.
//!
//! A round transition starts all of its animations at once and joins them:
//! the session hears about it only when every animation has ended.

use std::time::Duration;

use futures::future::join_all;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::collab::{completed, outcome, Animator, Audio, Renderer};
use crate::core::{
    load_best, record_time, BestTimeStore, Command, Deferred, GameSession, GameSnapshot,
    KeyOutcome, MemoryStore, TransitionSet,
};
use crate::types::{AnimationOutcome, AreaSize, SessionAction};

/// Completion delivered back to the driver.
#[derive(Debug, Clone, PartialEq)]
pub enum DriverEvent {
    Deferred { deferred: Deferred, generation: u32 },
    TransitionDone {
        generation: u32,
        outcomes: Vec<AnimationOutcome>,
    },
}

pub struct Driver {
    session: GameSession,
    renderer: Box<dyn Renderer>,
    audio: Option<Box<dyn Audio>>,
    animator: Option<Box<dyn Animator>>,
    store: Box<dyn BestTimeStore>,
    tx: mpsc::UnboundedSender<DriverEvent>,
    rx: mpsc::UnboundedReceiver<DriverEvent>,
    pending: Vec<JoinHandle<()>>,
}

impl Driver {
    pub fn new(session: GameSession, renderer: Box<dyn Renderer>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            session,
            renderer,
            audio: None,
            animator: None,
            store: Box::new(MemoryStore::new()),
            tx,
            rx,
            pending: Vec::new(),
        }
    }

    pub fn with_audio(mut self, audio: Box<dyn Audio>) -> Self {
        self.audio = Some(audio);
        self
    }

    pub fn with_animator(mut self, animator: Box<dyn Animator>) -> Self {
        self.animator = Some(animator);
        self
    }

    /// Use `store` for the best time and load the current value from it.
    pub fn with_store(mut self, store: Box<dyn BestTimeStore>) -> Self {
        self.store = store;
        let best = load_best(self.store.as_ref());
        self.session.set_best_time(best);
        self
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.session.snapshot()
    }

    /// Timers and transitions still in flight.
    pub fn pending_tasks(&mut self) -> usize {
        self.pending.retain(|h| !h.is_finished());
        self.pending.len()
    }

    pub fn apply(&mut self, action: SessionAction) -> bool {
        let applied = self.session.apply(action);
        self.dispatch();
        applied
    }

    pub fn key_press(&mut self, key: char) -> KeyOutcome {
        let outcome = self.session.key_press(key);
        self.dispatch();
        outcome
    }

    pub fn tick(&mut self, elapsed_ms: u32) {
        self.session.tick(elapsed_ms);
    }

    pub fn set_area(&mut self, area: AreaSize) {
        self.session.set_area(area);
        self.dispatch();
    }

    /// Handle every completion that has already arrived. Never waits.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.rx.try_recv() {
            self.handle(event);
            handled += 1;
        }
        handled
    }

    /// Wait for the next completion and handle it.
    pub async fn step(&mut self) -> Option<DriverEvent> {
        let event = self.rx.recv().await?;
        self.handle(event.clone());
        Some(event)
    }

    fn handle(&mut self, event: DriverEvent) {
        match event {
            DriverEvent::Deferred {
                deferred,
                generation,
            } => {
                self.session.fire(deferred, generation);
            }
            DriverEvent::TransitionDone {
                generation,
                outcomes,
            } => {
                let interrupted = outcomes
                    .iter()
                    .filter(|o| **o == AnimationOutcome::Interrupted)
                    .count();
                if interrupted > 0 {
                    debug!(interrupted, "transition animations interrupted");
                }
                self.session.transition_finished(generation);
            }
        }
        self.dispatch();
    }

    fn dispatch(&mut self) {
        while self.session.has_commands() {
            for command in self.session.take_commands() {
                self.execute(command);
            }
        }
    }

    fn execute(&mut self, command: Command) {
        match command {
            Command::Render { index, cup, at } => self.renderer.render(index, &cup, at),
            Command::ClearArea => self.renderer.clear(),
            Command::PlaySound { effect, volume } => match self.audio.as_mut() {
                Some(audio) => audio.play_sound(effect, volume),
                None => debug!(effect = effect.as_str(), "no audio sink; sound dropped"),
            },
            Command::StopSound(effect) => {
                if let Some(audio) = self.audio.as_mut() {
                    audio.stop_sound(effect);
                }
            }
            Command::SetMuted(muted) => {
                if let Some(audio) = self.audio.as_mut() {
                    audio.set_muted(muted);
                }
            }
            Command::Animate { kind, cup } => match self.animator.as_mut() {
                // Cup effects never gate gameplay; the completion is not awaited.
                Some(animator) => drop(animator.animate(kind, cup)),
                None => debug!(?kind, "no animator; effect skipped"),
            },
            Command::Schedule {
                deferred,
                after_ms,
                generation,
            } => self.schedule(deferred, after_ms, generation),
            Command::Transition {
                animations,
                generation,
            } => self.transition(animations, generation),
            Command::RecordTime { seconds } => {
                let outcome = record_time(self.store.as_mut(), seconds);
                self.session.record_score(outcome);
            }
            Command::CancelPending => self.cancel_pending(),
        }
    }

    fn schedule(&mut self, deferred: Deferred, after_ms: u32, generation: u32) {
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(after_ms as u64)).await;
            let _ = tx.send(DriverEvent::Deferred {
                deferred,
                generation,
            });
        });
        self.track(handle);
    }

    fn transition(&mut self, animations: TransitionSet, generation: u32) {
        let receivers: Vec<_> = animations
            .iter()
            .map(|&kind| match self.animator.as_mut() {
                Some(animator) => animator.animate(kind, None),
                None => {
                    warn!(?kind, "no animator for transition; completing immediately");
                    completed()
                }
            })
            .collect();

        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            let outcomes = join_all(receivers.into_iter().map(outcome)).await;
            let _ = tx.send(DriverEvent::TransitionDone {
                generation,
                outcomes,
            });
        });
        self.track(handle);
    }

    /// Keep `handle` for cancellation, forgetting tasks that already ended.
    fn track(&mut self, handle: JoinHandle<()>) {
        self.pending.retain(|h| !h.is_finished());
        self.pending.push(handle);
    }

    fn cancel_pending(&mut self) {
        let count = self.pending.len();
        for handle in self.pending.drain(..) {
            handle.abort();
        }
        // Anything already delivered belongs to the abandoned generation.
        while self.rx.try_recv().is_ok() {}
        if count > 0 {
            debug!(count, "pending work cancelled");
        }
    }
}
