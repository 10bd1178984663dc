//! Terminal bell as the audio collaborator.
//!
//! A terminal can only beep, so most effects are silent. Wrong keys and the
//! end card ring the bell; everything else is just logged.

use std::io::{self, Write};

use tracing::{debug, trace};

use crate::engine::Audio;
use crate::types::SoundEffect;

const BEL: &[u8] = b"\x07";

pub struct TerminalBell<W: Write = io::Stdout> {
    out: W,
    muted: bool,
}

impl TerminalBell<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out, muted: false }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn rings(effect: SoundEffect) -> bool {
        matches!(effect, SoundEffect::IncorrectType | SoundEffect::EndCard)
    }
}

impl<W: Write> Audio for TerminalBell<W> {
    fn play_sound(&mut self, effect: SoundEffect, volume: f32) {
        if self.muted || volume <= 0.0 || !Self::rings(effect) {
            trace!(effect = effect.as_str(), "silent effect");
            return;
        }
        if let Err(e) = self.out.write_all(BEL).and_then(|_| self.out.flush()) {
            debug!(error = %e, effect = effect.as_str(), "bell failed");
        }
    }

    fn stop_sound(&mut self, effect: SoundEffect) {
        // A bell cannot be cut short.
        trace!(effect = effect.as_str(), "stop ignored");
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }
}
