//! Game session - screens, rounds, phases and the active cup.
//!
//! A [`GameSession`] is a plain value: every operation takes `&mut self`,
//! mutates state synchronously and queues [`Command`]s describing the
//! effects. Anything that must happen "later" (phase advancement after a
//! key, the end of a round transition) comes back in through
//! [`GameSession::fire`] or [`GameSession::transition_finished`], tagged
//! with the generation it was issued under. Returning to the start screen
//! bumps the generation, so late deliveries from an abandoned game are
//! dropped.

use tracing::{debug, info, warn};

use crate::command::{Command, Deferred, TransitionSet};
use crate::cup::Cup;
use crate::layout::Layout;
use crate::phase::{self, Advance};
use crate::round::{RoundGenerator, RoundRules};
use crate::score::{ElapsedTimer, ScoreOutcome};
use crate::snapshot::GameSnapshot;
use crate::types::*;

/// Complete session state.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub(crate) screen: Screen,
    pub(crate) phase: Phase,
    pub(crate) round: u32,
    pub(crate) cups: Vec<Cup>,
    pub(crate) active: Option<usize>,
    pub(crate) input_blocked: bool,
    pub(crate) timer: ElapsedTimer,
    pub(crate) muted: bool,
    pub(crate) generation: u32,
    area: AreaSize,
    layout: Layout,
    generator: RoundGenerator,
    best_time: Option<f64>,
    score: Option<ScoreOutcome>,
    pub(crate) commands: Vec<Command>,
}

impl GameSession {
    /// Create a session on the start screen with the given RNG seed.
    pub fn new(seed: u32) -> Self {
        Self::with_rules(seed, RoundRules::default())
    }

    pub fn with_rules(seed: u32, rules: RoundRules) -> Self {
        Self {
            screen: Screen::Start,
            phase: Phase::StackLeft,
            round: 1,
            cups: Vec::new(),
            active: None,
            input_blocked: false,
            timer: ElapsedTimer::new(),
            muted: false,
            generation: 0,
            area: AreaSize::default(),
            layout: Layout::default(),
            generator: RoundGenerator::with_rules(seed, rules),
            best_time: None,
            score: None,
            commands: Vec::new(),
        }
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn max_rounds(&self) -> u32 {
        self.generator.rules().max_rounds
    }

    pub fn cups(&self) -> &[Cup] {
        &self.cups
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn active_cup(&self) -> Option<&Cup> {
        self.active.and_then(|i| self.cups.get(i))
    }

    pub fn input_blocked(&self) -> bool {
        self.input_blocked
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.timer.elapsed_ms()
    }

    pub fn muted(&self) -> bool {
        self.muted
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn area(&self) -> AreaSize {
        self.area
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn best_time(&self) -> Option<f64> {
        self.best_time
    }

    /// Best time loaded from persistence at startup.
    pub fn set_best_time(&mut self, best: Option<f64>) {
        self.best_time = best;
    }

    pub fn score(&self) -> Option<ScoreOutcome> {
        self.score
    }

    /// Result of [`Command::RecordTime`], for the game-over screen.
    pub fn record_score(&mut self, outcome: ScoreOutcome) {
        self.best_time = outcome.best;
        self.score = Some(outcome);
    }

    /// Take every command queued since the last call.
    pub fn take_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    pub fn has_commands(&self) -> bool {
        !self.commands.is_empty()
    }

    /// Resize the play area; cups are re-rendered at their new positions.
    pub fn set_area(&mut self, area: AreaSize) {
        if self.area == area {
            return;
        }
        self.area = area;
        self.render_all();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let max_rounds = self.max_rounds();
        GameSnapshot {
            screen: self.screen,
            phase: self.phase,
            round: self.round.min(max_rounds),
            max_rounds,
            elapsed_ms: self.timer.elapsed_ms(),
            cups: self.cups.clone(),
            active: self.active,
            input_blocked: self.input_blocked,
            muted: self.muted,
            best_time: self.best_time,
            score: self.score,
        }
    }

    /// Apply a navigation action. Returns `false` if it does not apply to
    /// the current screen.
    pub fn apply(&mut self, action: SessionAction) -> bool {
        let applied = match (action, self.screen) {
            (SessionAction::Start, Screen::Start) => {
                self.play(SoundEffect::ButtonClick, 1.0);
                self.show(Screen::Instructions);
                self.play(SoundEffect::Instruction, INSTRUCTION_VOLUME);
                true
            }
            (SessionAction::Play, Screen::Instructions)
            | (SessionAction::PlayAgain, Screen::GameOver) => {
                self.play(SoundEffect::ButtonClick, 1.0);
                self.new_game();
                true
            }
            (SessionAction::Pause, Screen::Playing) => {
                self.play(SoundEffect::ButtonClick, 1.0);
                self.timer.stop();
                self.show(Screen::Paused);
                true
            }
            (SessionAction::Resume, Screen::Paused) => {
                self.play(SoundEffect::ButtonClick, 1.0);
                self.show(Screen::Playing);
                self.timer.start();
                true
            }
            (SessionAction::Home, _) => {
                self.play(SoundEffect::ButtonClick, 1.0);
                self.go_home();
                true
            }
            (SessionAction::ToggleMute, _) => {
                self.muted = !self.muted;
                self.commands.push(Command::SetMuted(self.muted));
                self.play(SoundEffect::ButtonClick, 1.0);
                true
            }
            _ => false,
        };

        if !applied {
            debug!(?action, screen = ?self.screen, "action ignored");
        }
        applied
    }

    /// Advance the play clock. Only counts while a round is being played.
    pub fn tick(&mut self, elapsed_ms: u32) {
        if self.screen == Screen::Playing {
            self.timer.tick(elapsed_ms);
        }
    }

    /// Run deferred work scheduled under `generation`.
    ///
    /// Returns `false` for deliveries from an abandoned session.
    pub fn fire(&mut self, deferred: Deferred, generation: u32) -> bool {
        if generation != self.generation {
            debug!(?deferred, generation, current = self.generation, "stale deferred work dropped");
            return false;
        }

        match deferred {
            Deferred::AdvancePhase => self.advance_phase(),
            Deferred::Unblock => {
                if self.phase != Phase::Transition {
                    self.input_blocked = false;
                }
            }
            Deferred::StartRound => {
                if self.phase != Phase::Transition {
                    warn!("round start requested outside a transition");
                    return false;
                }
                self.start_round();
            }
        }
        true
    }

    /// Every transition animation has signalled completion.
    pub fn transition_finished(&mut self, generation: u32) -> bool {
        if generation != self.generation || self.phase != Phase::Transition {
            debug!(generation, current = self.generation, "stale transition completion dropped");
            return false;
        }
        self.stop(SoundEffect::BirdFly);
        self.clear_area();
        self.schedule(Deferred::StartRound);
        true
    }

    pub(crate) fn play(&mut self, effect: SoundEffect, volume: f32) {
        if self.muted {
            return;
        }
        self.commands.push(Command::PlaySound {
            effect,
            volume: volume.clamp(0.0, 1.0),
        });
    }

    /// Queued even when muted.
    fn stop(&mut self, effect: SoundEffect) {
        self.commands.push(Command::StopSound(effect));
    }

    fn stop_long_sounds(&mut self) {
        self.stop(SoundEffect::Instruction);
        self.stop(SoundEffect::BirdFly);
    }

    pub(crate) fn animate(&mut self, kind: AnimationKind, cup: Option<usize>) {
        self.commands.push(Command::Animate { kind, cup });
    }

    pub(crate) fn schedule(&mut self, deferred: Deferred) {
        self.commands.push(Command::Schedule {
            deferred,
            after_ms: deferred.delay_ms(),
            generation: self.generation,
        });
    }

    fn show(&mut self, screen: Screen) {
        info!(from = ?self.screen, to = ?screen, "screen changed");
        self.screen = screen;
    }

    fn new_game(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.commands.push(Command::CancelPending);
        self.stop_long_sounds();
        self.round = 1;
        self.score = None;
        self.timer.reset();
        self.show(Screen::Playing);
        self.start_round();
    }

    fn go_home(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.commands.push(Command::CancelPending);
        self.stop_long_sounds();
        self.timer.reset();
        self.round = 1;
        self.phase = Phase::StackLeft;
        self.input_blocked = false;
        self.score = None;
        self.clear_area();
        self.show(Screen::Start);
    }

    fn clear_area(&mut self) {
        self.cups.clear();
        self.active = None;
        self.commands.push(Command::ClearArea);
    }

    fn render_all(&mut self) {
        if self.area.is_empty() {
            return;
        }
        for (index, cup) in self.cups.iter().enumerate() {
            let at = self.layout.stack_position(cup, self.area);
            self.commands.push(Command::Render {
                index,
                cup: *cup,
                at,
            });
        }
    }

    fn start_round(&mut self) {
        self.clear_area();
        if self.round == 1 {
            self.timer.reset();
        }

        info!(round = self.round, "starting round");
        self.cups = self.generator.generate(self.round);
        if self.cups.is_empty() {
            warn!(round = self.round, "round has no cups; treating it as complete");
            self.next_round();
            return;
        }

        self.render_all();
        self.phase = phase::initial_phase(&self.cups);
        self.active = phase::find_next_cup(&self.cups, self.phase);
        if self.active.is_none() {
            self.advance_phase();
        }
        self.input_blocked = self.active.is_none();

        if self.screen == Screen::Playing {
            self.timer.start();
        }
    }

    fn advance_phase(&mut self) {
        match phase::advance(&self.cups, self.phase) {
            Advance::Idle => debug!("phase advancement ignored during transition"),
            Advance::Stay(i) => {
                self.active = Some(i);
                self.input_blocked = false;
            }
            Advance::Enter(next, i) => {
                info!(from = self.phase.as_str(), to = next.as_str(), "phase changed");
                self.phase = next;
                self.active = Some(i);
                self.input_blocked = false;
            }
            Advance::RoundComplete => {
                self.active = None;
                self.next_round();
            }
        }
    }

    fn next_round(&mut self) {
        self.round += 1;
        if self.round > self.max_rounds() {
            self.game_over();
            return;
        }

        info!(round = self.round, "round complete; transitioning");
        self.phase = Phase::Transition;
        self.input_blocked = true;
        self.active = None;
        self.play(SoundEffect::CupRolling, 1.0);
        self.play(SoundEffect::BirdFly, 1.0);
        let animations: TransitionSet = [AnimationKind::RollOff, AnimationKind::BirdFly]
            .into_iter()
            .collect();
        self.commands.push(Command::Transition {
            animations,
            generation: self.generation,
        });
    }

    fn game_over(&mut self) {
        self.timer.stop();
        self.input_blocked = true;
        self.active = None;
        let seconds = self.timer.seconds();
        info!(seconds, "game over");
        self.show(Screen::GameOver);
        self.play(SoundEffect::EndCard, 1.0);
        self.commands.push(Command::RecordTime { seconds });
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(1)
    }
}
