//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). Cup positions come from the canvas the
//! driver renders into and running animations from the effect board, both
//! captured into a [`Scene`] once per frame.

use std::time::Instant;

use crate::canvas::{CupCanvas, Placement, CUP_COLS, CUP_ROWS};
use crate::core::{format_seconds, GameSnapshot};
use crate::effects::{Effect, EffectBoard};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{AnimationKind, Phase, Screen, Side};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Everything besides the snapshot needed to draw one frame.
#[derive(Debug, Clone)]
pub struct Scene {
    pub placements: Vec<Option<Placement>>,
    pub effects: Vec<Effect>,
    pub now: Instant,
}

impl Scene {
    pub fn capture(canvas: &CupCanvas, board: &EffectBoard) -> Self {
        let now = Instant::now();
        Self {
            placements: canvas.placements(),
            effects: board.active(now),
            now,
        }
    }

    /// A scene with cups placed and nothing animating.
    pub fn still(placements: Vec<Option<Placement>>) -> Self {
        Self {
            placements,
            effects: Vec::new(),
            now: Instant::now(),
        }
    }

    fn effect_on(&self, index: usize, kind: AnimationKind) -> Option<&Effect> {
        self.effects
            .iter()
            .rev()
            .find(|e| e.kind == kind && e.target == Some(index))
    }

    fn global_effect(&self, kind: AnimationKind) -> Option<&Effect> {
        self.effects.iter().rev().find(|e| e.kind == kind)
    }
}

const BG: Rgb = Rgb::new(24, 28, 36);
const TEXT: Rgb = Rgb::new(230, 225, 215);
const MUTED_TEXT: Rgb = Rgb::new(140, 140, 150);
const ACCENT: Rgb = Rgb::new(250, 200, 60);
const GOOD: Rgb = Rgb::new(90, 220, 110);
const BAD: Rgb = Rgb::new(235, 70, 70);
const LEFT_CUP: Rgb = Rgb::new(60, 110, 210);
const RIGHT_CUP: Rgb = Rgb::new(200, 60, 60);

const BIRD_FRAMES: [&str; 2] = ["<(v)~", "<(^)~"];

/// How a cup is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CupLook {
    Stacked,
    Placeholder,
}

/// A lightweight terminal view of the cup stacking game.
#[derive(Debug, Clone)]
pub struct GameView {
    show_help: bool,
}

impl Default for GameView {
    fn default() -> Self {
        Self { show_help: true }
    }
}

impl GameView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hide the key hints on the bottom row.
    pub fn without_help(mut self) -> Self {
        self.show_help = false;
        self
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        scene: &Scene,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(TEXT, BG).cell(' '));

        match snap.screen {
            Screen::Start => self.draw_start(fb, snap),
            Screen::Instructions => self.draw_instructions(fb, snap),
            Screen::Playing => self.draw_play(fb, snap, scene, false),
            Screen::Paused => {
                self.draw_play(fb, snap, scene, true);
                self.draw_pause_overlay(fb);
            }
            Screen::GameOver => self.draw_game_over(fb, snap),
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, scene: &Scene, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, scene, viewport, &mut fb);
        fb
    }

    fn draw_start(&self, fb: &mut FrameBuffer, snap: &GameSnapshot) {
        let mid = fb.height() as i32 / 2;
        let title = CellStyle::new(ACCENT, BG).bold();
        let body = CellStyle::new(TEXT, BG);
        fb.put_centered(mid - 3, "C U P   S T A C K", title);
        fb.put_centered(mid - 2, "typing race", CellStyle::new(MUTED_TEXT, BG));
        fb.put_centered(mid, "Press Enter to start", body.bold());
        if let Some(best) = snap.best_time {
            fb.put_centered(mid + 2, &format!("Best time: {}s", format_seconds(best)), body);
        }
        self.draw_help(fb, snap, "Enter start   Tab mute   q quit");
    }

    fn draw_instructions(&self, fb: &mut FrameBuffer, snap: &GameSnapshot) {
        let lines = [
            "Each round builds one or two pyramids of lettered cups.".to_string(),
            "Stack: type each cup's letter, bottom row first.".to_string(),
            "Unstack: type them again, top row first.".to_string(),
            "A wrong key shakes the cup. The clock keeps running.".to_string(),
            format!("Finish all {} rounds as fast as you can.", snap.max_rounds),
        ];
        let top = (fb.height() as i32 - lines.len() as i32 * 2) / 2;
        fb.put_centered(top - 2, "HOW TO PLAY", CellStyle::new(ACCENT, BG).bold());
        for (i, line) in lines.iter().enumerate() {
            fb.put_centered(top + i as i32 * 2, line, CellStyle::new(TEXT, BG));
        }
        self.draw_help(fb, snap, "Enter play   h home   Tab mute");
    }

    fn draw_play(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, scene: &Scene, dimmed: bool) {
        self.draw_hud(fb, snap);

        // Deepest levels first so shallower cups sit on top.
        let mut order: Vec<usize> = (0..snap.cups.len()).collect();
        order.sort_by_key(|&i| std::cmp::Reverse(snap.cups[i].level));

        for index in order {
            let Some(placement) = scene.placements.get(index).copied().flatten() else {
                continue;
            };
            let cup = &snap.cups[index];
            let look = if cup.is_stacked || scene.effect_on(index, AnimationKind::Unstack).is_some() {
                CupLook::Stacked
            } else if snap.placeholder_visible(index) {
                CupLook::Placeholder
            } else {
                continue;
            };
            let (x, y) = self.animated_origin(fb, index, cup.is_stacked, placement, scene);
            self.draw_cup(fb, snap, scene, index, x, y, look, dimmed);
        }

        if snap.phase == Phase::Transition {
            if let Some(bird) = scene.global_effect(AnimationKind::BirdFly) {
                self.draw_bird(fb, bird, scene.now);
            }
        }

        if !dimmed {
            self.draw_help(fb, snap, "type letters   Esc pause   Tab mute   Home quit game");
        }
    }

    fn draw_hud(&self, fb: &mut FrameBuffer, snap: &GameSnapshot) {
        let label = CellStyle::new(MUTED_TEXT, BG);
        let value = CellStyle::new(TEXT, BG).bold();
        let width = fb.width() as i32;

        fb.put_str(1, 0, "ROUND", label);
        fb.put_str(7, 0, &snap.round_display(), value);

        let time = format!("{}s", snap.elapsed_display());
        let time_x = width - time.chars().count() as i32 - 1;
        fb.put_str(time_x - 5, 0, "TIME", label);
        fb.put_str(time_x, 0, &time, value);

        fb.put_centered(0, phase_label(snap.phase), CellStyle::new(ACCENT, BG));
        if snap.muted {
            fb.put_str(1, 1, "muted", label.dim());
        }
    }

    /// Top-left cell of a cup, shifted by whatever animation is running.
    fn animated_origin(
        &self,
        fb: &FrameBuffer,
        index: usize,
        stacked: bool,
        placement: Placement,
        scene: &Scene,
    ) -> (i32, i32) {
        let mut x = placement.at.x.round() as i32;
        let mut y = placement.at.y.round() as i32;

        if let Some(shake) = scene.effect_on(index, AnimationKind::Shake) {
            let p = shake.progress(scene.now);
            if p < 1.0 {
                x += if (p * 8.0) as i32 % 2 == 0 { 1 } else { -1 };
            }
        }
        if stacked {
            if let Some(stack) = scene.effect_on(index, AnimationKind::Stack) {
                // Rises from the bottom edge.
                let drop = (fb.height() as i32 - y).max(0) as f32;
                y += (drop * (1.0 - stack.progress(scene.now))).round() as i32;
            }
        } else if let Some(unstack) = scene.effect_on(index, AnimationKind::Unstack) {
            // Knocked off to the left.
            let travel = (x + CUP_COLS as i32 * 2) as f32;
            x -= (travel * unstack.progress(scene.now)).round() as i32;
        }
        if let Some(roll) = scene.global_effect(AnimationKind::RollOff) {
            let travel = (x + CUP_COLS as i32 * 2) as f32;
            x -= (travel * roll.progress(scene.now)).round() as i32;
        }
        (x, y)
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_cup(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        scene: &Scene,
        index: usize,
        x: i32,
        y: i32,
        look: CupLook,
        dimmed: bool,
    ) {
        let cup = &snap.cups[index];
        let active = snap.active == Some(index);
        let body = match cup.side {
            Side::Left => LEFT_CUP,
            Side::Right => RIGHT_CUP,
        };

        let mut letter_fg = TEXT;
        if scene.effect_on(index, AnimationKind::FlashCorrect).is_some() {
            letter_fg = GOOD;
        } else if scene.effect_on(index, AnimationKind::FlashIncorrect).is_some() {
            letter_fg = BAD;
        }

        let (frame, fill, glyphs) = match look {
            CupLook::Stacked => {
                let fill = if dimmed { body.halved() } else { body };
                let frame_fg = if active { ACCENT } else { TEXT };
                (CellStyle::new(frame_fg, fill), fill, ['╭', '─', '╮', '│', '╰', '╯'])
            }
            CupLook::Placeholder => {
                let frame_fg = if active { ACCENT } else { MUTED_TEXT };
                (CellStyle::new(frame_fg, BG), BG, ['┌', '╌', '┐', '╎', '└', '┘'])
            }
        };
        let mut frame = if active { frame.bold() } else { frame };
        if dimmed {
            frame = frame.dim();
        }
        let [tl, h, tr, v, bl, br] = glyphs;

        let w = CUP_COLS as i32;
        let bottom = y + CUP_ROWS as i32 - 1;
        fb.fill_rect(x, y, CUP_COLS, CUP_ROWS, ' ', CellStyle::new(TEXT, fill));
        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, h, frame);
            fb.put_char(x + dx, bottom, h, frame);
        }
        for dy in y + 1..bottom {
            fb.put_char(x, dy, v, frame);
            fb.put_char(x + w - 1, dy, v, frame);
        }
        fb.put_char(x, y, tl, frame);
        fb.put_char(x + w - 1, y, tr, frame);
        fb.put_char(x, bottom, bl, frame);
        fb.put_char(x + w - 1, bottom, br, frame);

        let mut letter = CellStyle::new(letter_fg, fill).bold();
        if look == CupLook::Placeholder && !active {
            letter = CellStyle::new(MUTED_TEXT, fill);
        }
        if dimmed {
            letter = letter.dim();
        }
        fb.put_char(x + w / 2, y + CUP_ROWS as i32 / 2, cup.letter, letter);
    }

    fn draw_bird(&self, fb: &mut FrameBuffer, bird: &Effect, now: Instant) {
        let p = bird.progress(now);
        let sprite = BIRD_FRAMES[(p * 20.0) as usize % BIRD_FRAMES.len()];
        let span = fb.width() as f32 + sprite.chars().count() as f32;
        let x = fb.width() as i32 - (span * p).round() as i32;
        let y = fb.height() as i32 / 4;
        fb.put_str(x, y, sprite, CellStyle::new(ACCENT, BG).bold());
    }

    fn draw_pause_overlay(&self, fb: &mut FrameBuffer) {
        let w: u16 = 30;
        let h: u16 = 5;
        let x = (fb.width() as i32 - w as i32) / 2;
        let y = (fb.height() as i32 - h as i32) / 2;
        let style = CellStyle::new(TEXT, BG);
        fb.fill_rect(x, y, w, h, ' ', style);
        fb.draw_box(x, y, w, h, CellStyle::new(ACCENT, BG));
        fb.put_centered(y + 1, "PAUSED", style.bold());
        fb.put_centered(y + 3, "Esc resume   h home", CellStyle::new(MUTED_TEXT, BG));
    }

    fn draw_game_over(&self, fb: &mut FrameBuffer, snap: &GameSnapshot) {
        let mid = fb.height() as i32 / 2;
        let body = CellStyle::new(TEXT, BG);
        fb.put_centered(mid - 4, "ALL ROUNDS DONE", CellStyle::new(ACCENT, BG).bold());

        let time = snap
            .score
            .map(|s| s.time)
            .unwrap_or_else(|| snap.elapsed_ms as f64 / 1000.0);
        fb.put_centered(mid - 2, &format!("Your time: {}s", format_seconds(time)), body.bold());

        let best = match snap.best_time {
            Some(best) => format!("Best time: {}s", format_seconds(best)),
            None => "Best time: --".to_string(),
        };
        fb.put_centered(mid, &best, body);

        if snap.score.map(|s| s.new_best).unwrap_or(false) {
            fb.put_centered(mid + 2, "NEW BEST!", CellStyle::new(GOOD, BG).bold());
        }
        self.draw_help(fb, snap, "Enter play again   h home   q quit");
    }

    fn draw_help(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, text: &str) {
        if !self.show_help || fb.height() < 3 {
            return;
        }
        let y = fb.height() as i32 - 1;
        fb.put_centered(y, text, CellStyle::new(MUTED_TEXT, BG).dim());
        if snap.muted && snap.screen != Screen::Playing {
            fb.put_str(1, y, "muted", CellStyle::new(MUTED_TEXT, BG));
        }
    }
}

fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::StackLeft => "STACK LEFT",
        Phase::StackRight => "STACK RIGHT",
        Phase::UnstackLeft => "UNSTACK LEFT",
        Phase::UnstackRight => "UNSTACK RIGHT",
        Phase::Transition => "NEXT ROUND",
    }
}
