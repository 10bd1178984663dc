//! Terminal cup stacking runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer from the term
//! crate. Timers and animations run on a tokio runtime in the background;
//! the loop below is the only place the session is touched.

use std::fs::File;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use tracing::info;
use tracing_subscriber::EnvFilter;

use cupstack::core::GameSession;
use cupstack::engine::{Config, Driver, JsonFileStore};
use cupstack::input::{handle_key_event, Input};
use cupstack::term::{
    terminal_layout, CupCanvas, EffectBoard, FrameBuffer, GameView, Scene, TermAnimator,
    TerminalBell, TerminalRenderer, Viewport,
};
use cupstack::types::{AreaSize, SessionAction, TIMER_TICK_MS};

/// Redraw interval while idle; keeps animations moving.
const FRAME_MS: u64 = 33;

fn main() -> Result<()> {
    let config = Config::from_env();
    init_logging(&config)?;
    info!(seed = config.seed, best_time_path = %config.best_time_path.display(), "starting");

    let rt = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
    let _guard = rt.enter();

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(e) = &result {
        tracing::error!(error = %e, "exited with error");
    }
    result
}

fn init_logging(config: &Config) -> Result<()> {
    let log_file = File::create(&config.log_path)
        .with_context(|| format!("cannot create log file {}", config.log_path.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, config: &Config) -> Result<()> {
    let canvas = CupCanvas::new();
    let effects = EffectBoard::new();

    let session = GameSession::new(config.seed).with_layout(terminal_layout());
    let mut driver = Driver::new(session, Box::new(canvas.clone()))
        .with_audio(Box::new(TerminalBell::stdout()))
        .with_animator(Box::new(TermAnimator::with_speed(
            effects.clone(),
            config.animation_speed,
        )))
        .with_store(Box::new(JsonFileStore::new(&config.best_time_path)));
    if config.muted {
        driver.apply(SessionAction::ToggleMute);
    }

    let view = GameView::new();
    let mut fb = FrameBuffer::new(0, 0);
    let mut viewport = Viewport::new(0, 0);

    let tick = Duration::from_millis(TIMER_TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        // Completed timers and animations.
        driver.pump();

        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        if (w, h) != (viewport.width, viewport.height) {
            viewport = Viewport::new(w, h);
            term.invalidate();
            driver.set_area(AreaSize::new(w as f32, h as f32));
        }

        // Render.
        let snap = driver.snapshot();
        let scene = Scene::capture(&canvas, &effects);
        view.render_into(&snap, &scene, viewport, &mut fb);
        term.draw_swap(&mut fb)?;

        // Input, waiting at most one frame.
        if event::poll(Duration::from_millis(FRAME_MS))? {
            match event::read()? {
                Event::Key(key) => match handle_key_event(key, snap.screen) {
                    Some(Input::Quit) => return Ok(()),
                    Some(Input::Letter(letter)) => {
                        driver.key_press(letter);
                    }
                    Some(Input::Action(action)) => {
                        if action == SessionAction::Home {
                            effects.clear();
                        }
                        driver.apply(action);
                    }
                    None => {}
                },
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // The play clock advances in fixed steps.
        while last_tick.elapsed() >= tick {
            last_tick += tick;
            driver.tick(TIMER_TICK_MS);
        }
    }
}
