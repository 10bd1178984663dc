//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal play. It renders into
//! a simple framebuffer that is diffed and flushed to the terminal, and it
//! provides the terminal implementations of the engine's collaborators:
//!
//! - [`CupCanvas`]: the renderer, remembering where each cup was placed
//! - [`TermAnimator`]: the animator, recording effects on an [`EffectBoard`]
//! - [`TerminalBell`]: the audio sink
//!
//! Cups are 5 columns by 3 rows; see [`terminal_layout`].

pub mod audio;
pub mod canvas;
pub mod effects;
pub mod fb;
pub mod game_view;
pub mod renderer;

pub use cupstack_core as core;
pub use cupstack_engine as engine;
pub use cupstack_types as types;

pub use audio::TerminalBell;
pub use canvas::{terminal_layout, CupCanvas, Placement, CUP_COLS, CUP_ROWS};
pub use effects::{Effect, EffectBoard, TermAnimator};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Scene, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
