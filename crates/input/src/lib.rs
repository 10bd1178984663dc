//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`Input`] for the current screen. It
//! knows nothing about rendering or timing; the game loop feeds the result
//! to the driver.

pub mod map;

pub use cupstack_types as types;

pub use map::{handle_key_event, should_quit, Input};
