//! Engine - drives a [`GameSession`](core::GameSession) in real time.
//!
//! The core crate only describes effects. This crate performs them:
//!
//! - [`collab`]: renderer, audio and animator seams plus simple implementations
//! - [`driver`]: executes commands, runs timers on tokio, joins transitions
//! - [`store`]: JSON file persistence for the best time
//! - [`config`]: environment configuration
//!
//! Timers are tokio tasks, so a [`Driver`] must be used from within a
//! tokio runtime.

pub mod collab;
pub mod config;
pub mod driver;
pub mod store;

pub use cupstack_core as core;
pub use cupstack_types as types;

pub use collab::{completed, outcome, Animator, Audio, NullRenderer, Renderer, TimedAnimator};
pub use config::Config;
pub use driver::{Driver, DriverEvent};
pub use store::JsonFileStore;
