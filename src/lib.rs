//! Cup stacking typing game (workspace facade crate).
//!
//! Re-exports the workspace crates as `cupstack::{core,engine,input,term,types}`
//! so the binary, integration tests and benches share one import path.

pub use cupstack_core as core;
pub use cupstack_engine as engine;
pub use cupstack_input as input;
pub use cupstack_term as term;
pub use cupstack_types as types;
