//! Render engine: the host-facing facade over registry, renderer and picker.
//!
//! # Invariants
//! - One `do_step` advances exactly one frame: poll events, clear, draw every
//!   object, present, pick.
//! - Single-threaded. Callers serialize registry mutation against stepping.
//! - A failed step aborts its remaining work and clears the hover result;
//!   the next step redraws from scratch.

mod config;
mod engine;

pub use config::EngineConfig;
pub use engine::{EngineError, FrameStats, RenderEngine};

pub fn crate_info() -> &'static str {
    concat!("pickscene-engine v", env!("CARGO_PKG_VERSION"))
}
