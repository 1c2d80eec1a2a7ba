//! Scene model: renderable objects and the registry that owns them.
//!
//! # Invariants
//! - The registry is the sole long-term owner of every scene object; the
//!   frame renderer and picker only borrow.
//! - Iteration follows insertion order, so drawing and picking are
//!   reproducible across runs.
//! - Objects reference geometry by model key and never own it.

mod object;
mod registry;

pub use object::{SceneObject, View};
pub use registry::{ObjectRegistry, SceneError};

pub fn crate_info() -> &'static str {
    concat!("pickscene-scene v", env!("CARGO_PKG_VERSION"))
}
