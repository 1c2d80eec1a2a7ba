//! Rendering: per-frame drawing of the object registry and pointer picking.
//!
//! # Invariants
//! - The renderer and picker never mutate scene objects or geometry.
//! - Picking reuses the exact projection the frame was drawn with.
//! - Fixed-function draw state lives behind [`DrawBackend`], passed explicitly
//!   through each frame; there is no ambient graphics state.
//!
//! A mesh whose vertex count is not a multiple of three is truncated to its
//! complete triangles, for drawing and picking alike.

mod backend;
mod error;
mod frame;
mod pick;
mod projection;

pub use backend::{CommandRecorder, DrawBackend, DrawCommand};
pub use error::RenderError;
pub use frame::{FrameRenderer, RenderedFrame};
pub use pick::{Picker, contains_point};
pub use projection::{orthographic, project, screen_to_ndc, unproject};

pub fn crate_info() -> &'static str {
    concat!("pickscene-render v", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
