//! Render surface and input device: window lifetime, events, pointer state.
//!
//! # Invariants
//! - Only [`SurfaceEvent::Closed`] changes control flow; pointer events only
//!   update [`PointerState`].
//! - Pointer state changes when events are polled, never asynchronously.

pub mod event;
pub mod surface;

pub use event::{MouseButton, PointerState, SurfaceEvent};
pub use surface::{HeadlessSurface, RenderSurface};

pub fn crate_info() -> &'static str {
    concat!("pickscene-input v", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("input"));
    }
}
