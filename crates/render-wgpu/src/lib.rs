//! wgpu draw backend.
//!
//! Draw calls are queued as GPU buffers while the frame is built and encoded
//! into a single render pass on `present`, in submission order.
//!
//! # Invariants
//! - No depth buffer: later draws paint over earlier ones.
//! - Each draw keeps the projection and model-view current at submission.

mod gpu;
mod shaders;

pub use gpu::WgpuBackend;

pub fn crate_info() -> &'static str {
    concat!("pickscene-render-wgpu v", env!("CARGO_PKG_VERSION"))
}
