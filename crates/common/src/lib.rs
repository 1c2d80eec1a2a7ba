//! Shared value types: object identifiers, colors, viewport sizes.

mod types;

pub use types::{ObjectId, Rgba, Viewport};

pub fn crate_info() -> &'static str {
    concat!("pickscene-common v", env!("CARGO_PKG_VERSION"))
}
