//! Screen, device and world coordinate conversions.

use crate::error::RenderError;
use glam::{Mat4, Vec2, Vec3};
use pickscene_common::Viewport;

/// Orthographic projection over `(-aspect, aspect, -1, 1)` with depth range
/// `[-1, 1]`, where `aspect = width / height`.
pub fn orthographic(viewport: Viewport) -> Result<Mat4, RenderError> {
    if viewport.is_empty() {
        return Err(RenderError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }
    let aspect = viewport.aspect();
    Ok(Mat4::orthographic_rh_gl(-aspect, aspect, -1.0, 1.0, -1.0, 1.0))
}

/// Pointer position in pixels (y down) to device coordinates (y up).
pub fn screen_to_ndc(pointer: Vec2, viewport: Viewport) -> Vec2 {
    let ndc = pointer / viewport.size() * 2.0 - Vec2::ONE;
    Vec2::new(ndc.x, -ndc.y)
}

/// Device point on the zero-depth plane back to world space.
pub fn unproject(projection: Mat4, ndc: Vec2) -> Vec3 {
    (projection.inverse() * ndc.extend(0.0).extend(1.0)).truncate()
}

/// World point to device coordinates.
pub fn project(projection: Mat4, world: Vec3) -> Vec3 {
    projection.project_point3(world)
}
