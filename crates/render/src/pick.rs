use crate::error::RenderError;
use crate::projection::{screen_to_ndc, unproject};
use glam::{Mat4, Vec2, Vec3};
use pickscene_assets::GeometryProvider;
use pickscene_common::{ObjectId, Viewport};
use pickscene_scene::{ObjectRegistry, SceneObject};

/// Barycentric containment of `p` in triangle `(a, b, c)`.
///
/// Inside means `u >= 0`, `v >= 0` and `u + v < 1`: points on the `a-b` and
/// `a-c` edges count, points on the `b-c` edge do not. Zero-area triangles
/// contain nothing.
pub fn contains_point(p: Vec3, a: Vec3, b: Vec3, c: Vec3) -> bool {
    // Thin slivers cancel badly in f32.
    let a = a.as_dvec3();
    let v0 = c.as_dvec3() - a;
    let v1 = b.as_dvec3() - a;
    let v2 = p.as_dvec3() - a;

    let dot00 = v0.dot(v0);
    let dot01 = v0.dot(v1);
    let dot02 = v0.dot(v2);
    let dot11 = v1.dot(v1);
    let dot12 = v1.dot(v2);

    let denom = dot00 * dot11 - dot01 * dot01;
    if denom == 0.0 || !denom.is_finite() {
        return false;
    }
    let inv_denom = 1.0 / denom;
    if !inv_denom.is_finite() {
        return false;
    }
    let u = (dot11 * dot02 - dot01 * dot12) * inv_denom;
    let v = (dot00 * dot12 - dot01 * dot02) * inv_denom;

    u >= 0.0 && v >= 0.0 && u + v < 1.0
}

/// Finds the object under the pointer on the projection's zero-depth plane.
///
/// The first containing triangle wins, walking objects in registry order, then
/// meshes, then triangles. There is no depth comparison, so an object added
/// earlier shadows later ones wherever they overlap.
#[derive(Debug, Default)]
pub struct Picker {
    last: Option<ObjectId>,
}

impl Picker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Result of the most recent successful pick.
    pub fn last(&self) -> Option<ObjectId> {
        self.last
    }

    /// Forget the previous result, e.g. when the pointer leaves the surface.
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Pick at `pointer` (pixels, y down) and remember the result.
    ///
    /// On error the previous result is cleared.
    pub fn pick_at<P, O>(
        &mut self,
        pointer: Vec2,
        viewport: Viewport,
        projection: Mat4,
        registry: &ObjectRegistry<O>,
        provider: &P,
    ) -> Result<Option<ObjectId>, RenderError>
    where
        P: GeometryProvider + ?Sized,
        O: SceneObject,
    {
        self.last = None;
        let hit = pick_world(
            unproject(projection, screen_to_ndc(pointer, viewport)),
            registry,
            provider,
        )?;
        self.last = hit;
        Ok(hit)
    }
}

/// First object whose transformed triangles contain `point`.
fn pick_world<P, O>(
    point: Vec3,
    registry: &ObjectRegistry<O>,
    provider: &P,
) -> Result<Option<ObjectId>, RenderError>
where
    P: GeometryProvider + ?Sized,
    O: SceneObject,
{
    for (id, object) in registry.iter() {
        let model = provider.model(object.model_key())?;
        let transform = object.transform();
        let to_world = |v: Vec3| (transform * v.extend(1.0)).truncate();
        for mesh in model.meshes() {
            for [a, b, c] in mesh.triangles() {
                if contains_point(point, to_world(a), to_world(b), to_world(c)) {
                    tracing::trace!(%id, ?point, "pick hit");
                    return Ok(Some(id));
                }
            }
        }
    }
    Ok(None)
}
