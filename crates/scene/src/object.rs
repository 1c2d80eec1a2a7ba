use glam::{Mat4, Vec3};
use pickscene_common::Rgba;

/// Capabilities the renderer and picker need from a scene object.
pub trait SceneObject {
    /// Key of the model resolved through the geometry provider at draw time.
    fn model_key(&self) -> &str;

    /// Model-to-world matrix.
    fn transform(&self) -> Mat4;

    /// Single color applied to every vertex of the object.
    fn color(&self) -> Rgba;
}

/// The concrete scene object: a model key, a color and a transform.
///
/// `model_key` and `color` are fixed at construction. The transform starts as
/// identity and changes only through the setters below.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    model_key: String,
    transform: Mat4,
    color: Rgba,
}

impl View {
    pub fn new(model_key: impl Into<String>, color: Rgba) -> Self {
        Self {
            model_key: model_key.into(),
            transform: Mat4::IDENTITY,
            color,
        }
    }

    pub fn set_transform(&mut self, transform: Mat4) {
        self.transform = transform;
    }

    /// Post-multiplies a translation: `transform = transform * T(x, y, z)`.
    pub fn translate(&mut self, x: f32, y: f32, z: f32) {
        self.transform *= Mat4::from_translation(Vec3::new(x, y, z));
    }

    /// Post-multiplies a scale: `transform = transform * S(x, y, z)`.
    pub fn scale(&mut self, x: f32, y: f32, z: f32) {
        self.transform *= Mat4::from_scale(Vec3::new(x, y, z));
    }
}

impl SceneObject for View {
    fn model_key(&self) -> &str {
        &self.model_key
    }

    fn transform(&self) -> Mat4 {
        self.transform
    }

    fn color(&self) -> Rgba {
        self.color
    }
}
