//! Geometry provider: read-only access to already-loaded models by key.
//!
//! A model is a list of meshes; a mesh is an ordered vertex list laid out as a
//! triangle list plus an index list that drawing and picking do not consult.
//!
//! # Invariants
//! - Scene objects never own geometry; they reference a model key that is
//!   resolved through a [`GeometryProvider`] at draw time.
//! - Loading and caching happen elsewhere; the store only holds resident data.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single vertex. Only the position is consumed by this renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub position: [f32; 3],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: [x, y, z],
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }
}

/// An ordered vertex list interpreted as a triangle list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    /// Carried for completeness; drawing and picking walk `vertices` directly.
    #[serde(default)]
    pub indices: Vec<u16>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex>) -> Self {
        Self {
            vertices,
            indices: Vec::new(),
        }
    }

    pub fn with_indices(vertices: Vec<Vertex>, indices: Vec<u16>) -> Self {
        Self { vertices, indices }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    /// Number of complete triangles. A trailing partial triangle is dropped.
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Vertices left over after the last complete triangle.
    pub fn trailing_vertices(&self) -> usize {
        self.vertices.len() % 3
    }

    /// Complete triangles in vertex order; the remainder is dropped.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.vertices
            .chunks_exact(3)
            .map(|t| [t[0].position(), t[1].position(), t[2].position()])
    }
}

/// A renderable asset: an ordered list of meshes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub meshes: Vec<Mesh>,
}

impl Model {
    pub fn new(meshes: Vec<Mesh>) -> Self {
        Self { meshes }
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    /// Single triangle centered on the origin in the z = 0 plane.
    pub fn triangle() -> Self {
        Self::new(vec![Mesh::with_indices(
            vec![
                Vertex::new(-0.5, -0.5, 0.0),
                Vertex::new(0.5, -0.5, 0.0),
                Vertex::new(0.0, 0.5, 0.0),
            ],
            vec![0, 1, 2],
        )])
    }

    /// Unit quad centered on the origin, two triangles.
    pub fn quad() -> Self {
        Self::new(vec![Mesh::with_indices(
            vec![
                Vertex::new(-0.5, -0.5, 0.0),
                Vertex::new(0.5, -0.5, 0.0),
                Vertex::new(0.5, 0.5, 0.0),
                Vertex::new(0.5, 0.5, 0.0),
                Vertex::new(-0.5, 0.5, 0.0),
                Vertex::new(-0.5, -0.5, 0.0),
            ],
            vec![0, 1, 2, 3, 4, 5],
        )])
    }
}

/// Errors from asset operations.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("asset not found: {0:?}")]
    NotFound(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Read-only lookup of resident models by key.
pub trait GeometryProvider {
    /// Resolve `key` to its model, or fail with [`AssetError::NotFound`].
    fn model(&self, key: &str) -> Result<&Model, AssetError>;
}

/// In-memory model store keyed by model name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetStore {
    models: BTreeMap<String, Model>,
}

impl AssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with the built-in `"triangle"` and `"quad"` models registered.
    pub fn with_primitives() -> Self {
        let mut store = Self::new();
        store.insert("triangle", Model::triangle());
        store.insert("quad", Model::quad());
        store
    }

    /// Register a model under `key`, replacing any previous one.
    pub fn insert(&mut self, key: impl Into<String>, model: Model) -> Option<Model> {
        let key = key.into();
        tracing::debug!(key = %key, meshes = model.meshes.len(), "model registered");
        self.models.insert(key, model)
    }

    pub fn remove(&mut self, key: &str) -> Option<Model> {
        self.models.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.models.contains_key(key)
    }

    /// Registered keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Parse a store from its JSON form: `{"models": {"key": {"meshes": [...]}}}`.
    pub fn from_json_str(json: &str) -> Result<Self, AssetError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> Result<String, AssetError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl GeometryProvider for AssetStore {
    fn model(&self, key: &str) -> Result<&Model, AssetError> {
        self.models
            .get(key)
            .ok_or_else(|| AssetError::NotFound(key.to_string()))
    }
}

pub fn crate_info() -> &'static str {
    concat!("pickscene-assets v", env!("CARGO_PKG_VERSION"))
}
