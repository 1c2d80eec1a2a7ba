use crate::backend::DrawBackend;
use crate::error::RenderError;
use crate::projection::orthographic;
use glam::Mat4;
use pickscene_assets::{GeometryProvider, Mesh};
use pickscene_common::{Rgba, Viewport};
use pickscene_scene::{ObjectRegistry, SceneObject};

/// Result of a completed frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderedFrame {
    /// Projection the frame was drawn with; the picker must reuse it.
    pub projection: Mat4,
    pub draw_calls: usize,
}

/// Draws every registered object, one triangle-list call per mesh.
///
/// Owns scratch position/color buffers that are reused across meshes and
/// frames.
#[derive(Debug)]
pub struct FrameRenderer {
    clear_color: Rgba,
    positions: Vec<f32>,
    colors: Vec<f32>,
}

impl Default for FrameRenderer {
    fn default() -> Self {
        Self::new(Rgba::BLACK)
    }
}

impl FrameRenderer {
    pub fn new(clear_color: Rgba) -> Self {
        Self {
            clear_color,
            positions: Vec::new(),
            colors: Vec::new(),
        }
    }

    pub fn clear_color(&self) -> Rgba {
        self.clear_color
    }

    /// Render one frame into `backend`.
    ///
    /// Fails with [`RenderError::InvalidViewport`] before touching the backend
    /// when the viewport is empty, and with [`RenderError::AssetNotFound`] as
    /// soon as an object's model key does not resolve. In the latter case the
    /// frame is left partially drawn and not presented.
    pub fn render_frame<B, P, O>(
        &mut self,
        backend: &mut B,
        registry: &ObjectRegistry<O>,
        provider: &P,
        viewport: Viewport,
    ) -> Result<RenderedFrame, RenderError>
    where
        B: DrawBackend + ?Sized,
        P: GeometryProvider + ?Sized,
        O: SceneObject,
    {
        let projection = orthographic(viewport)?;
        backend.begin_frame(viewport, self.clear_color);

        tracing::debug!(
            objects = registry.len(),
            aspect = viewport.aspect(),
            "rendering frame"
        );

        let mut draw_calls = 0;
        for (id, object) in registry.iter() {
            let model = provider.model(object.model_key())?;
            let color = object.color();
            let transform = object.transform();
            for mesh in model.meshes() {
                let vertex_count = self.fill_buffers(mesh, color);
                if mesh.trailing_vertices() != 0 {
                    tracing::warn!(
                        %id,
                        model = object.model_key(),
                        vertices = mesh.vertices().len(),
                        "vertex count is not a multiple of 3; trailing vertices dropped"
                    );
                }
                backend.set_projection(projection);
                backend.set_model_view(transform);
                backend.draw_triangles(&self.positions, &self.colors, vertex_count);
                tracing::trace!(%id, vertex_count, "draw");
                draw_calls += 1;
            }
        }

        backend.present()?;
        Ok(RenderedFrame {
            projection,
            draw_calls,
        })
    }

    /// Fill the scratch buffers with the mesh's complete triangles and one
    /// copy of `color` per vertex. Returns the vertex count.
    fn fill_buffers(&mut self, mesh: &Mesh, color: Rgba) -> usize {
        self.positions.clear();
        self.colors.clear();
        let rgba = color.to_array();
        for triangle in mesh.vertices().chunks_exact(3) {
            for vertex in triangle {
                self.positions.extend_from_slice(&vertex.position);
                self.colors.extend_from_slice(&rgba);
            }
        }
        self.positions.len() / 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{CommandRecorder, DrawCommand};
    use pickscene_assets::{AssetError, AssetStore, Model, Vertex};
    use pickscene_common::ObjectId;
    use pickscene_scene::View;

    const RED: Rgba = Rgba::new(1.0, 0.0, 0.0, 1.0);
    const BLUE: Rgba = Rgba::new(0.0, 0.0, 1.0, 1.0);

    fn draws(rec: &CommandRecorder) -> Vec<(Vec<f32>, Vec<f32>, usize)> {
        rec.commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::DrawTriangles {
                    positions,
                    colors,
                    vertex_count,
                } => Some((positions.clone(), colors.clone(), *vertex_count)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn empty_registry_clears_and_presents() {
        let mut renderer = FrameRenderer::default();
        let mut rec = CommandRecorder::new();
        let registry: ObjectRegistry = ObjectRegistry::new();
        let frame = renderer
            .render_frame(&mut rec, &registry, &AssetStore::new(), Viewport::new(800, 600))
            .unwrap();

        assert_eq!(frame.draw_calls, 0);
        assert_eq!(
            rec.commands(),
            &[
                DrawCommand::BeginFrame {
                    viewport: Viewport::new(800, 600),
                    clear_color: Rgba::BLACK,
                },
                DrawCommand::Present,
            ]
        );
    }

    #[test]
    fn returns_the_projection_it_drew_with() {
        let mut renderer = FrameRenderer::default();
        let mut rec = CommandRecorder::new();
        let mut registry = ObjectRegistry::new();
        registry.add(ObjectId(1), View::new("triangle", RED));
        let viewport = Viewport::new(1024, 768);
        let frame = renderer
            .render_frame(&mut rec, &registry, &AssetStore::with_primitives(), viewport)
            .unwrap();

        assert_eq!(frame.projection, orthographic(viewport).unwrap());
        assert!(
            rec.commands()
                .contains(&DrawCommand::SetProjection(frame.projection))
        );
    }

    #[test]
    fn buffers_repeat_object_color_per_vertex() {
        let mut renderer = FrameRenderer::default();
        let mut rec = CommandRecorder::new();
        let mut registry = ObjectRegistry::new();
        registry.add(ObjectId(7), View::new("triangle", RED));
        renderer
            .render_frame(
                &mut rec,
                &registry,
                &AssetStore::with_primitives(),
                Viewport::new(100, 100),
            )
            .unwrap();

        let draws = draws(&rec);
        assert_eq!(draws.len(), 1);
        let (positions, colors, count) = &draws[0];
        assert_eq!(*count, 3);
        assert_eq!(
            positions,
            &vec![-0.5, -0.5, 0.0, 0.5, -0.5, 0.0, 0.0, 0.5, 0.0]
        );
        assert_eq!(colors, &RED.to_array().repeat(3));
    }

    #[test]
    fn draws_follow_insertion_order_with_each_transform() {
        let mut renderer = FrameRenderer::default();
        let mut rec = CommandRecorder::new();
        let mut registry = ObjectRegistry::new();
        let mut second = View::new("quad", BLUE);
        second.translate(2.0, 0.0, 0.0);
        registry.add(ObjectId(9), View::new("triangle", RED));
        registry.add(ObjectId(2), second.clone());
        renderer
            .render_frame(
                &mut rec,
                &registry,
                &AssetStore::with_primitives(),
                Viewport::new(100, 100),
            )
            .unwrap();

        let model_views: Vec<Mat4> = rec
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::SetModelView(m) => Some(*m),
                _ => None,
            })
            .collect();
        assert_eq!(model_views, vec![Mat4::IDENTITY, second.transform()]);

        let draws = draws(&rec);
        assert_eq!(draws[0].2, 3);
        assert_eq!(draws[1].2, 6);
        assert_eq!(draws[1].1[..4], BLUE.to_array());
    }

    #[test]
    fn one_draw_per_mesh() {
        let mut store = AssetStore::new();
        let mut model = Model::triangle();
        model.meshes.extend(Model::quad().meshes);
        store.insert("pair", model);

        let mut registry = ObjectRegistry::new();
        registry.add(ObjectId(1), View::new("pair", RED));
        let mut rec = CommandRecorder::new();
        let frame = FrameRenderer::default()
            .render_frame(&mut rec, &registry, &store, Viewport::new(64, 64))
            .unwrap();
        assert_eq!(frame.draw_calls, 2);
        assert_eq!(rec.draw_calls().count(), 2);
    }

    #[test]
    fn partial_triangle_is_dropped() {
        let mut store = AssetStore::new();
        let mut model = Model::triangle();
        model.meshes[0].vertices.push(Vertex::new(1.0, 1.0, 0.0));
        store.insert("ragged", model);

        let mut registry = ObjectRegistry::new();
        registry.add(ObjectId(1), View::new("ragged", RED));
        let mut rec = CommandRecorder::new();
        FrameRenderer::default()
            .render_frame(&mut rec, &registry, &store, Viewport::new(64, 64))
            .unwrap();

        let draws = draws(&rec);
        assert_eq!(draws[0].2, 3);
        assert_eq!(draws[0].0.len(), 9);
        assert_eq!(draws[0].1.len(), 12);
    }

    #[test]
    fn unknown_model_aborts_before_present() {
        let mut registry = ObjectRegistry::new();
        registry.add(ObjectId(1), View::new("triangle", RED));
        registry.add(ObjectId(2), View::new("missing", RED));
        let mut rec = CommandRecorder::new();
        let err = FrameRenderer::default()
            .render_frame(
                &mut rec,
                &registry,
                &AssetStore::with_primitives(),
                Viewport::new(64, 64),
            )
            .unwrap_err();

        match err {
            RenderError::AssetNotFound(AssetError::NotFound(key)) => assert_eq!(key, "missing"),
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(rec.draw_calls().count(), 1);
        assert!(!rec.commands().contains(&DrawCommand::Present));
        assert_eq!(rec.frames_presented(), 0);
    }

    #[test]
    fn empty_viewport_fails_fast() {
        let registry: ObjectRegistry = ObjectRegistry::new();
        let mut rec = CommandRecorder::new();
        let err = FrameRenderer::default()
            .render_frame(&mut rec, &registry, &AssetStore::new(), Viewport::new(800, 0))
            .unwrap_err();
        assert!(matches!(err, RenderError::InvalidViewport { .. }));
        assert!(rec.commands().is_empty());
    }

    #[test]
    fn uses_configured_clear_color() {
        let registry: ObjectRegistry = ObjectRegistry::new();
        let mut rec = CommandRecorder::new();
        FrameRenderer::new(BLUE)
            .render_frame(&mut rec, &registry, &AssetStore::new(), Viewport::new(8, 8))
            .unwrap();
        assert_eq!(
            rec.commands()[0],
            DrawCommand::BeginFrame {
                viewport: Viewport::new(8, 8),
                clear_color: BLUE,
            }
        );
    }
}
