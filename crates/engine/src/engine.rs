use crate::config::EngineConfig;
use pickscene_assets::GeometryProvider;
use pickscene_common::ObjectId;
use pickscene_input::{HeadlessSurface, RenderSurface, SurfaceEvent};
use pickscene_render::{FrameRenderer, Picker, RenderError};
use pickscene_scene::{ObjectRegistry, SceneError, SceneObject, View};
use serde::Serialize;

/// Errors surfaced to the host.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Scene(#[from] SceneError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Counters updated after every completed step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FrameStats {
    /// Completed frames since construction.
    pub frame_index: u64,
    /// Sum of the `delta_time` values passed to completed steps.
    pub elapsed_seconds: f64,
    /// Draw calls issued by the last completed frame.
    pub draw_calls: usize,
    pub hovered: Option<ObjectId>,
}

/// Owns the surface, the model store and the object registry, and advances
/// them one frame per [`RenderEngine::do_step`].
pub struct RenderEngine<S, P, O = View> {
    surface: S,
    assets: P,
    registry: ObjectRegistry<O>,
    renderer: FrameRenderer,
    picker: Picker,
    stats: FrameStats,
}

impl<P: GeometryProvider> RenderEngine<HeadlessSurface, P, View> {
    /// Engine on a [`HeadlessSurface`] sized from `config`.
    pub fn headless(assets: P, config: &EngineConfig) -> Self {
        Self::new(config.headless_surface(), assets, config)
    }
}

impl<S, P, O> RenderEngine<S, P, O>
where
    S: RenderSurface,
    P: GeometryProvider,
    O: SceneObject,
{
    pub fn new(surface: S, assets: P, config: &EngineConfig) -> Self {
        tracing::info!(
            width = config.width,
            height = config.height,
            title = %config.title,
            "render engine created"
        );
        Self {
            surface,
            assets,
            registry: ObjectRegistry::new(),
            renderer: FrameRenderer::new(config.clear_color),
            picker: Picker::new(),
            stats: FrameStats::default(),
        }
    }

    /// Register `object` under `id`, replacing any object already there.
    pub fn add_object(&mut self, id: ObjectId, object: O) -> Option<O> {
        let replaced = self.registry.add(id, object);
        tracing::info!(%id, replaced = replaced.is_some(), "object added");
        replaced
    }

    /// Remove the object under `id`; absent ids are a no-op.
    pub fn remove_object(&mut self, id: ObjectId) -> Option<O> {
        let removed = self.registry.remove(id);
        if removed.is_some() {
            tracing::info!(%id, "object removed");
        }
        removed
    }

    pub fn get_object_by(&self, id: ObjectId) -> Result<&O, EngineError> {
        Ok(self.registry.get(id)?)
    }

    pub fn get_object_mut(&mut self, id: ObjectId) -> Result<&mut O, EngineError> {
        Ok(self.registry.get_mut(id)?)
    }

    /// Advance one frame.
    ///
    /// Returns `Ok(false)` without drawing once the surface is closed. A
    /// `Closed` event closes the surface but the current frame still
    /// completes.
    pub fn do_step(&mut self, delta_time: f64) -> Result<bool, EngineError> {
        if !self.surface.is_open() {
            return Ok(false);
        }
        let frame = self.stats.frame_index + 1;
        let _span = tracing::debug_span!("do_step", frame).entered();

        match self.step_frame() {
            Ok((draw_calls, hovered)) => {
                self.stats = FrameStats {
                    frame_index: frame,
                    elapsed_seconds: self.stats.elapsed_seconds + delta_time,
                    draw_calls,
                    hovered,
                };
                Ok(true)
            }
            Err(err) => {
                self.picker.reset();
                self.stats.hovered = None;
                tracing::debug!(error = %err, "frame step aborted");
                Err(err.into())
            }
        }
    }

    fn step_frame(&mut self) -> Result<(usize, Option<ObjectId>), RenderError> {
        for event in self.surface.poll_events() {
            if event == SurfaceEvent::Closed {
                self.surface.close();
            }
        }

        let viewport = self.surface.size();
        let rendered =
            self.renderer
                .render_frame(&mut self.surface, &self.registry, &self.assets, viewport)?;

        let hovered = match self.surface.pointer_position() {
            Some(pointer) => self.picker.pick_at(
                pointer,
                viewport,
                rendered.projection,
                &self.registry,
                &self.assets,
            )?,
            None => {
                self.picker.reset();
                None
            }
        };
        Ok((rendered.draw_calls, hovered))
    }

    pub fn is_pointer_left_down(&self) -> bool {
        self.surface.is_left_button_down()
    }

    /// Object under the pointer as of the last step.
    pub fn hovered_object_id(&self) -> Option<ObjectId> {
        self.picker.last()
    }

    /// [`Self::hovered_object_id`] with `-1` for "none".
    pub fn hovered_object_raw(&self) -> i64 {
        self.hovered_object_id().map_or(-1, |id| i64::from(id.0))
    }

    pub fn is_open(&self) -> bool {
        self.surface.is_open()
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    pub fn registry(&self) -> &ObjectRegistry<O> {
        &self.registry
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn assets(&self) -> &P {
        &self.assets
    }

    pub fn assets_mut(&mut self) -> &mut P {
        &mut self.assets
    }
}
