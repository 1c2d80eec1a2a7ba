use crate::event::{PointerState, SurfaceEvent};
use glam::{Mat4, Vec2};
use pickscene_common::{Rgba, Viewport};
use pickscene_render::{CommandRecorder, DrawBackend, RenderError};
use std::collections::VecDeque;

/// A window-like render target that also reports input.
///
/// The surface is the draw backend for its own frames. It is opened on
/// construction and stays open until [`RenderSurface::close`].
pub trait RenderSurface: DrawBackend {
    fn is_open(&self) -> bool;

    fn close(&mut self);

    /// Drain pending events, updating pointer state as they are taken.
    fn poll_events(&mut self) -> Vec<SurfaceEvent>;

    /// Current drawable size in physical pixels.
    fn size(&self) -> Viewport;

    fn pointer(&self) -> PointerState;

    fn pointer_position(&self) -> Option<Vec2> {
        self.pointer().position
    }

    fn is_left_button_down(&self) -> bool {
        self.pointer().left_down
    }
}

/// Scripted surface with no window, drawing into a [`CommandRecorder`].
///
/// Events queued with [`HeadlessSurface::push_event`] are delivered on the
/// next poll.
#[derive(Debug)]
pub struct HeadlessSurface {
    title: String,
    size: Viewport,
    open: bool,
    pending: VecDeque<SurfaceEvent>,
    pointer: PointerState,
    recorder: CommandRecorder,
}

impl HeadlessSurface {
    pub fn new(width: u32, height: u32, title: impl Into<String>) -> Self {
        let title = title.into();
        tracing::debug!(width, height, title = %title, "headless surface created");
        Self {
            title,
            size: Viewport::new(width, height),
            open: true,
            pending: VecDeque::new(),
            pointer: PointerState::default(),
            recorder: CommandRecorder::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn push_event(&mut self, event: SurfaceEvent) {
        self.pending.push_back(event);
    }

    /// Queue a pointer move to `(x, y)`.
    pub fn move_pointer(&mut self, x: f32, y: f32) {
        self.push_event(SurfaceEvent::PointerMoved { x, y });
    }

    pub fn recorder(&self) -> &CommandRecorder {
        &self.recorder
    }

    pub fn recorder_mut(&mut self) -> &mut CommandRecorder {
        &mut self.recorder
    }
}

impl DrawBackend for HeadlessSurface {
    fn begin_frame(&mut self, viewport: Viewport, clear_color: Rgba) {
        self.recorder.begin_frame(viewport, clear_color);
    }

    fn set_projection(&mut self, projection: Mat4) {
        self.recorder.set_projection(projection);
    }

    fn set_model_view(&mut self, model_view: Mat4) {
        self.recorder.set_model_view(model_view);
    }

    fn draw_triangles(&mut self, positions: &[f32], colors: &[f32], vertex_count: usize) {
        self.recorder.draw_triangles(positions, colors, vertex_count);
    }

    fn present(&mut self) -> Result<(), RenderError> {
        self.recorder.present()
    }
}

impl RenderSurface for HeadlessSurface {
    fn is_open(&self) -> bool {
        self.open
    }

    fn close(&mut self) {
        if self.open {
            tracing::info!(title = %self.title, "surface closed");
        }
        self.open = false;
    }

    fn poll_events(&mut self) -> Vec<SurfaceEvent> {
        let events: Vec<SurfaceEvent> = self.pending.drain(..).collect();
        for event in &events {
            if let SurfaceEvent::Resized { width, height } = *event {
                self.size = Viewport::new(width, height);
            }
            self.pointer.apply(event);
        }
        events
    }

    fn size(&self) -> Viewport {
        self.size
    }

    fn pointer(&self) -> PointerState {
        self.pointer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::MouseButton;

    #[test]
    fn starts_open_with_requested_size() {
        let surface = HeadlessSurface::new(1024, 768, "test");
        assert!(surface.is_open());
        assert_eq!(surface.size(), Viewport::new(1024, 768));
        assert_eq!(surface.title(), "test");
        assert_eq!(surface.pointer_position(), None);
    }

    #[test]
    fn events_apply_only_when_polled() {
        let mut surface = HeadlessSurface::new(100, 100, "test");
        surface.move_pointer(5.0, 6.0);
        surface.push_event(SurfaceEvent::PointerButton {
            button: MouseButton::Left,
            pressed: true,
        });
        assert_eq!(surface.pointer_position(), None);
        assert!(!surface.is_left_button_down());

        let events = surface.poll_events();
        assert_eq!(events.len(), 2);
        assert_eq!(surface.pointer_position(), Some(Vec2::new(5.0, 6.0)));
        assert!(surface.is_left_button_down());
        assert!(surface.poll_events().is_empty());
    }

    #[test]
    fn resize_event_updates_size() {
        let mut surface = HeadlessSurface::new(100, 100, "test");
        surface.push_event(SurfaceEvent::Resized {
            width: 300,
            height: 150,
        });
        surface.poll_events();
        assert_eq!(surface.size(), Viewport::new(300, 150));
    }

    #[test]
    fn close_is_sticky() {
        let mut surface = HeadlessSurface::new(100, 100, "test");
        surface.close();
        surface.close();
        assert!(!surface.is_open());
    }

    #[test]
    fn draws_land_in_recorder() {
        let mut surface = HeadlessSurface::new(10, 10, "test");
        surface.begin_frame(Viewport::new(10, 10), Rgba::BLACK);
        surface.draw_triangles(&[0.0; 9], &[1.0; 12], 3);
        surface.present().unwrap();
        assert_eq!(surface.recorder().draw_calls().count(), 1);
        assert_eq!(surface.recorder().frames_presented(), 1);
    }
}
