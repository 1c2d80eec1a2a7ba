use glam::Mat4;
use pickscene_common::{Rgba, Viewport};
use pickscene_input::{MouseButton, PointerState, RenderSurface, SurfaceEvent};
use pickscene_render::{DrawBackend, RenderError};
use pickscene_render_wgpu::WgpuBackend;
use std::collections::VecDeque;
use std::sync::Arc;
use winit::event::{ElementState, WindowEvent};
use winit::window::Window;

/// A winit window drawn through [`WgpuBackend`].
///
/// Window events are fed in by the event loop and become visible to the
/// engine on its next poll.
pub struct WinitSurface {
    window: Arc<Window>,
    backend: WgpuBackend,
    size: Viewport,
    open: bool,
    pending: VecDeque<SurfaceEvent>,
    pointer: PointerState,
}

impl WinitSurface {
    pub fn new(window: Arc<Window>) -> Result<Self, RenderError> {
        let inner = window.inner_size();
        let backend = pollster::block_on(WgpuBackend::new(
            window.clone(),
            inner.width,
            inner.height,
        ))?;
        Ok(Self {
            window,
            backend,
            size: Viewport::new(inner.width, inner.height),
            open: true,
            pending: VecDeque::new(),
            pointer: PointerState::default(),
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Queue the engine-relevant part of a winit event.
    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        if let Some(event) = translate(event) {
            self.pending.push_back(event);
        }
    }
}

fn translate(event: &WindowEvent) -> Option<SurfaceEvent> {
    match event {
        WindowEvent::CloseRequested => Some(SurfaceEvent::Closed),
        WindowEvent::Resized(size) => Some(SurfaceEvent::Resized {
            width: size.width,
            height: size.height,
        }),
        WindowEvent::CursorMoved { position, .. } => Some(SurfaceEvent::PointerMoved {
            x: position.x as f32,
            y: position.y as f32,
        }),
        WindowEvent::CursorLeft { .. } => Some(SurfaceEvent::PointerLeft),
        WindowEvent::MouseInput { state, button, .. } => Some(SurfaceEvent::PointerButton {
            button: match button {
                winit::event::MouseButton::Left => MouseButton::Left,
                winit::event::MouseButton::Right => MouseButton::Right,
                winit::event::MouseButton::Middle => MouseButton::Middle,
                winit::event::MouseButton::Back => MouseButton::Other(3),
                winit::event::MouseButton::Forward => MouseButton::Other(4),
                winit::event::MouseButton::Other(n) => MouseButton::Other(*n),
            },
            pressed: *state == ElementState::Pressed,
        }),
        WindowEvent::Focused(false) => Some(SurfaceEvent::FocusLost),
        _ => None,
    }
}

impl DrawBackend for WinitSurface {
    fn begin_frame(&mut self, viewport: Viewport, clear_color: Rgba) {
        self.backend.begin_frame(viewport, clear_color);
    }

    fn set_projection(&mut self, projection: Mat4) {
        self.backend.set_projection(projection);
    }

    fn set_model_view(&mut self, model_view: Mat4) {
        self.backend.set_model_view(model_view);
    }

    fn draw_triangles(&mut self, positions: &[f32], colors: &[f32], vertex_count: usize) {
        self.backend.draw_triangles(positions, colors, vertex_count);
    }

    fn present(&mut self) -> Result<(), RenderError> {
        self.window.pre_present_notify();
        self.backend.present()
    }
}

impl RenderSurface for WinitSurface {
    fn is_open(&self) -> bool {
        self.open
    }

    fn close(&mut self) {
        if self.open {
            tracing::info!("window closed");
        }
        self.open = false;
    }

    fn poll_events(&mut self) -> Vec<SurfaceEvent> {
        let events: Vec<SurfaceEvent> = self.pending.drain(..).collect();
        for event in &events {
            if let SurfaceEvent::Resized { width, height } = *event {
                self.size = Viewport::new(width, height);
                self.backend.resize(width, height);
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
