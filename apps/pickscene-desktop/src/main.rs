mod surface;

use anyhow::Result;
use clap::Parser;
use pickscene_assets::AssetStore;
use pickscene_common::{ObjectId, Rgba};
use pickscene_engine::{EngineConfig, EngineError, RenderEngine};
use pickscene_render::RenderError;
use pickscene_scene::View;
use std::sync::Arc;
use std::time::Instant;
use surface::WinitSurface;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "pickscene-desktop", about = "Pickscene desktop window")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Initial window width in pixels
    #[arg(long, default_value = "1024")]
    width: u32,

    /// Initial window height in pixels
    #[arg(long, default_value = "768")]
    height: u32,

    #[arg(long, default_value = "pickscene")]
    title: String,
}

type Engine = RenderEngine<WinitSurface, AssetStore>;

fn populate(engine: &mut Engine) {
    let mut left = View::new("triangle", Rgba::new(0.9, 0.3, 0.2, 1.0));
    left.translate(-0.8, 0.0, 0.0);
    engine.add_object(ObjectId(1), left);

    let mut middle = View::new("quad", Rgba::new(0.2, 0.7, 0.3, 1.0));
    middle.scale(0.6, 0.6, 1.0);
    engine.add_object(ObjectId(2), middle);

    let mut right = View::new("triangle", Rgba::new(0.2, 0.4, 0.9, 1.0));
    right.translate(0.8, 0.2, 0.0);
    right.scale(0.5, 0.5, 1.0);
    engine.add_object(ObjectId(3), right);
}

/// A zero-sized window cannot be drawn; that is expected while minimized.
fn is_minimized(err: &EngineError) -> bool {
    matches!(err, EngineError::Render(RenderError::InvalidViewport { .. }))
}

struct App {
    config: EngineConfig,
    engine: Option<Engine>,
    last_frame: Instant,
    hovered: Option<ObjectId>,
    left_down: bool,
}

impl App {
    fn new(config: EngineConfig) -> Self {
        Self {
            config,
            engine: None,
            last_frame: Instant::now(),
            hovered: None,
            left_down: false,
        }
    }

    fn step(&mut self, event_loop: &ActiveEventLoop) {
        let Some(engine) = &mut self.engine else {
            return;
        };

        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f64();
        self.last_frame = now;

        match engine.do_step(dt) {
            Ok(true) => {}
            Ok(false) => {
                event_loop.exit();
                return;
            }
            Err(e) if is_minimized(&e) => tracing::debug!("frame skipped: {e}"),
            Err(e) => tracing::error!("frame failed: {e}"),
        }
        if !engine.is_open() {
            event_loop.exit();
            return;
        }

        let hovered = engine.hovered_object_id();
        if hovered != self.hovered {
            match hovered {
                Some(id) => tracing::info!("hovering {id}"),
                None => tracing::debug!("hover cleared"),
            }
            self.hovered = hovered;
        }

        let left_down = engine.is_pointer_left_down();
        if left_down && !self.left_down {
            match hovered {
                Some(id) => tracing::info!("clicked {id}"),
                None => tracing::info!("clicked empty space"),
            }
        }
        self.left_down = left_down;
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.engine.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height));
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                tracing::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let surface = match WinitSurface::new(window) {
            Ok(s) => s,
            Err(e) => {
                tracing::error!("failed to initialize GPU: {e}");
                event_loop.exit();
                return;
            }
        };

        let mut engine = RenderEngine::new(surface, AssetStore::with_primitives(), &self.config);
        populate(&mut engine);
        engine.surface().window().request_redraw();
        self.last_frame = Instant::now();
        self.engine = Some(engine);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(engine) = &mut self.engine {
            engine.surface_mut().handle_window_event(&event);
        }

        if let WindowEvent::RedrawRequested = event {
            self.step(event_loop);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(engine) = &self.engine {
            engine.surface().window().request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("pickscene-desktop starting");

    let config = EngineConfig {
        width: cli.width,
        height: cli.height,
        title: cli.title,
        ..EngineConfig::default()
    };

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    Ok(())
}
