use clap::{Parser, Subcommand};
use pickscene_assets::AssetStore;
use pickscene_common::{ObjectId, Rgba};
use pickscene_engine::{EngineConfig, FrameStats, RenderEngine};
use pickscene_input::{HeadlessSurface, MouseButton, SurfaceEvent};
use pickscene_scene::View;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pickscene-cli", about = "Headless driver for the pickscene engine")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print engine version and crate info
    Info,
    /// Print the built-in model store as JSON
    Models,
    /// Step the demo scene on a headless surface
    Run {
        #[arg(long, default_value = "1024")]
        width: u32,
        #[arg(long, default_value = "768")]
        height: u32,
        /// Number of frames to step
        #[arg(short, long, default_value = "1")]
        frames: u64,
        /// Pointer x in pixels from the left edge
        #[arg(long, requires = "pointer_y")]
        pointer_x: Option<f32>,
        /// Pointer y in pixels from the top edge
        #[arg(long, requires = "pointer_x")]
        pointer_y: Option<f32>,
        /// Press the left button before the first frame
        #[arg(long)]
        click: bool,
        /// Emit a JSON report
        #[arg(long)]
        json: bool,
        /// Print the recorded draw commands
        #[arg(long)]
        draw_log: bool,
    },
}

#[derive(Serialize)]
struct RunReport {
    frames: Vec<FrameStats>,
    hovered: i64,
    left_down: bool,
    objects: Vec<u32>,
}

fn populate(engine: &mut RenderEngine<HeadlessSurface, AssetStore>) {
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

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info => {
            println!("pickscene-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", pickscene_common::crate_info());
            println!("assets: {}", pickscene_assets::crate_info());
            println!("scene: {}", pickscene_scene::crate_info());
            println!("render: {}", pickscene_render::crate_info());
            println!("input: {}", pickscene_input::crate_info());
            println!("engine: {}", pickscene_engine::crate_info());
            let store = AssetStore::with_primitives();
            println!("models: {}", store.keys().collect::<Vec<_>>().join(", "));
        }
        Commands::Models => {
            println!("{}", AssetStore::with_primitives().to_json_string()?);
        }
        Commands::Run {
            width,
            height,
            frames,
            pointer_x,
            pointer_y,
            click,
            json,
            draw_log,
        } => {
            tracing::info!(width, height, frames, "headless run starting");
            let config = EngineConfig {
                width,
                height,
                ..EngineConfig::default()
            };
            let mut engine = RenderEngine::headless(AssetStore::with_primitives(), &config);
            populate(&mut engine);

            if let (Some(x), Some(y)) = (pointer_x, pointer_y) {
                engine.surface_mut().move_pointer(x, y);
            }
            if click {
                engine.surface_mut().push_event(SurfaceEvent::PointerButton {
                    button: MouseButton::Left,
                    pressed: true,
                });
            }

            let mut history = Vec::new();
            for _ in 0..frames {
                if !engine.do_step(1.0 / 60.0)? {
                    break;
                }
                history.push(*engine.stats());
            }

            tracing::debug!(
                presented = engine.surface().recorder().frames_presented(),
                "headless run finished"
            );

            if json {
                let report = RunReport {
                    frames: history,
                    hovered: engine.hovered_object_raw(),
                    left_down: engine.is_pointer_left_down(),
                    objects: engine.registry().ids().map(|id| id.0).collect(),
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                let stats = engine.stats();
                println!(
                    "frames={} elapsed={:.3}s draw_calls={}",
                    stats.frame_index, stats.elapsed_seconds, stats.draw_calls
                );
                match engine.hovered_object_id() {
                    Some(id) => println!("hovered: {id}"),
                    None => println!("hovered: none"),
                }
                println!("left button: {}", engine.is_pointer_left_down());
            }

            if draw_log {
                println!("{}", engine.surface().recorder().summary());
            }
        }
    }

    Ok(())
}
