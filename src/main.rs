mod app;
mod config;
mod loader;
mod watchers;
#[cfg(feature = "window")]
mod window;

use std::error::Error;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use chunkmap_render::WorldRenderer;
use clap::{Parser, ValueEnum};
use crossbeam_channel::Receiver;
use simplelog::{ColorChoice, CombinedLogger, LevelFilter, TermLogger, TerminalMode, WriteLogger};

use app::App;
use config::ViewerConfig;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ModeArg {
    Surface,
    Layer,
}

#[derive(Parser, Debug)]
#[command(name = "chunkmap", about = "Top-down chunk map viewer")]
struct Args {
    /// Viewer configuration (TOML). Defaults apply when the file is missing.
    #[arg(long, default_value = "chunkmap.toml")]
    config: PathBuf,
    /// Render frames without opening a window.
    #[arg(long, default_value_t = false)]
    headless: bool,
    /// Frames to render in headless mode.
    #[arg(long, default_value_t = 3)]
    frames: u32,
    /// Reload highlight, view, and selection when the config file changes.
    #[arg(long, default_value_t = false)]
    watch_config: bool,
    /// Also write a debug log to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,
    /// Layer shown in layer mode.
    #[arg(long)]
    layer: Option<i32>,
}

fn init_logging(log_file: Option<&Path>) -> Result<(), Box<dyn Error>> {
    match log_file {
        Some(path) => {
            CombinedLogger::init(vec![
                TermLogger::new(
                    LevelFilter::Info,
                    simplelog::Config::default(),
                    TerminalMode::Mixed,
                    ColorChoice::Auto,
                ),
                WriteLogger::new(
                    LevelFilter::Debug,
                    simplelog::Config::default(),
                    File::create(path)?,
                ),
            ])?;
        }
        None => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
                .init();
        }
    }
    Ok(())
}

fn load_config(path: &Path) -> Result<ViewerConfig, Box<dyn Error>> {
    if path.exists() {
        let cfg = ViewerConfig::load(path)?;
        log::info!("loaded config from {}", path.display());
        Ok(cfg)
    } else {
        log::info!("{} not found; using defaults", path.display());
        Ok(ViewerConfig::default())
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let mut cfg = load_config(&args.config)?;
    if let Some(layer) = args.layer {
        cfg.world.current_layer = Some(layer);
    }
    if let Some(mode) = args.mode {
        cfg.view.mode = match mode {
            ModeArg::Surface => config::ModeName::Surface,
            ModeArg::Layer => config::ModeName::Layer,
        };
    }

    let registry = Arc::new(cfg.registry()?);
    log::info!("palette: {} block types", registry.len());
    let renderer = Arc::new(WorldRenderer::with_highlight(cfg.highlight_config(&registry)?));
    let mut app = App::new(&cfg, registry.clone(), renderer.clone())?;

    let reloads = args.watch_config.then(|| {
        watchers::spawn_config_watcher(args.config.clone(), renderer.clone(), registry.clone())
    });

    if args.headless {
        run_headless(&mut app, &renderer, args.frames, reloads.as_ref());
        Ok(())
    } else {
        run_windowed(&mut app, &renderer, args.frames, reloads.as_ref())
    }
}

#[cfg(feature = "window")]
fn run_windowed(
    app: &mut App,
    renderer: &WorldRenderer,
    _frames: u32,
    reloads: Option<&Receiver<ViewerConfig>>,
) -> Result<(), Box<dyn Error>> {
    window::run(app, renderer, reloads)
}

#[cfg(not(feature = "window"))]
fn run_windowed(
    app: &mut App,
    renderer: &WorldRenderer,
    frames: u32,
    reloads: Option<&Receiver<ViewerConfig>>,
) -> Result<(), Box<dyn Error>> {
    log::info!("built without the `window` feature; rendering headless");
    run_headless(app, renderer, frames, reloads);
    Ok(())
}

fn run_headless(
    app: &mut App,
    renderer: &WorldRenderer,
    frames: u32,
    reloads: Option<&Receiver<ViewerConfig>>,
) {
    for i in 0..frames {
        if let Some(rx) = reloads {
            for cfg in rx.try_iter() {
                app.apply_config(&cfg);
            }
        }
        app.pump_loader();
        let (stats, hud) = app.draw_frame();
        log::info!(
            "frame {}: mode={} chunks={} highlighted={} selected={} loading={} player={:?} spawn={:?} map_updated={}",
            i,
            app.mode().label(),
            stats.chunks,
            stats.highlighted,
            stats.selected,
            hud.loading_icon,
            hud.player.map(|m| (m.rect.x, m.rect.y, m.same_layer)),
            hud.spawn.map(|m| (m.rect.x, m.rect.y, m.same_layer)),
            renderer.map_updated()
        );
        if i + 1 < frames && app.is_loading() {
            std::thread::sleep(Duration::from_millis(16));
        }
    }
    log::info!(
        "{} frames, {} chunks loaded, {} selected",
        renderer.frames_rendered(),
        app.world().chunk_count(),
        app.selection().len()
    );
}

fn main() {
    let args = Args::parse();
    if let Err(e) = init_logging(args.log_file.as_deref()) {
        eprintln!("failed to initialise logging: {e}");
        std::process::exit(1);
    }
    if let Err(e) = run(args) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
