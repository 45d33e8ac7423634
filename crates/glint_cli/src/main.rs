//! glint: render a sphere scene to a PNG.
//!
//! Usage:
//!   glint                               - render the built-in demo scene
//!   glint --scene scene.json -o out.png - render a scene description
//!   glint --background sky.jpg --flat   - override settings from the file

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use glint_core::{
    demo::demo_scene, load_image, save_png, BackgroundDesc, Scene, SceneDescription, ShadingModel,
};
use glint_renderer::{render, Background, RenderConfig};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "glint")]
#[command(version)]
#[command(about = "Render spheres with Phong lighting to a PNG")]
struct Cli {
    /// Scene description (JSON). Uses the built-in demo scene when omitted
    #[arg(short, long)]
    scene: Option<PathBuf>,

    /// Output image path
    #[arg(short, long, default_value = "out.png")]
    output: PathBuf,

    /// Image width in pixels (overrides the scene file)
    #[arg(long)]
    width: Option<usize>,

    /// Image height in pixels (overrides the scene file)
    #[arg(long)]
    height: Option<usize>,

    /// Background image sampled by rays that miss every sphere
    #[arg(short, long, value_name = "IMAGE")]
    background: Option<PathBuf>,

    /// Show raw material colors instead of lighting
    #[arg(long)]
    flat: bool,

    /// Worker threads (defaults to one per core)
    #[arg(short = 'j', long)]
    threads: Option<usize>,

    /// Set logging level (RUST_LOG is used when omitted)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<LogLevel>,
}

fn init_logging(level: Option<LogLevel>) {
    let mut builder = env_logger::Builder::from_default_env();
    match level {
        Some(level) => {
            builder.filter_level(level.into());
        }
        None if std::env::var_os("RUST_LOG").is_none() => {
            builder.filter_level(log::LevelFilter::Info);
        }
        None => {}
    }
    builder.init();
}

/// Resolve the scene and render settings from the file and flags.
///
/// Anything that can fail (missing files, bad JSON, unreadable background)
/// fails here, before rendering starts.
fn build_job(cli: &Cli) -> Result<(Scene, RenderConfig)> {
    let (scene, mut config) = match &cli.scene {
        Some(path) => {
            let mut desc = SceneDescription::load(path)
                .with_context(|| format!("Failed to read scene {}", path.display()))?;
            if cli.background.is_some() {
                // Replaced below; don't load the file's own image
                desc.background = BackgroundDesc::default();
            }
            let scene = desc.to_scene().context("Invalid scene")?;
            let config = RenderConfig::from_description(&desc)
                .context("Invalid render settings in scene file")?;
            (scene, config)
        }
        None => {
            log::info!("No scene given, using the demo scene");
            (demo_scene(), RenderConfig::default())
        }
    };

    if let Some(width) = cli.width {
        config.width = width;
    }
    if let Some(height) = cli.height {
        config.height = height;
    }
    if let Some(path) = &cli.background {
        let image = load_image(path)
            .with_context(|| format!("Failed to load background {}", path.display()))?;
        config.background = Background::Image(Arc::new(image));
    }
    if cli.flat {
        config.shading = ShadingModel::Flat;
    }

    if scene.is_empty() {
        log::warn!("Scene has no spheres; the image will be all background");
    }

    Ok((scene, config))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    log::info!("Starting glint");

    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure worker threads")?;
    }

    let start = Instant::now();
    let (scene, config) = build_job(&cli)?;
    log::debug!("Scene prepared in {:?}", start.elapsed());

    let image = render(&scene, &config).context("Render failed")?;

    save_png(&image, &cli.output)
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;
    log::info!("Saved {}", cli.output.display());

    Ok(())
}
