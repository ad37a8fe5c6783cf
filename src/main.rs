use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use depositkit::{
    frame_camera, init_logging, read_commands_from_file, run_playback, Config, FrameRenderer,
    LogRenderer, ParserOptions, PlaybackMode, RunOptions, SimulationContext, Timestep,
    TraceRenderer, BUILD_DATE, VERSION,
};
use depositkit_core::constants::DEFAULT_INPUT_PATH;

/// Play back a G-code program as falling, stacking material units.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Motion command file to play back.
    #[arg(value_name = "FILE", default_value = DEFAULT_INPUT_PATH)]
    input: PathBuf,
    /// Configuration file (.toml or .json). Defaults to the platform config directory.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Playback mode: head-travel or deposition.
    #[arg(short, long, value_name = "MODE")]
    mode: Option<PlaybackMode>,
    /// Target frames per second.
    #[arg(long, value_name = "FPS", value_parser = clap::value_parser!(u32).range(1..))]
    fps: Option<u32>,
    /// Stop after this many frames.
    #[arg(long, value_name = "COUNT")]
    max_ticks: Option<u64>,
    /// Write a JSON-lines frame trace to this file.
    #[arg(long, value_name = "FILE")]
    trace: Option<PathBuf>,
    /// Write every Nth frame to the trace.
    #[arg(long, value_name = "N", default_value_t = 1, requires = "trace")]
    trace_stride: u64,
    /// Include every unit's position in trace records.
    #[arg(long, requires = "trace")]
    trace_units: bool,
    /// Advance by exactly one frame period per tick instead of measured time.
    #[arg(long)]
    fixed_step: bool,
    /// Keep running after every unit has settled.
    #[arg(long)]
    keep_running: bool,
    /// Log one JSON object per event.
    #[arg(long)]
    log_json: bool,
}

fn load_config(args: &Args) -> anyhow::Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => match Config::default_path() {
            Ok(path) => Config::load_or_default(&path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
            Err(e) => {
                warn!("No configuration directory ({}), using defaults", e);
                Config::default()
            }
        },
    };

    if let Some(mode) = args.mode {
        config.playback.mode = mode;
    }
    if let Some(fps) = args.fps {
        config.playback.fps = fps;
    }
    if args.max_ticks.is_some() {
        config.playback.max_ticks = args.max_ticks;
    }
    if args.fixed_step {
        config.playback.timestep = Timestep::Fixed;
    }
    if args.keep_running {
        config.playback.stop_when_settled = false;
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Cannot listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_logging(args.log_json)?;
    info!("DepositKit {} (built {})", VERSION, BUILD_DATE);

    let config = load_config(&args)?;

    let commands = read_commands_from_file(&args.input, ParserOptions::from(&config.parser))
        .with_context(|| format!("Failed to read commands from {}", args.input.display()))?;
    info!(
        "Loaded {} motion commands from {}",
        commands.len(),
        args.input.display()
    );

    let mut context = SimulationContext::from_config(&commands, &config)
        .context("Invalid simulation settings")?;
    let camera = frame_camera(&context, &config.camera);

    let mut renderer: Box<dyn FrameRenderer> = match &args.trace {
        Some(path) => Box::new(
            TraceRenderer::create(path)
                .with_context(|| format!("Failed to create trace {}", path.display()))?
                .with_stride(args.trace_stride)
                .with_units(args.trace_units),
        ),
        // Roughly once per simulated second
        None => Box::new(LogRenderer::new(config.playback.fps as u64)),
    };

    let summary = run_playback(
        &mut context,
        &camera,
        renderer.as_mut(),
        RunOptions::from(&config.playback),
        shutdown_signal(),
    )
    .await
    .context("Playback failed")?;

    info!(
        "Stopped ({:?}) after {} frames: {}",
        summary.reason,
        summary.frames,
        serde_json::to_string(&summary.stats)?
    );

    Ok(())
}
