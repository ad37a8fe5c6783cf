//! # DepositKit
//!
//! Plays back a G-code program as a deposition simulation: a tool head
//! walks the interpolated path, every feed point drops a small unit of
//! material, and units fall under gravity until they land on the build
//! plate or stack on earlier units.
//!
//! ## Architecture
//!
//! DepositKit is organized as a workspace with multiple crates:
//!
//! 1. **depositkit-core** - Error types, shared mode enums, physical constants
//! 2. **depositkit-settings** - Configuration file handling and validation
//! 3. **depositkit-visualizer** - Command parsing, simulation, camera and frame snapshots
//! 4. **depositkit** - Main binary: logging, CLI and the paced frame loop

pub mod runner;

pub use depositkit_core::{AxisFill, Error, GcodeError, PlaybackMode, Result, SimulationError, Timestep};
pub use depositkit_settings::{
    CameraSettings, Config, ParserSettings, PlaybackSettings, SimulationSettings,
};
pub use depositkit_visualizer::{
    read_commands_from_file, FlyCamera, FrameRenderer, LogRenderer, ParserOptions,
    PlaybackState, SimulationContext, SimulationStats, TraceRenderer,
};
pub use runner::{frame_camera, run_playback, RunOptions, RunSummary, StopReason};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Sets up structured logging with:
/// - Console output, pretty or one JSON object per event
/// - RUST_LOG environment variable support
pub fn init_logging(json: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    if json {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stdout)
            .with_target(true)
            .with_level(true)
            .json();

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stdout)
            .with_target(true)
            .with_level(true)
            .with_line_number(true)
            .pretty();

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    }

    Ok(())
}
