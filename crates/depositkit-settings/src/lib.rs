//! DepositKit Settings Crate
//!
//! Handles simulation, playback, parser and camera configuration.

pub mod config;
pub mod error;

pub use config::{
    CameraSettings, Config, ParserSettings, PlaybackSettings, SimulationSettings,
};
pub use depositkit_core::modes::{AxisFill, PlaybackMode, Timestep};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
