//! Configuration and settings management for DepositKit
//!
//! Provides configuration file handling and validation.
//! Supports JSON and TOML file formats stored in the platform config directory.
//!
//! Configuration is organized into logical sections:
//! - Simulation physics (unit size, gravity, stacking angle)
//! - Playback (mode, frame rate, timestep source, stop conditions)
//! - Command parsing (axis fill policy, comment stripping)
//! - Camera (initial pose, movement speed, projection)

use crate::error::{ConfigError, SettingsError, SettingsResult};
use depositkit_core::constants;
use depositkit_core::modes::{AxisFill, PlaybackMode, Timestep};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Application directory name under the platform config directory
const APP_DIR_NAME: &str = "depositkit";

/// Default configuration file name
const CONFIG_FILE_NAME: &str = "config.toml";

/// Physics settings for the deposition simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Edge length of one deposited unit (mm); also the path step and contact distance
    pub unit_size: f32,
    /// Vertical acceleration (mm/s², negative pulls down)
    pub gravity: f32,
    /// Largest angle from vertical at which two close units count as stacked
    pub max_stack_angle_deg: f32,
    /// Vertical speed given to freshly deposited units
    pub spawn_velocity: f32,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            unit_size: constants::UNIT_SIZE,
            gravity: constants::GRAVITY,
            max_stack_angle_deg: constants::MAX_STACK_ANGLE_DEG,
            spawn_velocity: constants::SPAWN_VELOCITY,
        }
    }
}

/// Playback settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Head travel animation or up-front deposition
    pub mode: PlaybackMode,
    /// Target frames per second
    pub fps: u32,
    /// Where each tick's elapsed time comes from
    pub timestep: Timestep,
    /// Stop after this many ticks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_ticks: Option<u64>,
    /// Stop once the path is consumed and every unit rests
    pub stop_when_settled: bool,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            mode: PlaybackMode::default(),
            fps: constants::DEFAULT_FPS,
            timestep: Timestep::default(),
            max_ticks: None,
            stop_when_settled: true,
        }
    }
}

impl PlaybackSettings {
    /// Duration of one frame in seconds
    pub fn frame_seconds(&self) -> f32 {
        1.0 / self.fps.max(1) as f32
    }
}

/// Command parser settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserSettings {
    /// How axes missing from a line are filled
    pub axis_fill: AxisFill,
    /// Drop `;` and `(` comments before tokenizing
    pub strip_comments: bool,
}

impl Default for ParserSettings {
    fn default() -> Self {
        Self {
            axis_fill: AxisFill::default(),
            strip_comments: true,
        }
    }
}

/// Camera settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Initial eye position
    pub position: [f32; 3],
    /// Initial look direction
    pub front: [f32; 3],
    /// Up vector
    pub up: [f32; 3],
    /// Initial yaw in degrees
    pub yaw_deg: f32,
    /// Initial pitch in degrees
    pub pitch_deg: f32,
    /// Distance moved per input step
    pub speed: f32,
    /// Degrees of rotation per pixel of cursor travel
    pub sensitivity: f32,
    /// Vertical field of view in degrees
    pub fov_deg: f32,
    /// Viewport width in pixels
    pub viewport_width: u32,
    /// Viewport height in pixels
    pub viewport_height: u32,
    /// Near clip plane
    pub near: f32,
    /// Far clip plane
    pub far: f32,
    /// Move the camera to frame the whole path before playback
    pub fit_to_path: bool,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            position: [0.0, -4.0, 3.0],
            front: [0.0, 0.0, -0.5],
            up: [0.0, 1.0, 0.0],
            yaw_deg: -90.0,
            pitch_deg: 0.0,
            speed: 0.2,
            sensitivity: 0.1,
            fov_deg: 45.0,
            viewport_width: 800,
            viewport_height: 600,
            near: 0.1,
            far: 100.0,
            fit_to_path: true,
        }
    }
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Physics settings
    pub simulation: SimulationSettings,
    /// Playback settings
    pub playback: PlaybackSettings,
    /// Command parser settings
    pub parser: ParserSettings,
    /// Camera settings
    pub camera: CameraSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform default location: `<config_dir>/depositkit/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        let base = dirs::config_dir().ok_or_else(|| {
            ConfigError::UnsupportedPlatform(std::env::consts::OS.to_string())
        })?;
        Ok(base.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;

        let config: Self = match Format::from_path(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load config from file, or fall back to defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            debug!(
                "No configuration at {}, using defaults",
                path.display()
            );
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::from_path(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    SettingsError::ConfigDirectory(format!("{}: {}", parent.display(), e))
                })?;
            }
        }

        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        let sim = &self.simulation;
        if !(sim.unit_size.is_finite() && sim.unit_size > 0.0) {
            return Err(SettingsError::invalid(
                "simulation.unit_size",
                "must be a positive, finite length",
            ));
        }
        if !sim.gravity.is_finite() {
            return Err(SettingsError::invalid("simulation.gravity", "must be finite"));
        }
        if !(sim.max_stack_angle_deg > 0.0 && sim.max_stack_angle_deg <= 180.0) {
            return Err(SettingsError::invalid(
                "simulation.max_stack_angle_deg",
                "must be in (0, 180]",
            ));
        }
        if !sim.spawn_velocity.is_finite() {
            return Err(SettingsError::invalid(
                "simulation.spawn_velocity",
                "must be finite",
            ));
        }

        if self.playback.fps == 0 {
            return Err(SettingsError::invalid("playback.fps", "must be > 0"));
        }
        if self.playback.max_ticks == Some(0) {
            return Err(SettingsError::invalid("playback.max_ticks", "must be > 0"));
        }

        let cam = &self.camera;
        if cam.viewport_width == 0 || cam.viewport_height == 0 {
            return Err(SettingsError::invalid(
                "camera.viewport",
                "dimensions must be > 0",
            ));
        }
        if !(cam.near > 0.0 && cam.near < cam.far) {
            return Err(SettingsError::invalid(
                "camera.near",
                "must satisfy 0 < near < far",
            ));
        }
        if !(cam.fov_deg > 0.0 && cam.fov_deg < 180.0) {
            return Err(SettingsError::invalid("camera.fov_deg", "must be in (0, 180)"));
        }

        Ok(())
    }
}

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

impl Format {
    fn from_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )
            .into()),
        }
    }
}
