//! Simulation constants
//!
//! Defaults for the deposition physics. All of them can be overridden
//! through the settings crate; these values are what a fresh configuration
//! starts from.

/// Edge length of one deposited unit in millimetres.
///
/// Used both as the interpolation step between waypoints and as the
/// contact distance in the collision test.
pub const UNIT_SIZE: f32 = 0.02;

/// Vertical acceleration applied to falling units (mm/s²).
pub const GRAVITY: f32 = -9.8;

/// Largest angle from vertical at which two close units count as stacked.
pub const MAX_STACK_ANGLE_DEG: f32 = 40.0;

/// Vertical speed given to a unit when it is deposited.
pub const SPAWN_VELOCITY: f32 = 0.1;

/// Height of the build plate.
pub const GROUND_Z: f32 = 0.0;

/// Default playback frame rate.
pub const DEFAULT_FPS: u32 = 500;

/// Half-width of the square build plate.
pub const BUILD_PLATE_HALF_EXTENT: f32 = 1.0;

/// Default command file read by the host when no path is given.
pub const DEFAULT_INPUT_PATH: &str = "./gcode.example";
