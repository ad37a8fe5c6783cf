//! Deposition simulation
//!
//! This module provides:
//! - Path interpolation from sparse commands to evenly spaced waypoints
//! - Up-front unit deposition for feed moves
//! - Falling-unit integration under constant gravity
//! - Contact detection and permanent resting of landed units
//! - The owned per-run context that ties the above into ticks

pub mod clock;
pub mod collision;
pub mod context;
pub mod deposition;
pub mod path;
pub mod unit;

pub use clock::{ClockStep, SimulationClock};
pub use collision::{touching, CollisionEngine, ResolveReport};
pub use context::{PlaybackState, SimulationContext, SimulationStats, TickReport};
pub use deposition::deposit_units;
pub use path::{interpolate, step_count, PathBounds, PathInterpolator, Waypoint};
pub use unit::Unit;
