//! Renderer-facing side of the simulation
//!
//! This module provides:
//! - A free-flight camera driven by held keys and cursor motion
//! - Static meshes for units, the head marker and the build plate
//! - Read-only frame snapshots and the renderer trait that consumes them
//! - Headless renderers that trace frames as JSON lines or log progress

pub mod camera;
pub mod geometry;
pub mod snapshot;
pub mod trace;

pub use camera::{CameraInput, FlyCamera};
pub use geometry::{build_plate, head_marker, model_matrix, unit_cube, Mesh};
pub use snapshot::{FrameRenderer, FrameSnapshot};
pub use trace::{FrameRecord, LogRenderer, TraceRenderer, UnitRecord};
