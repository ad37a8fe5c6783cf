//! # DepositKit Visualizer
//!
//! Turns a motion-command file into an animated deposition simulation.
//! Includes the command parser, path interpolation, unit deposition,
//! falling/resting physics and the read-only frame snapshots handed to
//! an external renderer.

pub mod gcode;
pub mod simulation;
pub mod visualizer;

pub use gcode::{
    read_commands, read_commands_from_file, CommandReader, GcodeParser, MotionCommand,
    MotionMode, ParserOptions,
};

pub use simulation::{
    deposit_units, interpolate, step_count, touching, ClockStep, CollisionEngine, PathBounds,
    PathInterpolator, PlaybackState, ResolveReport, SimulationClock, SimulationContext,
    SimulationStats, TickReport, Unit, Waypoint,
};

pub use visualizer::{
    CameraInput, FlyCamera, FrameRecord, FrameRenderer, FrameSnapshot, LogRenderer, Mesh,
    TraceRenderer,
};
