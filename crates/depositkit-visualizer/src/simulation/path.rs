//! Path interpolation
//!
//! Expands a sparse list of motion commands into a dense sequence of
//! waypoints spaced roughly one unit apart. The head consumes one waypoint
//! per tick, so the length of the sequence is the playback duration.

use glam::Vec3;
use serde::Serialize;
use tracing::debug;

use crate::gcode::MotionCommand;
use depositkit_core::SimulationError;

/// One discretised point of the head's path
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint {
    pub position: Vec3,
    /// True if material is deposited here
    pub feed: bool,
}

impl Waypoint {
    pub fn new(position: Vec3, feed: bool) -> Self {
        Self { position, feed }
    }
}

/// Number of interpolation steps between two points
///
/// `max(1, floor(distance / unit_size))`; never zero, so callers can always
/// divide by it.
pub fn step_count(from: Vec3, to: Vec3, unit_size: f32) -> usize {
    let distance = from.distance(to) as f64;
    let steps = (distance / unit_size as f64).floor();
    if steps.is_finite() && steps >= 1.0 {
        steps as usize
    } else {
        1
    }
}

/// Points laid along one straight move
///
/// Yields `step_count` evenly spaced points starting at `from` (excluding
/// `to`), then `to` itself. A zero-length move yields only `to`.
pub(crate) fn segment_points(
    from: Vec3,
    to: Vec3,
    unit_size: f32,
) -> impl Iterator<Item = Vec3> {
    let intermediate = if from == to {
        0
    } else {
        step_count(from, to, unit_size)
    };
    let delta = to - from;

    (0..intermediate)
        .map(move |i| from + delta * (i as f32 / intermediate as f32))
        .chain(std::iter::once(to))
}

/// Reject unit sizes that would break the step formula
pub(crate) fn validate_unit_size(unit_size: f32) -> Result<f32, SimulationError> {
    if unit_size.is_finite() && unit_size > 0.0 {
        Ok(unit_size)
    } else {
        Err(SimulationError::InvalidUnitSize { value: unit_size })
    }
}

/// Expand commands into waypoints
///
/// The running position starts at the origin. Every command contributes its
/// intermediate points and its exact endpoint, all tagged with the command's
/// feed flag.
pub fn interpolate(commands: &[MotionCommand], unit_size: f32) -> Vec<Waypoint> {
    let mut waypoints = Vec::new();
    let mut last = MotionCommand::default();

    for command in commands {
        let feed = command.mode.is_feed();
        waypoints.extend(
            segment_points(last.position(), command.position(), unit_size)
                .map(|position| Waypoint::new(position, feed)),
        );
        last = *command;
    }

    waypoints
}

/// Axis-aligned bounds of a path
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PathBounds {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl PathBounds {
    pub fn min(&self) -> Vec3 {
        Vec3::from_array(self.min)
    }

    pub fn max(&self) -> Vec3 {
        Vec3::from_array(self.max)
    }

    pub fn center(&self) -> Vec3 {
        (self.min() + self.max()) * 0.5
    }
}

/// Path interpolator with a validated unit size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathInterpolator {
    unit_size: f32,
}

impl PathInterpolator {
    pub fn new(unit_size: f32) -> Result<Self, SimulationError> {
        Ok(Self {
            unit_size: validate_unit_size(unit_size)?,
        })
    }

    pub fn unit_size(&self) -> f32 {
        self.unit_size
    }

    pub fn interpolate(&self, commands: &[MotionCommand]) -> Vec<Waypoint> {
        let waypoints = interpolate(commands, self.unit_size);
        debug!(
            "Interpolated {} commands into {} waypoints ({} feed)",
            commands.len(),
            waypoints.len(),
            waypoints.iter().filter(|w| w.feed).count()
        );
        waypoints
    }

    /// Bounds of the waypoints, or `None` for an empty path
    pub fn bounds(waypoints: &[Waypoint]) -> Option<PathBounds> {
        let first = waypoints.first()?.position;
        let (min, max) = waypoints
            .iter()
            .fold((first, first), |(min, max), w| {
                (min.min(w.position), max.max(w.position))
            });
        Some(PathBounds {
            min: min.to_array(),
            max: max.to_array(),
        })
    }

    /// Total travelled length along the waypoints
    pub fn path_length(waypoints: &[Waypoint]) -> f32 {
        waypoints
            .windows(2)
            .map(|pair| pair[0].position.distance(pair[1].position))
            .sum()
    }
}
