//! Error handling for DepositKit
//!
//! Provides the error types used across the workspace:
//! - G-Code errors (reading the command source)
//! - Simulation errors (invalid physical parameters)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// G-Code error type
///
/// Represents errors raised while turning a command file into motion
/// commands. Malformed tokens are tolerated by the parser and never
/// surface here; only failures that abort the whole read do.
#[derive(Error, Debug, Clone)]
pub enum GcodeError {
    /// The command source could not be read at a given line
    #[error("Failed to read line {line_number}: {reason}")]
    ReadFailed {
        /// The 1-based line number where reading failed.
        line_number: u32,
        /// The underlying failure.
        reason: String,
    },

    /// The command file could not be opened
    #[error("Cannot open command file {path}: {reason}")]
    OpenFailed {
        /// The path that failed to open.
        path: String,
        /// The reason the open failed.
        reason: String,
    },
}

/// Simulation error type
///
/// Represents invalid parameters handed to the path interpolator,
/// collision engine or simulation clock.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// Unit size must be a positive, finite length
    #[error("Invalid unit size {value}: must be positive and finite")]
    InvalidUnitSize {
        /// The rejected unit size.
        value: f32,
    },

    /// Gravity must be finite
    #[error("Invalid gravity {value}: must be finite")]
    InvalidGravity {
        /// The rejected acceleration.
        value: f32,
    },

    /// Stacking angle must lie in (0, 180] degrees
    #[error("Invalid stacking angle {value}°: must be in (0, 180]")]
    InvalidStackAngle {
        /// The rejected angle in degrees.
        value: f32,
    },

    /// Elapsed time between ticks must be non-negative and finite
    #[error("Invalid timestep {elapsed}s")]
    InvalidTimestep {
        /// The rejected elapsed time in seconds.
        elapsed: f32,
    },

    /// Operation requires a different playback state
    #[error("Invalid playback transition from {current} to {requested}")]
    InvalidPlaybackTransition {
        /// The current state name.
        current: String,
        /// The requested state name.
        requested: String,
    },
}

/// Main error type for DepositKit
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// G-Code error
    #[error(transparent)]
    Gcode(#[from] GcodeError),

    /// Simulation error
    #[error(transparent)]
    Simulation(#[from] SimulationError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a G-Code error
    pub fn is_gcode_error(&self) -> bool {
        matches!(self, Error::Gcode(_))
    }

    /// Check if this is a simulation error
    pub fn is_simulation_error(&self) -> bool {
        matches!(self, Error::Simulation(_))
    }

    /// Check if this is an I/O error
    pub fn is_io_error(&self) -> bool {
        matches!(self, Error::Io(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gcode_error_display() {
        let err = GcodeError::ReadFailed {
            line_number: 12,
            reason: "stream closed".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to read line 12: stream closed");

        let err: Error = GcodeError::OpenFailed {
            path: "missing.gcode".to_string(),
            reason: "not found".to_string(),
        }
        .into();
        assert!(err.is_gcode_error());
        assert_eq!(
            err.to_string(),
            "Cannot open command file missing.gcode: not found"
        );
    }

    #[test]
    fn test_simulation_error_display() {
        let err = SimulationError::InvalidUnitSize { value: 0.0 };
        assert_eq!(
            err.to_string(),
            "Invalid unit size 0: must be positive and finite"
        );

        let err = SimulationError::InvalidTimestep { elapsed: -0.5 };
        assert_eq!(err.to_string(), "Invalid timestep -0.5s");
    }

    #[test]
    fn test_error_conversion() {
        let err: Error = SimulationError::InvalidGravity { value: f32::NAN }.into();
        assert!(err.is_simulation_error());
        assert!(!err.is_gcode_error());

        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io_err.into();
        assert!(err.is_io_error());
        assert_eq!(err.to_string(), "I/O error: missing");
    }

    #[test]
    fn test_other_error() {
        let err = Error::other("something broke");
        assert_eq!(err.to_string(), "something broke");
    }
}
