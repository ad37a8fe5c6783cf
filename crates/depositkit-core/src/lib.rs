//! # DepositKit Core
//!
//! Error types, shared mode enums and physical constants used by every
//! DepositKit crate.

pub mod constants;
pub mod error;
pub mod modes;

pub use error::{Error, GcodeError, Result, SimulationError};
pub use modes::{AxisFill, PlaybackMode, Timestep};
