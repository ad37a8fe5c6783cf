//! Mode selections shared between configuration and simulation
//!
//! These enums are stored in the configuration file and consumed by the
//! parser and the playback loop, so they live here rather than in either
//! of those crates.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How axes a line does not mention are filled in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AxisFill {
    /// Unmentioned axes are zero and the mode is RAPID (one line, one fresh command)
    #[default]
    ZeroFill,
    /// Unmentioned axes and the mode keep the previous command's values
    CarryForward,
}

impl fmt::Display for AxisFill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroFill => write!(f, "zero-fill"),
            Self::CarryForward => write!(f, "carry-forward"),
        }
    }
}

impl FromStr for AxisFill {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "zero-fill" | "zero" => Ok(Self::ZeroFill),
            "carry-forward" | "carry" | "modal" => Ok(Self::CarryForward),
            _ => Err(format!("Unknown axis fill policy: {}", s)),
        }
    }
}

/// Which view of the command stream is played back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackMode {
    /// The head follows the interpolated path and deposits as it goes
    #[default]
    HeadTravel,
    /// Every unit is placed up front and left to settle
    Deposition,
}

impl fmt::Display for PlaybackMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HeadTravel => write!(f, "head-travel"),
            Self::Deposition => write!(f, "deposition"),
        }
    }
}

impl FromStr for PlaybackMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "head-travel" | "head" | "travel" => Ok(Self::HeadTravel),
            "deposition" | "deposit" => Ok(Self::Deposition),
            _ => Err(format!("Unknown playback mode: {}", s)),
        }
    }
}

/// Source of the elapsed time fed to each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Timestep {
    /// Measured wall time between consecutive ticks
    #[default]
    WallClock,
    /// A constant `1 / fps` per tick, reproducible across runs
    Fixed,
}

impl fmt::Display for Timestep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WallClock => write!(f, "wall-clock"),
            Self::Fixed => write!(f, "fixed"),
        }
    }
}
