//! Motion command types

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Motion mode of a command
///
/// RAPID moves reposition the head without depositing; FEED moves deposit
/// a unit at every interpolated point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MotionMode {
    /// Travel-only move (G0)
    #[default]
    Rapid,
    /// Material-depositing move (G1)
    Feed,
}

impl MotionMode {
    /// Map a numeric G word to a mode. Only `1` deposits.
    pub fn from_code(code: f32) -> Self {
        if code == 1.0 {
            Self::Feed
        } else {
            Self::Rapid
        }
    }

    /// Numeric G word for this mode
    pub fn code(&self) -> u8 {
        match self {
            Self::Rapid => 0,
            Self::Feed => 1,
        }
    }

    pub fn is_feed(&self) -> bool {
        matches!(self, Self::Feed)
    }
}

impl fmt::Display for MotionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rapid => write!(f, "RAPID"),
            Self::Feed => write!(f, "FEED"),
        }
    }
}

/// One motion instruction with an absolute target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct MotionCommand {
    pub mode: MotionMode,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl MotionCommand {
    pub fn new(mode: MotionMode, x: f32, y: f32, z: f32) -> Self {
        Self { mode, x, y, z }
    }

    /// Travel-only move to `(x, y, z)`
    pub fn rapid(x: f32, y: f32, z: f32) -> Self {
        Self::new(MotionMode::Rapid, x, y, z)
    }

    /// Depositing move to `(x, y, z)`
    pub fn feed(x: f32, y: f32, z: f32) -> Self {
        Self::new(MotionMode::Feed, x, y, z)
    }

    /// Target position as a vector
    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Straight-line distance to another command's target
    pub fn distance_to(&self, other: &MotionCommand) -> f32 {
        self.position().distance(other.position())
    }
}

impl fmt::Display for MotionCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "G{} X{} Y{} Z{}",
            self.mode.code(),
            self.x,
            self.y,
            self.z
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_code() {
        assert_eq!(MotionMode::from_code(0.0), MotionMode::Rapid);
        assert_eq!(MotionMode::from_code(1.0), MotionMode::Feed);
        assert_eq!(MotionMode::from_code(2.0), MotionMode::Rapid);
        assert_eq!(MotionMode::from_code(1.5), MotionMode::Rapid);
    }

    #[test]
    fn test_default_command_is_rapid_origin() {
        let cmd = MotionCommand::default();
        assert_eq!(cmd.mode, MotionMode::Rapid);
        assert_eq!(cmd.position(), Vec3::ZERO);
    }

    #[test]
    fn test_distance() {
        let a = MotionCommand::rapid(0.0, 0.0, 0.0);
        let b = MotionCommand::feed(3.0, 4.0, 0.0);
        assert_eq!(a.distance_to(&b), 5.0);
        assert_eq!(b.distance_to(&a), 5.0);
    }

    #[test]
    fn test_display() {
        let cmd = MotionCommand::feed(1.5, -2.0, 0.25);
        assert_eq!(cmd.to_string(), "G1 X1.5 Y-2 Z0.25");
    }
}
