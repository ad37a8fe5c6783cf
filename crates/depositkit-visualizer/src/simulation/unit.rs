//! Deposited units

use depositkit_core::constants::GROUND_Z;
use glam::Vec3;

/// One deposited solid
///
/// `x` and `y` never change after creation. While falling, `z` and
/// `velocity` are driven by the simulation clock; once `resting` is set the
/// unit is frozen for the rest of the run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unit {
    pub position: Vec3,
    /// Vertical speed, positive upwards
    pub velocity: f32,
    pub resting: bool,
}

impl Unit {
    /// Create a falling unit. A position below the build plate is lifted onto it.
    pub fn new(position: Vec3, velocity: f32) -> Self {
        Self {
            position: Vec3::new(position.x, position.y, position.z.max(GROUND_Z)),
            velocity,
            resting: false,
        }
    }

    pub fn x(&self) -> f32 {
        self.position.x
    }

    pub fn y(&self) -> f32 {
        self.position.y
    }

    pub fn z(&self) -> f32 {
        self.position.z
    }

    /// True when the unit sits on (or was pushed onto) the build plate
    pub fn on_ground(&self) -> bool {
        self.position.z <= GROUND_Z
    }

    /// Stop the unit permanently
    pub fn freeze(&mut self) {
        self.resting = true;
        self.velocity = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_unit_is_falling() {
        let unit = Unit::new(Vec3::new(1.0, 2.0, 3.0), 0.1);
        assert!(!unit.resting);
        assert_eq!(unit.velocity, 0.1);
        assert_eq!((unit.x(), unit.y(), unit.z()), (1.0, 2.0, 3.0));
    }

    #[test]
    fn test_new_unit_clamped_to_ground() {
        let unit = Unit::new(Vec3::new(0.0, 0.0, -1.0), 0.1);
        assert_eq!(unit.z(), 0.0);
        assert!(unit.on_ground());
    }

    #[test]
    fn test_freeze_zeroes_velocity() {
        let mut unit = Unit::new(Vec3::new(0.0, 0.0, 0.5), -3.0);
        unit.freeze();
        assert!(unit.resting);
        assert_eq!(unit.velocity, 0.0);
        assert_eq!(unit.z(), 0.5);
    }
}
