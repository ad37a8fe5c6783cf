//! Simulation clock
//!
//! Advances every falling unit by one step of constant-gravity integration.

use depositkit_core::constants::GROUND_Z;
use depositkit_core::SimulationError;

use super::Unit;

/// Result of one clock step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClockStep {
    /// Number of units that moved
    pub integrated: usize,
    /// Indices of units that reached the build plate during this step
    pub grounded: Vec<usize>,
}

/// Semi-implicit Euler integrator for falling units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationClock {
    gravity: f32,
}

impl SimulationClock {
    pub fn new(gravity: f32) -> Result<Self, SimulationError> {
        if !gravity.is_finite() {
            return Err(SimulationError::InvalidGravity { value: gravity });
        }
        Ok(Self { gravity })
    }

    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    /// Advance all falling units by `elapsed` seconds
    ///
    /// Velocity is updated first and the new velocity moves the unit. Units
    /// that would pass through the build plate stop exactly on it. Resting
    /// units and units already on the plate are left untouched. A zero
    /// `elapsed` is a no-op.
    pub fn advance(&self, units: &mut [Unit], elapsed: f32) -> Result<ClockStep, SimulationError> {
        if !elapsed.is_finite() || elapsed < 0.0 {
            return Err(SimulationError::InvalidTimestep { elapsed });
        }

        let mut step = ClockStep::default();
        if elapsed == 0.0 {
            return Ok(step);
        }

        for (index, unit) in units.iter_mut().enumerate() {
            if unit.resting || unit.on_ground() {
                continue;
            }

            unit.velocity += self.gravity * elapsed;
            unit.position.z += unit.velocity * elapsed;
            step.integrated += 1;

            if unit.position.z <= GROUND_Z {
                unit.position.z = GROUND_Z;
                step.grounded.push(index);
            }
        }

        Ok(step)
    }
}
