//! Contact detection and resting
//!
//! Two units touch when they are closer than one unit size and stacked
//! roughly vertically. Every tick, units on the build plate and both
//! members of every touching pair are frozen. Freezes are collected from
//! the pre-freeze positions and applied afterwards, so the outcome does not
//! depend on the order units are visited.

use std::collections::HashMap;

use glam::Vec3;
use tracing::trace;

use super::path::validate_unit_size;
use super::Unit;
use depositkit_core::SimulationError;

/// Stacking test between two unit centres
///
/// Touching iff `|a - b| < unit_size` and the line through both centres is
/// less than `max_angle_deg` away from vertical. Coincident centres have no
/// stacking direction and never touch. Symmetric in `a` and `b`.
pub fn touching(a: Vec3, b: Vec3, unit_size: f32, max_angle_deg: f32) -> bool {
    let separation = a - b;
    let distance = separation.length();
    if distance >= unit_size || distance == 0.0 {
        return false;
    }

    // Measured from the lower centre to the upper one
    let cos_angle = (separation.z.abs() / distance).clamp(0.0, 1.0);
    cos_angle.acos().to_degrees() < max_angle_deg
}

/// Outcome of one resolve pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveReport {
    /// Units frozen by reaching the build plate
    pub grounded: usize,
    /// Units frozen by a stacking contact (and not by the ground)
    pub stacked: usize,
    /// Touching pairs found
    pub contacts: usize,
}

impl ResolveReport {
    pub fn frozen(&self) -> usize {
        self.grounded + self.stacked
    }
}

type CellKey = (i32, i32, i32);

/// Collision/resting engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionEngine {
    unit_size: f32,
    max_stack_angle_deg: f32,
}

impl CollisionEngine {
    pub fn new(unit_size: f32, max_stack_angle_deg: f32) -> Result<Self, SimulationError> {
        let unit_size = validate_unit_size(unit_size)?;
        if !(max_stack_angle_deg > 0.0 && max_stack_angle_deg <= 180.0) {
            return Err(SimulationError::InvalidStackAngle {
                value: max_stack_angle_deg,
            });
        }
        Ok(Self {
            unit_size,
            max_stack_angle_deg,
        })
    }

    pub fn unit_size(&self) -> f32 {
        self.unit_size
    }

    pub fn max_stack_angle_deg(&self) -> f32 {
        self.max_stack_angle_deg
    }

    pub fn touching(&self, a: &Unit, b: &Unit) -> bool {
        touching(
            a.position,
            b.position,
            self.unit_size,
            self.max_stack_angle_deg,
        )
    }

    /// All touching pairs `(i, j)` with `i < j` and at least one member falling
    ///
    /// Pairs of two resting units are skipped; neither can change state.
    pub fn contacts(&self, units: &[Unit]) -> Vec<(usize, usize)> {
        let grid = self.build_grid(units);
        let mut pairs = Vec::new();

        for (i, unit) in units.iter().enumerate() {
            if unit.resting {
                continue;
            }
            let (cx, cy, cz) = self.cell_of(unit.position);

            for dx in -1..=1 {
                for dy in -1..=1 {
                    for dz in -1..=1 {
                        let key = (
                            cx.saturating_add(dx),
                            cy.saturating_add(dy),
                            cz.saturating_add(dz),
                        );
                        let Some(members) = grid.get(&key) else {
                            continue;
                        };
                        for &j in members {
                            if j == i {
                                continue;
                            }
                            // Falling/falling pairs are visited from both ends; keep one
                            if !units[j].resting && j < i {
                                continue;
                            }
                            if self.touching(unit, &units[j]) {
                                pairs.push((i.min(j), i.max(j)));
                            }
                        }
                    }
                }
            }
        }

        pairs.sort_unstable();
        pairs.dedup();
        pairs
    }

    /// Freeze grounded units and both members of every touching pair
    pub fn resolve(&self, units: &mut [Unit]) -> ResolveReport {
        let mut report = ResolveReport::default();
        let mut grounded = vec![false; units.len()];
        let mut stacked = vec![false; units.len()];

        for (i, unit) in units.iter().enumerate() {
            if !unit.resting && unit.on_ground() {
                grounded[i] = true;
            }
        }

        let pairs = self.contacts(units);
        report.contacts = pairs.len();
        for &(i, j) in &pairs {
            stacked[i] = true;
            stacked[j] = true;
        }

        for (i, unit) in units.iter_mut().enumerate() {
            if unit.resting {
                continue;
            }
            if grounded[i] {
                unit.freeze();
                report.grounded += 1;
            } else if stacked[i] {
                unit.freeze();
                report.stacked += 1;
            }
        }

        if report.frozen() > 0 {
            trace!(
                "Resolve froze {} grounded and {} stacked units ({} contacts)",
                report.grounded,
                report.stacked,
                report.contacts
            );
        }
        report
    }

    fn cell_of(&self, position: Vec3) -> CellKey {
        let cell = (position / self.unit_size).floor();
        (cell.x as i32, cell.y as i32, cell.z as i32)
    }

    /// Spatial hash with cells one unit wide, so any touching partner lies
    /// in the same or an adjacent cell
    fn build_grid(&self, units: &[Unit]) -> HashMap<CellKey, Vec<usize>> {
        let mut grid: HashMap<CellKey, Vec<usize>> = HashMap::with_capacity(units.len());
        for (i, unit) in units.iter().enumerate() {
            grid.entry(self.cell_of(unit.position)).or_default().push(i);
        }
        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use depositkit_core::constants::{MAX_STACK_ANGLE_DEG, UNIT_SIZE};

    fn engine() -> CollisionEngine {
        CollisionEngine::new(UNIT_SIZE, MAX_STACK_ANGLE_DEG).unwrap()
    }

    fn falling(x: f32, y: f32, z: f32) -> Unit {
        Unit::new(Vec3::new(x, y, z), 0.1)
    }

    fn brute_force_contacts(engine: &CollisionEngine, units: &[Unit]) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for i in 0..units.len() {
            for j in (i + 1)..units.len() {
                if units[i].resting && units[j].resting {
                    continue;
                }
                if engine.touching(&units[i], &units[j]) {
                    pairs.push((i, j));
                }
            }
        }
        pairs
    }

    #[test]
    fn test_stacked_units_touch() {
        let a = Vec3::new(0.0, 0.0, 0.01);
        let b = Vec3::new(0.0, 0.0, 0.0);
        assert!(touching(a, b, UNIT_SIZE, MAX_STACK_ANGLE_DEG));
        assert!(touching(b, a, UNIT_SIZE, MAX_STACK_ANGLE_DEG));
    }

    #[test]
    fn test_side_by_side_units_do_not_touch() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(0.019, 0.0, 0.0);
        assert!(!touching(a, b, UNIT_SIZE, MAX_STACK_ANGLE_DEG));
    }

    #[test]
    fn test_distant_units_do_not_touch() {
        let a = Vec3::new(0.0, 0.0, 0.02);
        let b = Vec3::new(0.0, 0.0, 0.0);
        assert!(!touching(a, b, UNIT_SIZE, MAX_STACK_ANGLE_DEG));
    }

    #[test]
    fn test_angle_threshold() {
        // 30° from vertical: touching
        let tilt = 30f32.to_radians();
        let a = Vec3::new(0.01 * tilt.sin(), 0.0, 0.01 * tilt.cos());
        assert!(touching(a, Vec3::ZERO, UNIT_SIZE, MAX_STACK_ANGLE_DEG));

        // 50° from vertical: resting side by side
        let tilt = 50f32.to_radians();
        let a = Vec3::new(0.01 * tilt.sin(), 0.0, 0.01 * tilt.cos());
        assert!(!touching(a, Vec3::ZERO, UNIT_SIZE, MAX_STACK_ANGLE_DEG));
    }

    #[test]
    fn test_coincident_units_do_not_touch() {
        let a = Vec3::new(0.3, 0.3, 0.3);
        assert!(!touching(a, a, UNIT_SIZE, MAX_STACK_ANGLE_DEG));
    }

    #[test]
    fn test_engine_rejects_bad_parameters() {
        assert!(CollisionEngine::new(0.0, 40.0).is_err());
        assert_eq!(
            CollisionEngine::new(0.02, 0.0),
            Err(SimulationError::InvalidStackAngle { value: 0.0 })
        );
        assert!(CollisionEngine::new(0.02, 181.0).is_err());
    }

    #[test]
    fn test_resolve_freezes_both_members() {
        let mut units = vec![falling(0.0, 0.0, 0.51), falling(0.0, 0.0, 0.5)];
        let report = engine().resolve(&mut units);

        assert!(units.iter().all(|u| u.resting && u.velocity == 0.0));
        assert_eq!(report.contacts, 1);
        assert_eq!(report.stacked, 2);
        assert_eq!(report.grounded, 0);
    }

    #[test]
    fn test_resolve_spec_pair_with_ground() {
        let mut units = vec![falling(0.0, 0.0, 0.01), falling(0.0, 0.0, 0.0)];
        let report = engine().resolve(&mut units);

        assert!(units[0].resting);
        assert!(units[1].resting);
        assert_eq!(report.grounded, 1);
        assert_eq!(report.stacked, 1);
    }

    #[test]
    fn test_resolve_side_by_side_keeps_falling() {
        let mut units = vec![falling(0.0, 0.0, 0.5), falling(0.019, 0.0, 0.5)];
        let report = engine().resolve(&mut units);

        assert!(units.iter().all(|u| !u.resting));
        assert_eq!(report, ResolveReport::default());
    }

    #[test]
    fn test_resolve_grounds_unconditionally() {
        let mut units = vec![falling(5.0, 5.0, 0.0)];
        let report = engine().resolve(&mut units);
        assert!(units[0].resting);
        assert_eq!(report.grounded, 1);
    }

    #[test]
    fn test_resting_units_stay_frozen() {
        let mut resting = falling(0.0, 0.0, 0.3);
        resting.freeze();
        let mut units = vec![resting, falling(0.0, 0.0, 0.31)];
        let report = engine().resolve(&mut units);

        assert!(units[1].resting);
        assert_eq!(units[0].z(), 0.3);
        assert_eq!(report.stacked, 1);
    }

    #[test]
    fn test_order_independent() {
        let units = vec![
            falling(0.0, 0.0, 0.2),
            falling(0.0, 0.0, 0.21),
            falling(0.0, 0.0, 0.22),
            falling(0.015, 0.0, 0.2),
            falling(1.0, 1.0, 0.0),
        ];
        let mut forward = units.clone();
        let mut reversed: Vec<Unit> = units.iter().rev().copied().collect();

        engine().resolve(&mut forward);
        engine().resolve(&mut reversed);
        reversed.reverse();

        assert_eq!(forward, reversed);
    }

    #[test]
    fn test_grid_matches_brute_force() {
        let mut units = Vec::new();
        for i in 0..12 {
            for j in 0..12 {
                let x = i as f32 * 0.013;
                let y = (j % 3) as f32 * 0.011;
                let z = 0.1 + j as f32 * 0.009 - (i % 4) as f32 * 0.004;
                units.push(falling(x, y, z));
            }
        }
        units[7].freeze();
        units[40].freeze();

        let engine = engine();
        assert_eq!(engine.contacts(&units), brute_force_contacts(&engine, &units));
    }

    #[test]
    fn test_negative_coordinates_use_adjacent_cells() {
        let mut units = vec![falling(-0.001, -0.001, 0.5), falling(0.001, 0.001, 0.51)];
        let engine = engine();
        assert_eq!(engine.contacts(&units), vec![(0, 1)]);
        engine.resolve(&mut units);
        assert!(units.iter().all(|u| u.resting));
    }
}
