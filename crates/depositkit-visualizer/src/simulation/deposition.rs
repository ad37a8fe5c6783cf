//! Up-front unit deposition
//!
//! Places every unit a program would deposit without animating the head.
//! Uses the same point placement as path interpolation, but only feed
//! moves create units; rapid moves just relocate the running position.

use tracing::debug;

use super::path::segment_points;
use super::Unit;
use crate::gcode::MotionCommand;

/// Create one falling unit at every interpolated point of every feed move
pub fn deposit_units(
    commands: &[MotionCommand],
    unit_size: f32,
    spawn_velocity: f32,
) -> Vec<Unit> {
    let mut units = Vec::new();
    let mut last = MotionCommand::default();

    for command in commands {
        if command.mode.is_feed() {
            units.extend(
                segment_points(last.position(), command.position(), unit_size)
                    .map(|position| Unit::new(position, spawn_velocity)),
            );
        }
        last = *command;
    }

    debug!(
        "Deposited {} units from {} commands",
        units.len(),
        commands.len()
    );
    units
}
