use depositkit_core::constants::{MAX_STACK_ANGLE_DEG, UNIT_SIZE};
use depositkit_visualizer::{
    interpolate, step_count, touching, CollisionEngine, MotionCommand, MotionMode, Unit,
};
use glam::Vec3;
use proptest::prelude::*;

fn coord() -> impl Strategy<Value = f32> {
    -2.0f32..2.0
}

fn point() -> impl Strategy<Value = Vec3> {
    (coord(), coord(), coord()).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

fn command() -> impl Strategy<Value = MotionCommand> {
    (any::<bool>(), point()).prop_map(|(feed, p)| {
        let mode = if feed { MotionMode::Feed } else { MotionMode::Rapid };
        MotionCommand::new(mode, p.x, p.y, p.z)
    })
}

/// Points packed closely enough that many pairs fall inside one unit size
fn cluster_unit() -> impl Strategy<Value = Unit> {
    (0.0f32..0.08, 0.0f32..0.08, 0.0f32..0.08, any::<bool>()).prop_map(|(x, y, z, resting)| {
        let mut unit = Unit::new(Vec3::new(x, y, z), 0.1);
        if resting {
            unit.freeze();
        }
        unit
    })
}

proptest! {
    #[test]
    fn touching_is_symmetric(a in point(), offset in (-0.03f32..0.03, -0.03f32..0.03, -0.03f32..0.03)) {
        let b = a + Vec3::new(offset.0, offset.1, offset.2);
        prop_assert_eq!(
            touching(a, b, UNIT_SIZE, MAX_STACK_ANGLE_DEG),
            touching(b, a, UNIT_SIZE, MAX_STACK_ANGLE_DEG)
        );
    }

    #[test]
    fn interpolate_is_idempotent(commands in prop::collection::vec(command(), 0..12)) {
        prop_assert_eq!(interpolate(&commands, UNIT_SIZE), interpolate(&commands, UNIT_SIZE));
    }

    #[test]
    fn every_move_emits_steps_plus_endpoint(commands in prop::collection::vec(command(), 1..12)) {
        let waypoints = interpolate(&commands, UNIT_SIZE);

        let mut last = Vec3::ZERO;
        let mut offset = 0;
        for command in &commands {
            let target = command.position();
            let emitted = if last == target {
                1
            } else {
                step_count(last, target, UNIT_SIZE) + 1
            };

            let segment = &waypoints[offset..offset + emitted];
            prop_assert_eq!(segment[0].position, if emitted == 1 { target } else { last });
            prop_assert_eq!(segment[emitted - 1].position, target);
            prop_assert!(segment.iter().all(|w| w.feed == command.mode.is_feed()));

            offset += emitted;
            last = target;
        }
        prop_assert_eq!(offset, waypoints.len());
    }

    #[test]
    fn step_count_is_at_least_one(a in point(), b in point()) {
        let steps = step_count(a, b, UNIT_SIZE);
        prop_assert!(steps >= 1);
        prop_assert!(steps as f32 <= (a.distance(b) / UNIT_SIZE).max(1.0) + 1.0);
    }

    #[test]
    fn grounded_units_rest_after_one_pass(xs in prop::collection::vec((coord(), coord()), 1..20)) {
        let engine = CollisionEngine::new(UNIT_SIZE, MAX_STACK_ANGLE_DEG).unwrap();
        let mut units: Vec<Unit> = xs
            .into_iter()
            .map(|(x, y)| Unit::new(Vec3::new(x, y, 0.0), 0.1))
            .collect();

        engine.resolve(&mut units);
        prop_assert!(units.iter().all(|u| u.resting && u.velocity == 0.0));
    }

    #[test]
    fn resolve_ignores_visit_order(units in prop::collection::vec(cluster_unit(), 0..40)) {
        let engine = CollisionEngine::new(UNIT_SIZE, MAX_STACK_ANGLE_DEG).unwrap();

        let mut forward = units.clone();
        let mut reversed: Vec<Unit> = units.iter().rev().copied().collect();
        engine.resolve(&mut forward);
        engine.resolve(&mut reversed);
        reversed.reverse();

        prop_assert_eq!(forward, reversed);
    }

    #[test]
    fn resolve_never_unfreezes_or_moves(units in prop::collection::vec(cluster_unit(), 0..40)) {
        let engine = CollisionEngine::new(UNIT_SIZE, MAX_STACK_ANGLE_DEG).unwrap();
        let mut resolved = units.clone();
        engine.resolve(&mut resolved);

        for (before, after) in units.iter().zip(&resolved) {
            prop_assert_eq!(before.position, after.position);
            if before.resting {
                prop_assert!(after.resting);
            }
        }
    }
}
