use depositkit_core::constants::{MAX_STACK_ANGLE_DEG, UNIT_SIZE};
use depositkit_visualizer::{touching, CollisionEngine, SimulationClock, Unit};
use glam::Vec3;

#[test]
fn test_column_builds_upwards() {
    let clock = SimulationClock::new(-9.8).unwrap();
    let engine = CollisionEngine::new(UNIT_SIZE, MAX_STACK_ANGLE_DEG).unwrap();
    let mut units: Vec<Unit> = Vec::new();

    // Drop five units onto the same spot, one after the other settles
    for _ in 0..5 {
        units.push(Unit::new(Vec3::new(0.0, 0.0, 0.5), 0.1));
        for _ in 0..2000 {
            clock.advance(&mut units, 0.002).unwrap();
            engine.resolve(&mut units);
            if units.iter().all(|u| u.resting) {
                break;
            }
        }
    }

    assert!(units.iter().all(|u| u.resting));
    for pair in units.windows(2) {
        let gap = pair[1].z() - pair[0].z();
        assert!(gap > 0.0 && gap < UNIT_SIZE, "gap {} out of range", gap);
        assert!(touching(pair[0].position, pair[1].position, UNIT_SIZE, MAX_STACK_ANGLE_DEG));
    }
}

#[test]
fn test_offset_drop_slides_to_plate() {
    let clock = SimulationClock::new(-9.8).unwrap();
    let engine = CollisionEngine::new(UNIT_SIZE, MAX_STACK_ANGLE_DEG).unwrap();
    let mut base = Unit::new(Vec3::ZERO, 0.0);
    base.freeze();

    // 0.015 to the side: only a steep approach could count as stacked
    let mut units = vec![base, Unit::new(Vec3::new(0.015, 0.0, 0.5), 0.1)];
    for _ in 0..2000 {
        clock.advance(&mut units, 0.002).unwrap();
        engine.resolve(&mut units);
        if units[1].resting {
            break;
        }
    }

    assert!(units[1].resting);
    assert_eq!(units[1].z(), 0.0);
}
