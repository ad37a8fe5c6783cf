use depositkit_settings::{Config, SimulationSettings};
use depositkit_visualizer::{
    FlyCamera, FrameRenderer, MotionCommand, PlaybackState, SimulationContext, TraceRenderer,
};
use glam::Vec3;

const DT: f32 = 0.002;

fn layer_program() -> Vec<MotionCommand> {
    vec![
        MotionCommand::rapid(0.0, 0.0, 0.2),
        MotionCommand::feed(0.2, 0.0, 0.2),
        MotionCommand::feed(0.2, 0.2, 0.2),
        MotionCommand::rapid(0.0, 0.0, 0.4),
        MotionCommand::feed(0.0, 0.0, 0.4),
    ]
}

#[test]
fn test_full_run_settles_every_unit() {
    let mut context =
        SimulationContext::head_travel(&layer_program(), &SimulationSettings::default()).unwrap();
    let feed_waypoints = context.waypoints().iter().filter(|w| w.feed).count();

    let mut ticks = 0;
    while context.state() != PlaybackState::Complete {
        context.tick(DT).unwrap();
        ticks += 1;
        assert!(ticks < 10_000, "run did not settle");
    }

    let stats = context.stats();
    assert_eq!(stats.units_total, feed_waypoints);
    assert_eq!(stats.units_falling, 0);
    assert!(context.units().iter().all(|u| u.z() >= 0.0));
    assert!((stats.simulated_seconds - ticks as f64 * DT as f64).abs() < 1e-6);
}

#[test]
fn test_units_keep_their_deposit_xy() {
    let mut context =
        SimulationContext::head_travel(&layer_program(), &SimulationSettings::default()).unwrap();
    let feed_points: Vec<Vec3> = context
        .waypoints()
        .iter()
        .filter(|w| w.feed)
        .map(|w| w.position)
        .collect();

    while context.state() != PlaybackState::Complete {
        context.tick(DT).unwrap();
    }

    for (unit, point) in context.units().iter().zip(&feed_points) {
        assert_eq!(unit.x(), point.x);
        assert_eq!(unit.y(), point.y);
        assert!(unit.z() <= point.z);
    }
}

#[test]
fn test_trace_of_a_run() {
    let mut config = Config::default();
    config.simulation.gravity = -20.0;
    let mut context = SimulationContext::from_config(&layer_program(), &config).unwrap();
    let camera = FlyCamera::from_settings(&config.camera);
    let mut renderer = TraceRenderer::new(Vec::new()).with_stride(50);

    while context.state() != PlaybackState::Complete {
        context.tick(DT).unwrap();
        renderer.render(&context.snapshot(&camera)).unwrap();
    }
    renderer.finish().unwrap();

    let output = String::from_utf8(renderer.into_inner()).unwrap();
    let last: serde_json::Value =
        serde_json::from_str(output.lines().last().unwrap()).unwrap();
    assert_eq!(last["state"], "complete");
    assert_eq!(last["progress"], 100.0);
    assert_eq!(last["units_total"], last["units_resting"]);
}

#[test]
fn test_snapshot_reflects_camera_and_head() {
    let mut context =
        SimulationContext::head_travel(&layer_program(), &SimulationSettings::default()).unwrap();
    let mut camera = FlyCamera::default();
    if let Some(bounds) = context.bounds() {
        camera.fit_to_bounds(bounds.min(), bounds.max());
    }

    context.tick(DT).unwrap();
    let frame = context.snapshot(&camera);

    assert_eq!(frame.tick, 1);
    assert_eq!(frame.head_position, context.head_position());
    assert_eq!(frame.head_model.w_axis.truncate(), frame.head_position);
    assert_eq!(frame.view, camera.view_matrix());
    assert_eq!(frame.projection, camera.projection_matrix());
    assert_eq!(frame.units.len(), context.units().len());
}
