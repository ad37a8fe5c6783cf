//! Paced frame loop
//!
//! Drives a [`SimulationContext`] at a target frame rate, hands every frame
//! to a renderer and stops on an external signal, when playback settles or
//! after a tick limit. Stop conditions are only checked between ticks.

use std::future::Future;
use std::time::Duration;

use serde::Serialize;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, trace};

use depositkit_core::{Result, Timestep};
use depositkit_settings::{CameraSettings, PlaybackSettings};
use depositkit_visualizer::{
    FlyCamera, FrameRenderer, PlaybackState, SimulationContext, SimulationStats,
};

/// Loop parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunOptions {
    pub fps: u32,
    pub timestep: Timestep,
    pub max_ticks: Option<u64>,
    pub stop_when_settled: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self::from(&PlaybackSettings::default())
    }
}

impl From<&PlaybackSettings> for RunOptions {
    fn from(settings: &PlaybackSettings) -> Self {
        Self {
            fps: settings.fps,
            timestep: settings.timestep,
            max_ticks: settings.max_ticks,
            stop_when_settled: settings.stop_when_settled,
        }
    }
}

impl RunOptions {
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps.max(1) as f64)
    }
}

/// Why the loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Path consumed and every unit at rest
    Settled,
    /// The configured number of frames was reached
    TickLimit,
    /// The stop signal fired
    Interrupted,
}

/// Outcome of a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RunSummary {
    pub reason: StopReason,
    /// Frames rendered, including frames while paused or complete
    pub frames: u64,
    pub stats: SimulationStats,
}

/// Camera for a run, framed on the path when `fit_to_path` is set
///
/// An empty path leaves the configured pose untouched.
pub fn frame_camera(context: &SimulationContext, settings: &CameraSettings) -> FlyCamera {
    let mut camera = FlyCamera::from_settings(settings);
    if settings.fit_to_path {
        if let Some(bounds) = context.bounds() {
            camera.fit_to_bounds(bounds.min(), bounds.max());
            debug!("Camera framed on path at {}", camera.position);
        }
    }
    camera
}

/// Run the loop until one of the stop conditions holds
pub async fn run_playback<R, S>(
    context: &mut SimulationContext,
    camera: &FlyCamera,
    renderer: &mut R,
    options: RunOptions,
    stop: S,
) -> Result<RunSummary>
where
    R: FrameRenderer + ?Sized,
    S: Future<Output = ()>,
{
    if context.state() == PlaybackState::Idle {
        context.start()?;
    }

    let frame_duration = options.frame_duration();
    let fixed_seconds = frame_duration.as_secs_f32();
    let mut interval = tokio::time::interval(frame_duration);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    debug!(
        "Frame loop at {} fps ({} timestep)",
        options.fps, options.timestep
    );

    tokio::pin!(stop);
    let mut last_frame = Instant::now();
    let mut frames: u64 = 0;

    let reason = loop {
        if options.stop_when_settled && context.state() == PlaybackState::Complete {
            break StopReason::Settled;
        }
        if options.max_ticks.is_some_and(|max| frames >= max) {
            break StopReason::TickLimit;
        }

        tokio::select! {
            biased;
            _ = &mut stop => {
                info!("Stop requested after {} frames", frames);
                break StopReason::Interrupted;
            }
            now = interval.tick() => {
                let elapsed = match options.timestep {
                    Timestep::Fixed => fixed_seconds,
                    Timestep::WallClock => now.duration_since(last_frame).as_secs_f32(),
                };
                last_frame = now;

                let report = context.tick(elapsed)?;
                trace!(
                    "Tick {}: {} integrated, {} frozen, spawned={}",
                    report.tick,
                    report.clock.integrated,
                    report.resolve.frozen(),
                    report.spawned
                );

                renderer.render(&context.snapshot(camera))?;
                frames += 1;
            }
        }
    };

    renderer.finish()?;

    Ok(RunSummary {
        reason,
        frames,
        stats: context.stats(),
    })
}
