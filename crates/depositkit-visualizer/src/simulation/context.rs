//! Per-run simulation state
//!
//! [`SimulationContext`] owns everything that changes while a program plays
//! back: the live units, the head's position along the waypoint sequence,
//! elapsed time and the playback state. Each call to
//! [`SimulationContext::tick`] runs one frame in a fixed order:
//!
//! 1. the clock integrates every falling unit,
//! 2. the collision engine freezes grounded and stacked units,
//! 3. the head consumes one waypoint, depositing a unit if it is a feed point.
//!
//! A unit deposited during a tick is first integrated on the next one.

use std::fmt;

use glam::Vec3;
use serde::Serialize;
use tracing::{debug, info};

use super::{
    deposit_units, ClockStep, CollisionEngine, PathBounds, PathInterpolator, ResolveReport,
    SimulationClock, Unit, Waypoint,
};
use crate::gcode::MotionCommand;
use crate::visualizer::geometry::model_matrix;
use crate::visualizer::{FlyCamera, FrameSnapshot};
use depositkit_core::modes::PlaybackMode;
use depositkit_core::SimulationError;
use depositkit_settings::{Config, SimulationSettings};

/// Playback state of a simulation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    Idle,
    Running,
    Paused,
    /// Path consumed and every unit resting
    Complete,
}

impl PlaybackState {
    /// Returns the name of the state.
    pub fn name(&self) -> &'static str {
        match self {
            PlaybackState::Idle => "Idle",
            PlaybackState::Running => "Running",
            PlaybackState::Paused => "Paused",
            PlaybackState::Complete => "Complete",
        }
    }
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What happened during one tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    /// Tick number, starting at 1
    pub tick: u64,
    pub clock: ClockStep,
    pub resolve: ResolveReport,
    /// Waypoint consumed this tick, if any were left
    pub waypoint: Option<Waypoint>,
    /// True if a unit was deposited
    pub spawned: bool,
    /// State after the tick
    pub state: PlaybackState,
}

/// Summary counters for a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimulationStats {
    pub mode: PlaybackMode,
    pub state: PlaybackState,
    pub ticks: u64,
    pub simulated_seconds: f64,
    pub waypoints_total: usize,
    pub waypoints_consumed: usize,
    pub units_total: usize,
    pub units_resting: usize,
    pub units_falling: usize,
}

/// Owned state of one simulation run
#[derive(Debug, Clone)]
pub struct SimulationContext {
    mode: PlaybackMode,
    waypoints: Vec<Waypoint>,
    cursor: usize,
    head: Vec3,
    units: Vec<Unit>,
    initial_units: Vec<Unit>,
    clock: SimulationClock,
    engine: CollisionEngine,
    spawn_velocity: f32,
    state: PlaybackState,
    tick_count: u64,
    simulated_time: f64,
}

impl SimulationContext {
    /// Build a run for the given playback mode
    pub fn new(
        commands: &[MotionCommand],
        settings: &SimulationSettings,
        mode: PlaybackMode,
    ) -> Result<Self, SimulationError> {
        let interpolator = PathInterpolator::new(settings.unit_size)?;
        let clock = SimulationClock::new(settings.gravity)?;
        let engine = CollisionEngine::new(settings.unit_size, settings.max_stack_angle_deg)?;
        let waypoints = interpolator.interpolate(commands);

        let initial_units = match mode {
            PlaybackMode::HeadTravel => Vec::new(),
            PlaybackMode::Deposition => {
                deposit_units(commands, settings.unit_size, settings.spawn_velocity)
            }
        };

        let mut context = Self {
            mode,
            waypoints,
            cursor: 0,
            head: Vec3::ZERO,
            units: Vec::new(),
            initial_units,
            clock,
            engine,
            spawn_velocity: settings.spawn_velocity,
            state: PlaybackState::Idle,
            tick_count: 0,
            simulated_time: 0.0,
        };
        context.reset();

        info!(
            "Prepared {} run: {} waypoints, {} initial units",
            mode,
            context.waypoints.len(),
            context.units.len()
        );
        Ok(context)
    }

    /// The head walks the path and deposits as it goes
    pub fn head_travel(
        commands: &[MotionCommand],
        settings: &SimulationSettings,
    ) -> Result<Self, SimulationError> {
        Self::new(commands, settings, PlaybackMode::HeadTravel)
    }

    /// Every unit is placed up front; the head stays at the origin
    pub fn deposition(
        commands: &[MotionCommand],
        settings: &SimulationSettings,
    ) -> Result<Self, SimulationError> {
        Self::new(commands, settings, PlaybackMode::Deposition)
    }

    /// Build a run with the mode and physics from a loaded configuration
    pub fn from_config(
        commands: &[MotionCommand],
        config: &Config,
    ) -> Result<Self, SimulationError> {
        Self::new(commands, &config.simulation, config.playback.mode)
    }

    pub fn start(&mut self) -> Result<(), SimulationError> {
        self.transition(PlaybackState::Idle, PlaybackState::Running)?;
        info!("Simulation started ({} mode)", self.mode);
        Ok(())
    }

    pub fn pause(&mut self) -> Result<(), SimulationError> {
        self.transition(PlaybackState::Running, PlaybackState::Paused)?;
        debug!("Simulation paused at tick {}", self.tick_count);
        Ok(())
    }

    pub fn resume(&mut self) -> Result<(), SimulationError> {
        self.transition(PlaybackState::Paused, PlaybackState::Running)?;
        debug!("Simulation resumed at tick {}", self.tick_count);
        Ok(())
    }

    /// Restore the state right after construction
    pub fn reset(&mut self) {
        self.units = self.initial_units.clone();
        self.cursor = match self.mode {
            PlaybackMode::HeadTravel => 0,
            PlaybackMode::Deposition => self.waypoints.len(),
        };
        self.head = Vec3::ZERO;
        self.state = PlaybackState::Idle;
        self.tick_count = 0;
        self.simulated_time = 0.0;
    }

    fn transition(
        &mut self,
        from: PlaybackState,
        to: PlaybackState,
    ) -> Result<(), SimulationError> {
        if self.state != from {
            return Err(SimulationError::InvalidPlaybackTransition {
                current: self.state.name().to_string(),
                requested: to.name().to_string(),
            });
        }
        self.state = to;
        Ok(())
    }

    /// Run one frame with `elapsed` seconds of simulated time
    ///
    /// An idle run is started implicitly. A paused or complete run is left
    /// unchanged and the returned report says so through its state.
    pub fn tick(&mut self, elapsed: f32) -> Result<TickReport, SimulationError> {
        if self.state == PlaybackState::Idle {
            self.start()?;
        }
        if self.state != PlaybackState::Running {
            return Ok(TickReport {
                tick: self.tick_count,
                clock: ClockStep::default(),
                resolve: ResolveReport::default(),
                waypoint: None,
                spawned: false,
                state: self.state,
            });
        }

        let clock = self.clock.advance(&mut self.units, elapsed)?;
        let resolve = self.engine.resolve(&mut self.units);

        let waypoint = self.waypoints.get(self.cursor).copied();
        let mut spawned = false;
        if let Some(waypoint) = waypoint {
            self.head = waypoint.position;
            if waypoint.feed {
                self.units
                    .push(Unit::new(waypoint.position, self.spawn_velocity));
                spawned = true;
            }
            self.cursor += 1;
        }

        self.tick_count += 1;
        self.simulated_time += elapsed as f64;

        if self.is_settled() {
            self.state = PlaybackState::Complete;
            info!(
                "Simulation complete after {} ticks ({:.3}s simulated), {} units at rest",
                self.tick_count,
                self.simulated_time,
                self.units.len()
            );
        }

        Ok(TickReport {
            tick: self.tick_count,
            clock,
            resolve,
            waypoint,
            spawned,
            state: self.state,
        })
    }

    /// True once every waypoint is consumed and every unit rests
    pub fn is_settled(&self) -> bool {
        self.cursor >= self.waypoints.len() && self.units.iter().all(|u| u.resting)
    }

    /// Percentage of playback done
    ///
    /// Waypoints consumed for head travel, units at rest for deposition.
    pub fn progress_percentage(&self) -> f64 {
        let (done, total) = match self.mode {
            PlaybackMode::HeadTravel => (self.cursor, self.waypoints.len()),
            PlaybackMode::Deposition => (self.resting_count(), self.units.len()),
        };
        if total == 0 {
            return 100.0;
        }
        (done as f64 / total as f64 * 100.0).min(100.0)
    }

    fn resting_count(&self) -> usize {
        self.units.iter().filter(|u| u.resting).count()
    }

    pub fn stats(&self) -> SimulationStats {
        let units_resting = self.resting_count();
        SimulationStats {
            mode: self.mode,
            state: self.state,
            ticks: self.tick_count,
            simulated_seconds: self.simulated_time,
            waypoints_total: self.waypoints.len(),
            waypoints_consumed: self.cursor.min(self.waypoints.len()),
            units_total: self.units.len(),
            units_resting,
            units_falling: self.units.len() - units_resting,
        }
    }

    /// Read-only view of this frame for a renderer
    pub fn snapshot(&self, camera: &FlyCamera) -> FrameSnapshot<'_> {
        FrameSnapshot {
            tick: self.tick_count,
            head_position: self.head,
            head_model: model_matrix(self.head),
            units: &self.units,
            view: camera.view_matrix(),
            projection: camera.projection_matrix(),
            state: self.state,
            progress: self.progress_percentage(),
        }
    }

    /// Bounds of the whole path, for framing the camera
    pub fn bounds(&self) -> Option<PathBounds> {
        PathInterpolator::bounds(&self.waypoints)
    }

    pub fn mode(&self) -> PlaybackMode {
        self.mode
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Index of the next waypoint the head will consume
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn head_position(&self) -> Vec3 {
        self.head
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn simulated_time(&self) -> f64 {
        self.simulated_time
    }
}
