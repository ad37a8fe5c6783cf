//! Headless renderers
//!
//! [`TraceRenderer`] writes one JSON object per recorded frame, suitable for
//! replaying a run in another tool. [`LogRenderer`] only reports progress
//! through `tracing`.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use super::snapshot::{FrameRenderer, FrameSnapshot};
use crate::simulation::PlaybackState;
use depositkit_core::Result;

/// One unit inside a [`FrameRecord`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UnitRecord {
    pub position: [f32; 3],
    pub resting: bool,
}

/// Serialized form of a frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameRecord {
    pub tick: u64,
    pub state: PlaybackState,
    pub progress: f64,
    pub head: [f32; 3],
    pub units_total: usize,
    pub units_resting: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units: Option<Vec<UnitRecord>>,
}

impl FrameRecord {
    pub fn from_snapshot(frame: &FrameSnapshot<'_>, include_units: bool) -> Self {
        let units = include_units.then(|| {
            frame
                .units
                .iter()
                .map(|u| UnitRecord {
                    position: u.position.to_array(),
                    resting: u.resting,
                })
                .collect()
        });

        Self {
            tick: frame.tick,
            state: frame.state,
            progress: frame.progress,
            head: frame.head_position.to_array(),
            units_total: frame.units.len(),
            units_resting: frame.resting_count(),
            units,
        }
    }
}

/// Writes frames as JSON lines
///
/// Only every `stride`-th tick is written, plus the frame that completes
/// the run. A tick is written at most once, so frames repeated while paused
/// or after completion add nothing.
pub struct TraceRenderer<W: Write> {
    writer: W,
    stride: u64,
    include_units: bool,
    frames_written: u64,
    last_tick: Option<u64>,
}

impl TraceRenderer<BufWriter<File>> {
    /// Trace into a newly created file
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path)?;
        debug!("Writing frame trace to {}", path.display());
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> TraceRenderer<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            stride: 1,
            include_units: false,
            frames_written: 0,
            last_tick: None,
        }
    }

    /// Write every `stride`-th frame (0 is treated as 1)
    pub fn with_stride(mut self, stride: u64) -> Self {
        self.stride = stride.max(1);
        self
    }

    /// Include every unit's position in each record
    pub fn with_units(mut self, include_units: bool) -> Self {
        self.include_units = include_units;
        self
    }

    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> FrameRenderer for TraceRenderer<W> {
    fn render(&mut self, frame: &FrameSnapshot<'_>) -> Result<()> {
        if !due(frame, self.stride, self.last_tick) {
            return Ok(());
        }

        let record = FrameRecord::from_snapshot(frame, self.include_units);
        serde_json::to_writer(&mut self.writer, &record).map_err(io::Error::from)?;
        self.writer.write_all(b"\n")?;
        self.frames_written += 1;
        self.last_tick = Some(frame.tick);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        debug!("Frame trace finished, {} frames written", self.frames_written);
        Ok(())
    }
}

/// True if `frame` falls on the stride or completes the run, and its tick
/// has not been output yet
fn due(frame: &FrameSnapshot<'_>, stride: u64, last_tick: Option<u64>) -> bool {
    let on_stride = frame.tick % stride == 0 || frame.state == PlaybackState::Complete;
    on_stride && last_tick != Some(frame.tick)
}

/// Logs progress every `interval` ticks
#[derive(Debug, Clone)]
pub struct LogRenderer {
    interval: u64,
    frames: u64,
    logged: u64,
    last_tick: Option<u64>,
}

impl LogRenderer {
    pub fn new(interval: u64) -> Self {
        Self {
            interval: interval.max(1),
            frames: 0,
            logged: 0,
            last_tick: None,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Number of progress lines logged
    pub fn logged(&self) -> u64 {
        self.logged
    }
}

impl FrameRenderer for LogRenderer {
    fn render(&mut self, frame: &FrameSnapshot<'_>) -> Result<()> {
        self.frames += 1;
        if due(frame, self.interval, self.last_tick) {
            self.logged += 1;
            self.last_tick = Some(frame.tick);
            info!(
                "Tick {}: {:.1}% ({} units, {} resting), head at ({:.3}, {:.3}, {:.3})",
                frame.tick,
                frame.progress,
                frame.units.len(),
                frame.resting_count(),
                frame.head_position.x,
                frame.head_position.y,
                frame.head_position.z
            );
        }
        Ok(())
    }
}
