//! Frame snapshots and the renderer seam

use glam::{Mat4, Vec3};

use super::geometry::model_matrix;
use crate::simulation::{PlaybackState, Unit};
use depositkit_core::Result;

/// Read-only view of one frame, borrowed from the simulation context
#[derive(Debug, Clone, Copy)]
pub struct FrameSnapshot<'a> {
    pub tick: u64,
    pub head_position: Vec3,
    /// Translation placing the head marker at the nozzle
    pub head_model: Mat4,
    /// Live units in deposition order
    pub units: &'a [Unit],
    pub view: Mat4,
    pub projection: Mat4,
    pub state: PlaybackState,
    /// 0 to 100
    pub progress: f64,
}

impl<'a> FrameSnapshot<'a> {
    pub fn resting_count(&self) -> usize {
        self.units.iter().filter(|u| u.resting).count()
    }

    /// Model matrix per unit, in the same order as `units`
    pub fn unit_models(&self) -> impl Iterator<Item = Mat4> + 'a {
        let units = self.units;
        units.iter().map(|u| model_matrix(u.position))
    }

    /// Combined projection * view
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }
}

/// Consumer of frame snapshots
///
/// Implemented by anything that draws or records frames. The host calls
/// [`FrameRenderer::render`] once per tick and [`FrameRenderer::finish`]
/// once when playback stops.
pub trait FrameRenderer {
    fn render(&mut self, frame: &FrameSnapshot<'_>) -> Result<()>;

    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}
