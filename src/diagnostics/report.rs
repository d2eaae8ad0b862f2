use super::timing::TimingBreakdown;
use crate::coords::PolarPoints;
use crate::world::Pose;
use nalgebra::Matrix3;
use serde::Serialize;

/// Summary returned by [`PerceptionPipeline::process`](crate::PerceptionPipeline).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerceptionReport {
    pub input: InputDescriptor,
    /// Source → rectified homography used for this step.
    pub homography: Matrix3<f32>,
    /// Rectified pixels sampled from inside the raw frame.
    pub valid_pixels: usize,
    pub navigable: ClassSummary,
    pub obstacle: ClassSummary,
    pub sample: ClassSummary,
    /// Index into `RoverState::samples_pos` of a known sample seen on the map.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub near_sample: Option<usize>,
    pub timings: TimingBreakdown,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    pub world_size: usize,
    pub pose: Pose,
}

/// Per-class detection statistics in rover-centric polar terms.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSummary {
    pub pixels: usize,
    /// `None` when the class had no pixels this frame.
    pub mean_angle_rad: Option<f32>,
    pub mean_dist: Option<f32>,
}

impl ClassSummary {
    pub fn from_polar(polar: &PolarPoints) -> Self {
        Self {
            pixels: polar.len(),
            mean_angle_rad: polar.mean_angle(),
            mean_dist: polar.mean_dist(),
        }
    }

    pub fn detected(&self) -> bool {
        self.pixels > 0
    }
}
