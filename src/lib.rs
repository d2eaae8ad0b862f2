#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod calibration;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod perception;
pub mod state;
pub mod world;

// Stage modules – usable on their own for tooling and tests.
pub mod classify;
pub mod coords;
pub mod homography;
pub mod rectify;

// --- High-level re-exports -------------------------------------------------

// Main entry points: pipeline + state + results.
pub use crate::diagnostics::PerceptionReport;
pub use crate::error::{PerceptionError, Result};
pub use crate::perception::{PerceptionParams, PerceptionPipeline, PerceptionStep};
pub use crate::state::RoverState;

// Common data types.
pub use crate::calibration::CalibrationGeometry;
pub use crate::image::{Frame, Mask};
pub use crate::world::{MapChannel, Pose, WorldMap};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use rover_perception::prelude::*;
///
/// # fn main() -> rover_perception::Result<()> {
/// let frame = Frame::new(320, 160);
/// let pipeline = PerceptionPipeline::new(PerceptionParams::default(), 320, 160)?;
/// let mut state = RoverState::new(320, 160, 200)?.with_pose(Pose::new(100.0, 100.0, 0.0));
///
/// let report = pipeline.process(&frame, &mut state)?;
/// println!("navigable={} obstacle={}", report.navigable.pixels, report.obstacle.pixels);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{Frame, Mask};
    pub use crate::world::{MapChannel, Pose, WorldMap};
    pub use crate::{PerceptionParams, PerceptionPipeline, PerceptionReport, RoverState};
}

// --- Stage-level API (for tools & advanced users) ---------------------------

pub mod stages {
    pub use crate::classify::{
        classify, navigable_mask, obstacle_mask, sample_mask, ClassMasks, ClassifierParams,
        RgbThreshold, SampleThreshold,
    };
    pub use crate::coords::{rover_coords, to_polar_coords, PolarPoints, RoverPoints};
    pub use crate::homography::{apply_homography, apply_homography_points, perspective_transform};
    pub use crate::rectify::{Rectified, Rectifier};
    pub use crate::world::{
        pix_to_world, rotate_pix, translate_pix, AccumulationPolicy, ProjectedClasses, WorldPoints,
    };
}
