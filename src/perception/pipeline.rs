//! Pipeline orchestrating one perception step.
//!
//! Typical usage:
//! ```no_run
//! use rover_perception::{Frame, PerceptionParams, PerceptionPipeline, RoverState};
//!
//! # fn example(frame: Frame) -> rover_perception::Result<()> {
//! let pipeline = PerceptionPipeline::new(PerceptionParams::default(), 320, 160)?;
//! let mut state = RoverState::new(320, 160, 200)?;
//! let report = pipeline.process(&frame, &mut state)?;
//! if let Some(angle) = report.navigable.mean_angle_rad {
//!     println!("steer towards {:.1} deg", angle.to_degrees());
//! }
//! # Ok(())
//! # }
//! ```

// Stages
// - Rectify: precomputed bilinear warp + validity mask.
// - Classify: navigable / obstacle (complement) on the rectified frame,
//   sample on the raw frame.
// - Vision: write the three masks into the caller's overlay buffer.
// - Convert: rover-centric Cartesian and polar coordinates per class.
// - Project: rotate by yaw, scale, translate, clip into the world grid.
// - Accumulate: saturating obstacle/navigable counters, sample flag.

use super::params::PerceptionParams;
use crate::classify::{classify, ClassMasks};
use crate::coords::{rover_coords, to_polar_coords, PolarPoints, RoverPoints};
use crate::diagnostics::{
    elapsed_ms, ClassSummary, InputDescriptor, PerceptionReport, TimingBreakdown,
};
use crate::error::{PerceptionError, Result};
use crate::image::{Frame, Mask};
use crate::rectify::Rectifier;
use crate::state::RoverState;
use crate::world::{pix_to_world, ProjectedClasses};
use log::debug;
use std::time::Instant;

/// Everything one step produced, for callers that want more than the report.
#[derive(Clone, Debug)]
pub struct PerceptionStep {
    pub report: PerceptionReport,
    pub rectified: Frame,
    pub masks: ClassMasks,
}

/// Rover-centric views of one class mask.
struct ClassPoints {
    rover: RoverPoints,
    polar: PolarPoints,
}

impl ClassPoints {
    fn from_mask(mask: &Mask) -> Self {
        let rover = rover_coords(mask);
        let polar = to_polar_coords(&rover);
        Self { rover, polar }
    }
}

/// Camera-frame perception for a fixed camera rig and frame size.
#[derive(Clone, Debug)]
pub struct PerceptionPipeline {
    params: PerceptionParams,
    rectifier: Rectifier,
}

impl PerceptionPipeline {
    /// Validate `params` and precompute the warp for `width × height`
    /// frames. Any error here is a configuration error.
    pub fn new(params: PerceptionParams, width: usize, height: usize) -> Result<Self> {
        params.validate()?;
        params.calibration.check_bounds(width, height)?;
        let rectifier = Rectifier::new(&params.calibration, width, height)?;
        debug!(
            "PerceptionPipeline::new {}x{} scale={} H={:?}",
            width,
            height,
            params.scale,
            rectifier.homography()
        );
        Ok(Self { params, rectifier })
    }

    pub fn params(&self) -> &PerceptionParams {
        &self.params
    }

    pub fn rectifier(&self) -> &Rectifier {
        &self.rectifier
    }

    /// Run one step and update `state` in place.
    pub fn process(&self, frame: &Frame, state: &mut RoverState) -> Result<PerceptionReport> {
        self.process_detailed(frame, state).map(|step| step.report)
    }

    /// Like [`process`](Self::process) but also hands back the rectified
    /// frame and the class masks.
    pub fn process_detailed(
        &self,
        frame: &Frame,
        state: &mut RoverState,
    ) -> Result<PerceptionStep> {
        let total_start = Instant::now();
        let (width, height) = self.rectifier.dimensions();
        if state.vision_image.w != width || state.vision_image.h != height {
            return Err(PerceptionError::FrameSizeMismatch {
                expected_w: width,
                expected_h: height,
                got_w: state.vision_image.w,
                got_h: state.vision_image.h,
            });
        }
        let mut timings = TimingBreakdown::default();

        let start = Instant::now();
        let rectified = self.rectifier.warp(frame)?;
        let valid_pixels = rectified.valid.count();
        let rectified = rectified.frame;
        timings.push("rectify", elapsed_ms(start));

        let masks = timings.time("classify", || {
            classify(&rectified, frame, &self.params.classifier)
        });

        timings.time("vision", || {
            state.vision_image.write_channel(0, &masks.obstacle, 255);
            state.vision_image.write_channel(1, &masks.sample, 255);
            state.vision_image.write_channel(2, &masks.navigable, 255);
        });

        let (navigable, obstacle, sample) = timings.time("convert", || {
            (
                ClassPoints::from_mask(&masks.navigable),
                ClassPoints::from_mask(&masks.obstacle),
                ClassPoints::from_mask(&masks.sample),
            )
        });

        let pose = state.pose;
        let world_size = state.world_map.size();
        let scale = self.params.scale;
        let projected = timings.time("project", || ProjectedClasses {
            obstacle: pix_to_world(&obstacle.rover, &pose, world_size, scale),
            sample: pix_to_world(&sample.rover, &pose, world_size, scale),
            navigable: pix_to_world(&navigable.rover, &pose, world_size, scale),
        });

        let near_sample = timings.time("accumulate", || {
            state.world_map.accumulate(&projected, &self.params.policy);
            state
                .world_map
                .nearest_known_sample(&state.samples_pos, self.params.sample_match_dist)
        });
        // Only ever raised here; other sources may also set it.
        if near_sample.is_some() {
            state.near_sample = true;
        }

        let navigable_summary = ClassSummary::from_polar(&navigable.polar);
        let obstacle_summary = ClassSummary::from_polar(&obstacle.polar);
        let sample_summary = ClassSummary::from_polar(&sample.polar);
        state.nav_dists = navigable.polar.dist;
        state.nav_angles = navigable.polar.angle;

        if !navigable_summary.detected() {
            debug!("PerceptionPipeline::process no navigable terrain in view");
        }
        if sample_summary.detected() {
            debug!(
                "PerceptionPipeline::process sample pixels={} bearing={:?}",
                sample_summary.pixels, sample_summary.mean_angle_rad
            );
        }

        timings.total_ms = elapsed_ms(total_start);
        debug!(
            "PerceptionPipeline::process nav={} obs={} sample={} total_ms={:.3}",
            navigable_summary.pixels,
            obstacle_summary.pixels,
            sample_summary.pixels,
            timings.total_ms
        );

        let report = PerceptionReport {
            input: InputDescriptor {
                width,
                height,
                world_size,
                pose,
            },
            homography: *self.rectifier.homography(),
            valid_pixels,
            navigable: navigable_summary,
            obstacle: obstacle_summary,
            sample: sample_summary,
            near_sample,
            timings,
        };
        Ok(PerceptionStep {
            report,
            rectified,
            masks,
        })
    }
}
