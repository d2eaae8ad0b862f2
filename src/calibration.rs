//! Fixed camera-to-ground calibration used by the rectifier.
//!
//! The destination quadrilateral is a `2 * dst_size` pixel square sitting
//! `bottom_offset` pixels above the bottom edge of the frame, horizontally
//! centred. With `dst_size = 5` a 1 m calibration grid square becomes a
//! 10×10 pixel square, which is where the default world scale of 10 comes
//! from.
use crate::error::{PerceptionError, Result};
use crate::homography::perspective_transform;
use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};

/// Default camera resolution of the rig the constants were measured on.
pub const DEFAULT_FRAME_WIDTH: usize = 320;
pub const DEFAULT_FRAME_HEIGHT: usize = 160;

/// Grid-square corners in the raw camera image (bottom-left, bottom-right,
/// top-right, top-left).
pub const DEFAULT_SOURCE: [[f32; 2]; 4] =
    [[14.0, 140.0], [301.0, 140.0], [200.0, 96.0], [118.0, 96.0]];
pub const DEFAULT_DST_SIZE: f32 = 5.0;
pub const DEFAULT_BOTTOM_OFFSET: f32 = 6.0;

/// Four source/destination correspondences defining the rectifying homography.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalibrationGeometry {
    pub source: [[f32; 2]; 4],
    pub destination: [[f32; 2]; 4],
}

impl CalibrationGeometry {
    pub fn new(source: [[f32; 2]; 4], destination: [[f32; 2]; 4]) -> Self {
        Self {
            source,
            destination,
        }
    }

    /// Destination square of half-size `dst_size`, centred horizontally and
    /// raised `bottom_offset` pixels from the bottom of a `width × height`
    /// frame. Corner order matches [`DEFAULT_SOURCE`].
    pub fn grid_box(
        source: [[f32; 2]; 4],
        width: usize,
        height: usize,
        dst_size: f32,
        bottom_offset: f32,
    ) -> Self {
        let cx = width as f32 / 2.0;
        let bottom = height as f32 - bottom_offset;
        let top = bottom - 2.0 * dst_size;
        Self::new(
            source,
            [
                [cx - dst_size, bottom],
                [cx + dst_size, bottom],
                [cx + dst_size, top],
                [cx - dst_size, top],
            ],
        )
    }

    /// Homography mapping `source` onto `destination`.
    pub fn homography(&self) -> Result<Matrix3<f32>> {
        perspective_transform(&self.source, &self.destination)
    }

    /// Fails when any calibration point lies outside a `width × height` frame.
    pub fn check_bounds(&self, width: usize, height: usize) -> Result<()> {
        let (w, h) = (width as f32, height as f32);
        let inside = |p: &[f32; 2]| p[0] >= 0.0 && p[1] >= 0.0 && p[0] <= w && p[1] <= h;
        if let Some(p) = self.source.iter().find(|p| !inside(*p)) {
            return Err(PerceptionError::InvalidDimensions(format!(
                "source point ({}, {}) lies outside the {width}x{height} frame",
                p[0], p[1]
            )));
        }
        if let Some(p) = self.destination.iter().find(|p| !inside(*p)) {
            return Err(PerceptionError::InvalidDimensions(format!(
                "destination point ({}, {}) lies outside the {width}x{height} frame",
                p[0], p[1]
            )));
        }
        Ok(())
    }
}

impl Default for CalibrationGeometry {
    fn default() -> Self {
        Self::grid_box(
            DEFAULT_SOURCE,
            DEFAULT_FRAME_WIDTH,
            DEFAULT_FRAME_HEIGHT,
            DEFAULT_DST_SIZE,
            DEFAULT_BOTTOM_OFFSET,
        )
    }
}
