//! Error type for configuration problems detected when the pipeline is built
//! or fed a frame it was not configured for.
//!
//! Per-frame conditions such as empty detections or out-of-map projections
//! are not errors and never reach this type.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PerceptionError {
    #[error("Degenerate calibration geometry: {0}")]
    DegenerateCalibration(String),

    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),

    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    #[error("Frame size mismatch: expected {expected_w}x{expected_h}, got {got_w}x{got_h}")]
    FrameSizeMismatch {
        expected_w: usize,
        expected_h: usize,
        got_w: usize,
        got_h: usize,
    },
}

pub type Result<T> = std::result::Result<T, PerceptionError>;
