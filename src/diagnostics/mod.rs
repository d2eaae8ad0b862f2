//! Diagnostics returned alongside each perception step.
//!
//! `PerceptionReport` carries per-class statistics (pixel counts, mean
//! bearing and distance, both optional) and a `TimingBreakdown` with one
//! entry per pipeline stage.

pub mod report;
pub mod timing;

pub use report::{ClassSummary, InputDescriptor, PerceptionReport};
pub use timing::{elapsed_ms, StageTiming, TimingBreakdown};
