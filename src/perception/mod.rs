//! Per-frame perception pipeline.
//!
//! Overview
//! - Rectifies the raw camera frame to a top-down view with a fixed,
//!   precomputed perspective warp (see [`crate::rectify`]).
//! - Classifies navigable terrain on the rectified frame, derives obstacles
//!   as its complement and detects samples on the raw frame.
//! - Converts each mask to rover-centric Cartesian and polar coordinates.
//! - Projects the rover-centric points into the world grid using the
//!   vehicle pose and accumulates them into the caller's world map.
//!
//! Modules
//! - [`params`] – configuration consumed by [`PerceptionPipeline::new`].
//! - `pipeline` – the [`PerceptionPipeline`] implementation.
//!
//! Construction validates everything that can be validated up front; a
//! successfully built pipeline only fails per frame when handed a frame or
//! state of the wrong size.

pub mod params;
mod pipeline;

pub use params::PerceptionParams;
pub use pipeline::{PerceptionPipeline, PerceptionStep};
