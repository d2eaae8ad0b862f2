//! World-frame side of the pipeline: projecting rover-centric points into
//! the persistent grid and accumulating them per class.
//!
//! - [`projector`] – rotation by yaw, scale + translation by pose, clipping.
//! - [`map`] – three-channel saturating world map and its update policy.

pub mod map;
pub mod projector;

pub use map::{AccumulationPolicy, MapChannel, ProjectedClasses, WorldMap};
pub use projector::{pix_to_world, rotate_pix, translate_pix, Pose, WorldPoints};
