//! Caller-owned robot state updated by each perception step.
use crate::coords::mean;
use crate::error::Result;
use crate::image::Frame;
use crate::world::{Pose, WorldMap};

/// Mutable record shared between perception and the rest of the robot.
///
/// The pipeline reads `pose` and `samples_pos`, mutates `world_map` and
/// overwrites `vision_image`, `nav_dists` and `nav_angles`. `near_sample`
/// is only ever raised by perception, never cleared.
#[derive(Clone, Debug)]
pub struct RoverState {
    pub pose: Pose,
    pub world_map: WorldMap,
    /// Robot-centric class overlay: red = obstacle, green = sample,
    /// blue = navigable.
    pub vision_image: Frame,
    /// Distances of navigable pixels in rover-centric pixels.
    pub nav_dists: Vec<f32>,
    /// Bearings of navigable pixels in radians.
    pub nav_angles: Vec<f32>,
    /// Known sample locations in world-grid coordinates.
    pub samples_pos: Vec<[f32; 2]>,
    /// Raised when a detected sample cell coincides with a known location.
    /// Clearing it is up to the caller.
    pub near_sample: bool,
}

impl RoverState {
    /// Fresh state with an empty world map and a black vision buffer sized
    /// for `frame_w × frame_h` camera frames.
    pub fn new(frame_w: usize, frame_h: usize, world_size: usize) -> Result<Self> {
        Ok(Self {
            pose: Pose::default(),
            world_map: WorldMap::new(world_size)?,
            vision_image: Frame::new(frame_w, frame_h),
            nav_dists: Vec::new(),
            nav_angles: Vec::new(),
            samples_pos: Vec::new(),
            near_sample: false,
        })
    }

    pub fn with_pose(mut self, pose: Pose) -> Self {
        self.pose = pose;
        self
    }

    pub fn with_samples(mut self, samples_pos: Vec<[f32; 2]>) -> Self {
        self.samples_pos = samples_pos;
        self
    }

    /// Mean bearing of navigable terrain, `None` when nothing was navigable.
    pub fn mean_nav_angle(&self) -> Option<f32> {
        mean(&self.nav_angles)
    }
}
