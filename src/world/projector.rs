use crate::coords::RoverPoints;
use serde::{Deserialize, Serialize};

/// Vehicle pose in world-grid units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub x: f32,
    pub y: f32,
    /// Heading in degrees, counter-clockwise from the world x axis.
    pub yaw_deg: f32,
}

impl Pose {
    pub fn new(x: f32, y: f32, yaw_deg: f32) -> Self {
        Self { x, y, yaw_deg }
    }
}

/// Integer world-grid cells, already clipped into the map.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct WorldPoints {
    pub x: Vec<usize>,
    pub y: Vec<usize>,
}

impl WorldPoints {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}

/// Rotate a rover-centric point by `yaw_deg` degrees.
#[inline]
pub fn rotate_pix(x: f32, y: f32, yaw_deg: f32) -> (f32, f32) {
    let (sin, cos) = yaw_deg.to_radians().sin_cos();
    rotate_sin_cos(x, y, sin, cos)
}

/// [`rotate_pix`] with the yaw already reduced to `(sin, cos)`.
#[inline]
fn rotate_sin_cos(x: f32, y: f32, sin: f32, cos: f32) -> (f32, f32) {
    (x * cos - y * sin, x * sin + y * cos)
}

/// Scale a rotated point down by `scale` and move it to the vehicle position.
#[inline]
pub fn translate_pix(x_rot: f32, y_rot: f32, x_pos: f32, y_pos: f32, scale: f32) -> (f32, f32) {
    (x_rot / scale + x_pos, y_rot / scale + y_pos)
}

/// Truncate toward zero, then clip into `[0, max]`. Out-of-range and
/// non-finite values land on the map edge instead of being dropped.
#[inline]
fn clip_cell(v: f32, max: i64) -> usize {
    // `as` saturates on overflow and maps NaN to 0.
    (v as i64).clamp(0, max) as usize
}

/// Project rover-centric points into the `world_size × world_size` grid.
///
/// Rotation comes first, then scale and translation, then truncation and
/// clipping.
pub fn pix_to_world(
    points: &RoverPoints,
    pose: &Pose,
    world_size: usize,
    scale: f32,
) -> WorldPoints {
    let max = world_size.saturating_sub(1) as i64;
    let (sin, cos) = pose.yaw_deg.to_radians().sin_cos();
    let mut out = WorldPoints {
        x: Vec::with_capacity(points.len()),
        y: Vec::with_capacity(points.len()),
    };
    for (x, y) in points.iter() {
        let (xr, yr) = rotate_sin_cos(x, y, sin, cos);
        let (xw, yw) = translate_pix(xr, yr, pose.x, pose.y, scale);
        out.x.push(clip_cell(xw, max));
        out.y.push(clip_cell(yw, max));
    }
    out
}
