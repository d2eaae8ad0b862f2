//! Image → rover-centric Cartesian → polar conversions.
//!
//! Rover-centric frame: origin at the bottom-centre of the image, `x`
//! pointing forward (up the image) and `y` pointing left.
use crate::image::Mask;
use serde::Serialize;

/// Rover-centric coordinates of every foreground pixel of a mask.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RoverPoints {
    pub x: Vec<f32>,
    pub y: Vec<f32>,
}

impl RoverPoints {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            x: Vec::with_capacity(n),
            y: Vec::with_capacity(n),
        }
    }

    pub fn push(&mut self, x: f32, y: f32) {
        self.x.push(x);
        self.y.push(y);
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}

/// Distance/bearing pairs, one per rover-centric point.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PolarPoints {
    pub dist: Vec<f32>,
    /// Bearing in radians, counter-clockwise from the forward axis.
    pub angle: Vec<f32>,
}

impl PolarPoints {
    pub fn len(&self) -> usize {
        self.dist.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dist.is_empty()
    }

    /// Mean bearing, `None` when nothing was detected.
    pub fn mean_angle(&self) -> Option<f32> {
        mean(&self.angle)
    }

    /// Mean distance, `None` when nothing was detected.
    pub fn mean_dist(&self) -> Option<f32> {
        mean(&self.dist)
    }
}

/// Arithmetic mean accumulated in `f64`, `None` for an empty slice.
pub(crate) fn mean(values: &[f32]) -> Option<f32> {
    if values.is_empty() {
        return None;
    }
    let sum: f64 = values.iter().map(|&v| v as f64).sum();
    Some((sum / values.len() as f64) as f32)
}

/// Convert the foreground pixels of `mask` to rover-centric coordinates.
pub fn rover_coords(mask: &Mask) -> RoverPoints {
    let height = mask.h as f32;
    let half_width = mask.w as f32 / 2.0;
    let mut pts = RoverPoints::with_capacity(mask.count());
    for (row, col) in mask.foreground() {
        pts.push(height - row as f32, half_width - col as f32);
    }
    pts
}

/// Convert rover-centric points to polar form.
pub fn to_polar_coords(points: &RoverPoints) -> PolarPoints {
    let (dist, angle) = points
        .iter()
        .map(|(x, y)| ((x * x + y * y).sqrt(), y.atan2(x)))
        .unzip();
    PolarPoints { dist, angle }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_is_bottom_centre() {
        let mut mask = Mask::new(4, 3);
        mask.set(0, 2, 1); // bottom-left
        mask.set(2, 0, 1); // top, just right of centre
        let pts = rover_coords(&mask);
        assert_eq!(pts.x, vec![3.0, 1.0]);
        assert_eq!(pts.y, vec![0.0, 2.0]);
    }

    #[test]
    fn polar_round_trip() {
        let mut pts = RoverPoints::default();
        for &(x, y) in &[(3.0, 4.0), (160.0, -80.5), (1.0, 0.0), (0.5, 155.0), (10.0, 10.0)] {
            pts.push(x, y);
        }
        let polar = to_polar_coords(&pts);
        for (i, (x, y)) in pts.iter().enumerate() {
            let (d, a) = (polar.dist[i], polar.angle[i]);
            assert!(d >= 0.0);
            assert!(a > -std::f32::consts::PI && a <= std::f32::consts::PI);
            assert!((d * a.cos() - x).abs() < 1e-3, "x mismatch at {i}");
            assert!((d * a.sin() - y).abs() < 1e-3, "y mismatch at {i}");
        }
        assert!((polar.dist[0] - 5.0).abs() < 1e-6);
    }

    #[test]
    fn empty_mask_has_no_mean() {
        let mask = Mask::new(5, 5);
        let polar = to_polar_coords(&rover_coords(&mask));
        assert!(polar.is_empty());
        assert_eq!(polar.mean_angle(), None);
        assert_eq!(polar.mean_dist(), None);
    }
}
