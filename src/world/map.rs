//! Persistent three-channel world map.
//!
//! Channels are stored as separate `u8` arrays (row = world y, column =
//! world x). Obstacle and navigable channels are saturating counters; the
//! sample channel is a flag overwritten with a fixed value.
use super::projector::WorldPoints;
use crate::error::{PerceptionError, Result};
use crate::image::Frame;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MapChannel {
    Obstacle,
    Sample,
    Navigable,
}

impl MapChannel {
    pub const ALL: [MapChannel; 3] = [
        MapChannel::Obstacle,
        MapChannel::Sample,
        MapChannel::Navigable,
    ];
}

/// Per-class update rule applied by [`WorldMap::accumulate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccumulationPolicy {
    /// Added (saturating) to the obstacle channel per obstacle point.
    pub obstacle_weight: u8,
    /// Added (saturating) to the navigable channel per navigable point.
    pub navigable_weight: u8,
    /// Written to the sample channel per sample point.
    pub sample_value: u8,
}

impl Default for AccumulationPolicy {
    fn default() -> Self {
        Self {
            obstacle_weight: 10,
            navigable_weight: 1,
            sample_value: 255,
        }
    }
}

/// Projected cells for each class of one frame.
#[derive(Clone, Debug, Default)]
pub struct ProjectedClasses {
    pub obstacle: WorldPoints,
    pub sample: WorldPoints,
    pub navigable: WorldPoints,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorldMap {
    size: usize,
    obstacle: Vec<u8>,
    sample: Vec<u8>,
    navigable: Vec<u8>,
}

impl WorldMap {
    /// Empty `size × size` map.
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(PerceptionError::InvalidDimensions(
                "world map size must be positive".to_string(),
            ));
        }
        let cells = size.checked_mul(size).ok_or_else(|| {
            PerceptionError::InvalidDimensions(format!("world map size {size} overflows"))
        })?;
        Ok(Self {
            size,
            obstacle: vec![0; cells],
            sample: vec![0; cells],
            navigable: vec![0; cells],
        })
    }

    /// Side length in cells.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn idx(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.size && y < self.size);
        y * self.size + x
    }

    /// Raw channel data, row-major.
    pub fn channel(&self, channel: MapChannel) -> &[u8] {
        match channel {
            MapChannel::Obstacle => &self.obstacle,
            MapChannel::Sample => &self.sample,
            MapChannel::Navigable => &self.navigable,
        }
    }

    fn channel_mut(&mut self, channel: MapChannel) -> &mut [u8] {
        match channel {
            MapChannel::Obstacle => &mut self.obstacle,
            MapChannel::Sample => &mut self.sample,
            MapChannel::Navigable => &mut self.navigable,
        }
    }

    /// Value at world cell (x, y). Panics outside the map.
    #[inline]
    pub fn get(&self, channel: MapChannel, x: usize, y: usize) -> u8 {
        self.channel(channel)[self.idx(x, y)]
    }

    /// Saturating add of `weight` per point; repeated points compound.
    pub fn add_saturating(&mut self, channel: MapChannel, points: &WorldPoints, weight: u8) {
        let size = self.size;
        let data = self.channel_mut(channel);
        for (x, y) in points.iter() {
            let cell = &mut data[y * size + x];
            *cell = cell.saturating_add(weight);
        }
    }

    /// Overwrite every point with `value`.
    pub fn set_value(&mut self, channel: MapChannel, points: &WorldPoints, value: u8) {
        let size = self.size;
        let data = self.channel_mut(channel);
        for (x, y) in points.iter() {
            data[y * size + x] = value;
        }
    }

    /// Merge one frame's projected classes.
    pub fn accumulate(&mut self, projected: &ProjectedClasses, policy: &AccumulationPolicy) {
        self.add_saturating(MapChannel::Obstacle, &projected.obstacle, policy.obstacle_weight);
        self.set_value(MapChannel::Sample, &projected.sample, policy.sample_value);
        self.add_saturating(MapChannel::Navigable, &projected.navigable, policy.navigable_weight);
    }

    /// Number of non-zero cells in `channel`.
    pub fn observed_cells(&self, channel: MapChannel) -> usize {
        self.channel(channel).iter().filter(|&&v| v != 0).count()
    }

    /// World cells currently flagged in the sample channel, as `(x, y)`.
    pub fn sample_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let size = self.size;
        self.sample
            .iter()
            .enumerate()
            .filter(|(_, v)| **v != 0)
            .map(move |(i, _)| (i % size, i / size))
    }

    /// Index of the first known sample location lying within `max_dist`
    /// cells of any flagged sample cell.
    pub fn nearest_known_sample(&self, known: &[[f32; 2]], max_dist: f32) -> Option<usize> {
        let cells: Vec<(usize, usize)> = self.sample_cells().collect();
        if cells.is_empty() {
            return None;
        }
        known.iter().position(|k| {
            cells.iter().any(|&(x, y)| {
                let dx = k[0] - x as f32;
                let dy = k[1] - y as f32;
                (dx * dx + dy * dy).sqrt() < max_dist
            })
        })
    }

    /// Render as RGB: red = obstacle, green = sample, blue = navigable.
    pub fn to_frame(&self) -> Frame {
        let mut frame = Frame::new(self.size, self.size);
        for (i, px) in frame.data.iter_mut().enumerate() {
            *px = [self.obstacle[i], self.sample[i], self.navigable[i]];
        }
        frame
    }
}
