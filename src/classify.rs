//! Fixed-threshold colour classification into navigable, obstacle and
//! sample masks.
//!
//! Navigable terrain is read from the rectified frame; obstacles are its
//! exact complement over the same grid. Samples are read from the raw frame
//! because upright objects do not satisfy the ground-plane assumption the
//! rectifier makes.
use crate::image::{Frame, ImageView, ImageViewMut, Mask, Rgb};
use serde::{Deserialize, Serialize};

/// Per-channel lower bounds; a pixel passes when every channel is strictly
/// greater than its bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RgbThreshold {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Default for RgbThreshold {
    fn default() -> Self {
        Self {
            r: 160,
            g: 160,
            b: 160,
        }
    }
}

impl RgbThreshold {
    #[inline]
    pub fn passes(&self, px: Rgb) -> bool {
        px[0] > self.r && px[1] > self.g && px[2] > self.b
    }
}

/// Open interval `(low, high)` on one 8-bit channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelRange {
    pub low: u8,
    pub high: u8,
}

impl ChannelRange {
    pub const fn new(low: u8, high: u8) -> Self {
        Self { low, high }
    }

    #[inline]
    pub fn contains(&self, v: u8) -> bool {
        v > self.low && v < self.high
    }
}

/// Sample-of-interest colour gate: high red, suppressed blue, any green.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleThreshold {
    pub red: ChannelRange,
    pub blue: ChannelRange,
}

impl Default for SampleThreshold {
    fn default() -> Self {
        Self {
            red: ChannelRange::new(145, 255),
            blue: ChannelRange::new(0, 110),
        }
    }
}

impl SampleThreshold {
    #[inline]
    pub fn passes(&self, px: Rgb) -> bool {
        self.red.contains(px[0]) && self.blue.contains(px[2])
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierParams {
    pub navigable: RgbThreshold,
    pub sample: SampleThreshold,
}

/// The three per-frame class masks, all with the frame's shape.
#[derive(Clone, Debug)]
pub struct ClassMasks {
    pub navigable: Mask,
    pub obstacle: Mask,
    pub sample: Mask,
}

fn threshold_mask(frame: &Frame, pred: impl Fn(Rgb) -> bool) -> Mask {
    let mut out = Mask::new(frame.w, frame.h);
    for y in 0..frame.h {
        let src = frame.row(y);
        for (d, &px) in out.row_mut(y).iter_mut().zip(src) {
            *d = u8::from(pred(px));
        }
    }
    out
}

/// Navigable terrain on the rectified frame.
pub fn navigable_mask(rectified: &Frame, thresh: RgbThreshold) -> Mask {
    threshold_mask(rectified, |px| thresh.passes(px))
}

/// Everything that is not navigable, over the full rectified grid.
pub fn obstacle_mask(navigable: &Mask) -> Mask {
    navigable.complement()
}

/// Sample-of-interest pixels on the raw camera frame.
pub fn sample_mask(raw: &Frame, thresh: SampleThreshold) -> Mask {
    threshold_mask(raw, |px| thresh.passes(px))
}

/// Run all three classifiers.
pub fn classify(rectified: &Frame, raw: &Frame, params: &ClassifierParams) -> ClassMasks {
    let navigable = navigable_mask(rectified, params.navigable);
    let obstacle = obstacle_mask(&navigable);
    let sample = sample_mask(raw, params.sample);
    ClassMasks {
        navigable,
        obstacle,
        sample,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigable_threshold_is_strict() {
        let t = RgbThreshold::default();
        assert!(!t.passes([160, 200, 200]));
        assert!(t.passes([161, 161, 161]));
        assert!(!t.passes([255, 255, 100]));
    }

    #[test]
    fn sample_gate_uses_open_intervals() {
        let t = SampleThreshold::default();
        assert!(t.passes([200, 100, 50]));
        assert!(t.passes([200, 0, 1]));
        assert!(!t.passes([255, 100, 50]));
        assert!(!t.passes([145, 100, 50]));
        assert!(!t.passes([200, 100, 0]));
        assert!(!t.passes([200, 100, 110]));
    }

    #[test]
    fn obstacle_is_complement_of_navigable() {
        let mut frame = Frame::new(6, 4);
        frame.fill_rect(1, 1, 3, 2, [220, 210, 200]);
        frame.set(5, 3, [161, 255, 170]);
        let masks = classify(&frame, &frame, &ClassifierParams::default());
        assert_eq!(masks.navigable.count(), 7);
        for y in 0..4 {
            for x in 0..6 {
                assert_eq!(masks.navigable.get(x, y) + masks.obstacle.get(x, y), 1);
            }
        }
    }

    #[test]
    fn sample_reads_raw_frame_only() {
        let rectified = Frame::new(4, 4);
        let mut raw = Frame::new(4, 4);
        raw.set(2, 1, [200, 100, 50]);
        let masks = classify(&rectified, &raw, &ClassifierParams::default());
        assert_eq!(masks.sample.count(), 1);
        assert!(masks.sample.is_set(2, 1));
        assert_eq!(masks.navigable.count(), 0);
    }
}
