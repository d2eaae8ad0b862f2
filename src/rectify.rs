//! Perspective rectification of the raw camera frame into a top-down view.
//!
//! The rectifier inverts the calibration homography once and precomputes a
//! bilinear tap table for every destination pixel, so warping a frame is a
//! single pass of weighted gathers. Source neighbours outside the raw frame
//! contribute zero, which makes out-of-view regions black.
//!
//! The validity mask is the same warp applied to an all-ones image: a pixel
//! is valid when at least half of its interpolation weight falls inside the
//! source frame.
use crate::calibration::CalibrationGeometry;
use crate::error::{PerceptionError, Result};
use crate::homography::apply_homography;
use crate::image::{Frame, ImageView, Mask, Rgb};
use log::debug;
use nalgebra::Matrix3;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Bilinear interpolation taps for one destination pixel. Out-of-bounds
/// neighbours carry zero weight.
#[derive(Clone, Copy, Debug, Default)]
struct Tap {
    idx: [usize; 4],
    weight: [f32; 4],
}

impl Tap {
    fn coverage(&self) -> f32 {
        self.weight.iter().sum()
    }

    #[inline]
    fn gather(&self, src: &[Rgb]) -> Rgb {
        let mut acc = [0.0f32; 3];
        for (&i, &w) in self.idx.iter().zip(self.weight.iter()) {
            if w > 0.0 {
                let px = src[i];
                acc[0] += w * px[0] as f32;
                acc[1] += w * px[1] as f32;
                acc[2] += w * px[2] as f32;
            }
        }
        acc.map(|v| v.round().clamp(0.0, 255.0) as u8)
    }
}

/// Warped frame together with the rectifier's validity mask.
#[derive(Debug)]
pub struct Rectified<'a> {
    pub frame: Frame,
    pub valid: &'a Mask,
}

/// Precomputed perspective warp for a fixed calibration and frame size.
#[derive(Clone, Debug)]
pub struct Rectifier {
    width: usize,
    height: usize,
    hmtx: Matrix3<f32>,
    taps: Vec<Tap>,
    valid: Mask,
}

impl Rectifier {
    /// Build the warp for `width × height` frames. Degenerate geometry or an
    /// empty frame size is a configuration error.
    pub fn new(geometry: &CalibrationGeometry, width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(PerceptionError::InvalidDimensions(format!(
                "frame size must be positive, got {width}x{height}"
            )));
        }
        let hmtx = geometry.homography()?;
        let inverse = hmtx.try_inverse().ok_or_else(|| {
            PerceptionError::DegenerateCalibration("homography is not invertible".to_string())
        })?;

        let mut taps = Vec::with_capacity(width * height);
        let mut valid = Mask::new(width, height);
        for y in 0..height {
            for x in 0..width {
                let tap = apply_homography(&inverse, [x as f32, y as f32])
                    .map(|p| bilinear_tap(p, width, height))
                    .unwrap_or_default();
                if tap.coverage() >= 0.5 {
                    valid.set(x, y, 1);
                }
                taps.push(tap);
            }
        }
        debug!(
            "Rectifier::new {}x{} valid_pixels={}",
            width,
            height,
            valid.count()
        );

        Ok(Self {
            width,
            height,
            hmtx,
            taps,
            valid,
        })
    }

    /// Source → destination homography.
    pub fn homography(&self) -> &Matrix3<f32> {
        &self.hmtx
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Pixels of the output grid that were sampled from inside the raw frame.
    pub fn valid_mask(&self) -> &Mask {
        &self.valid
    }

    /// Warp `frame` into the top-down view at the same resolution.
    pub fn warp(&self, frame: &Frame) -> Result<Rectified<'_>> {
        if frame.w != self.width || frame.h != self.height {
            return Err(PerceptionError::FrameSizeMismatch {
                expected_w: self.width,
                expected_h: self.height,
                got_w: frame.w,
                got_h: frame.h,
            });
        }
        let src: Vec<Rgb>;
        let src_slice = match frame.as_slice() {
            Some(s) => s,
            None => {
                src = frame.rows().flatten().copied().collect();
                &src
            }
        };

        let mut out = Frame::new(self.width, self.height);
        let w = self.width;

        #[cfg(feature = "parallel")]
        out.data
            .par_chunks_mut(w)
            .zip(self.taps.par_chunks(w))
            .for_each(|(dst, taps)| warp_row(taps, src_slice, dst));

        #[cfg(not(feature = "parallel"))]
        out.data
            .chunks_mut(w)
            .zip(self.taps.chunks(w))
            .for_each(|(dst, taps)| warp_row(taps, src_slice, dst));

        Ok(Rectified {
            frame: out,
            valid: &self.valid,
        })
    }
}

fn warp_row(taps: &[Tap], src: &[Rgb], dst: &mut [Rgb]) {
    for (px, tap) in dst.iter_mut().zip(taps) {
        *px = tap.gather(src);
    }
}

fn bilinear_tap(p: [f32; 2], width: usize, height: usize) -> Tap {
    let [x, y] = p;
    // Anything further than one pixel outside cannot touch the frame.
    if !(x > -1.0 && y > -1.0 && x < width as f32 && y < height as f32) {
        return Tap::default();
    }
    let xf = x.floor();
    let yf = y.floor();
    let tx = x - xf;
    let ty = y - yf;
    let x0 = xf as isize;
    let y0 = yf as isize;

    let corners = [
        (x0, y0, (1.0 - tx) * (1.0 - ty)),
        (x0 + 1, y0, tx * (1.0 - ty)),
        (x0, y0 + 1, (1.0 - tx) * ty),
        (x0 + 1, y0 + 1, tx * ty),
    ];
    let mut tap = Tap::default();
    for (k, &(cx, cy, w)) in corners.iter().enumerate() {
        if cx >= 0 && cy >= 0 && (cx as usize) < width && (cy as usize) < height {
            tap.idx[k] = cy as usize * width + cx as usize;
            tap.weight[k] = w;
        }
    }
    tap
}
