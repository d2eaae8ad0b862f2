//! Owned RGB raster in row-major layout (stride == width).
//!
//! Used for the raw camera frame, the rectified frame and the caller-owned
//! vision buffer. Pixels are stored as `[r, g, b]` triples so rows can be
//! borrowed as typed slices without reinterpretation.
use super::mask::Mask;
use super::traits::{ImageView, ImageViewMut};

/// One RGB pixel, channel order `[r, g, b]`.
pub type Rgb = [u8; 3];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Image width in pixels
    pub w: usize,
    /// Image height in pixels
    pub h: usize,
    /// Number of pixels between consecutive rows (equals `w`)
    pub stride: usize,
    /// Backing storage in row-major order
    pub data: Vec<Rgb>,
}

impl Frame {
    /// Construct an all-black frame of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self::filled(w, h, [0, 0, 0])
    }

    /// Construct a frame where every pixel equals `px`.
    pub fn filled(w: usize, h: usize, px: Rgb) -> Self {
        Self {
            w,
            h,
            stride: w,
            data: vec![px; w * h],
        }
    }

    /// Build a frame from interleaved `r g b` bytes. Returns `None` when the
    /// buffer length does not match `w * h * 3`.
    pub fn from_raw(w: usize, h: usize, bytes: &[u8]) -> Option<Self> {
        if bytes.len() != w * h * 3 {
            return None;
        }
        let data = bytes
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
            .collect();
        Some(Self {
            w,
            h,
            stride: w,
            data,
        })
    }

    /// Interleaved `r g b` bytes, row-major.
    pub fn to_raw(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.w * self.h * 3);
        for row in self.rows() {
            for px in row {
                out.extend_from_slice(px);
            }
        }
        out
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.stride + x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.data[self.idx(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, px: Rgb) {
        let i = self.idx(x, y);
        self.data[i] = px;
    }

    /// Paint a rectangle `[x0, x0+w) × [y0, y0+h)`, clipped to the frame.
    pub fn fill_rect(&mut self, x0: usize, y0: usize, w: usize, h: usize, px: Rgb) {
        let x1 = (x0 + w).min(self.w);
        let y1 = (y0 + h).min(self.h);
        for y in y0.min(self.h)..y1 {
            let row = self.row_mut(y);
            for v in &mut row[x0.min(x1)..x1] {
                *v = px;
            }
        }
    }

    /// Overwrite one colour channel with `mask * scale`. Other channels are
    /// left untouched. Panics if the shapes differ.
    pub fn write_channel(&mut self, channel: usize, mask: &Mask, scale: u8) {
        assert!(channel < 3, "RGB channel index out of range: {channel}");
        assert!(
            self.same_shape(mask),
            "mask {}x{} does not match frame {}x{}",
            mask.w,
            mask.h,
            self.w,
            self.h
        );
        for y in 0..self.h {
            let src = mask.row(y);
            let dst = self.row_mut(y);
            for (px, &m) in dst.iter_mut().zip(src) {
                px[channel] = m.saturating_mul(scale);
            }
        }
    }
}

impl ImageView for Frame {
    type Pixel = Rgb;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }
    #[inline]
    fn row(&self, y: usize) -> &[Rgb] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[Rgb]> {
        (self.stride == self.w).then_some(&self.data[..self.w * self.h])
    }
}

impl ImageViewMut for Frame {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [Rgb] {
        let start = y * self.stride;
        let end = start + self.w;
        &mut self.data[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_bytes_keep_channel_order() {
        let bytes = [1u8, 2, 3, 4, 5, 6];
        let frame = Frame::from_raw(2, 1, &bytes).expect("length matches");
        assert_eq!(frame.get(0, 0), [1, 2, 3]);
        assert_eq!(frame.get(1, 0), [4, 5, 6]);
        assert_eq!(frame.to_raw(), bytes.to_vec());
        assert!(Frame::from_raw(2, 2, &bytes).is_none());
    }

    #[test]
    fn fill_rect_clips_to_frame() {
        let mut frame = Frame::new(4, 3);
        frame.fill_rect(2, 1, 10, 10, [9, 9, 9]);
        assert_eq!(frame.get(1, 1), [0, 0, 0]);
        assert_eq!(frame.get(3, 2), [9, 9, 9]);
        assert_eq!(frame.data.iter().filter(|p| p[0] == 9).count(), 4);
    }

    #[test]
    fn write_channel_scales_mask() {
        let mut frame = Frame::filled(2, 1, [7, 7, 7]);
        let mut mask = Mask::new(2, 1);
        mask.set(1, 0, 1);
        frame.write_channel(2, &mask, 255);
        assert_eq!(frame.get(0, 0), [7, 7, 0]);
        assert_eq!(frame.get(1, 0), [7, 7, 255]);
    }
}
