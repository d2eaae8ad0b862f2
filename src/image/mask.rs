//! Owned binary mask, one byte per pixel, values in `{0, 1}`.
use super::traits::{ImageView, ImageViewMut};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    /// Mask width in pixels
    pub w: usize,
    /// Mask height in pixels
    pub h: usize,
    /// Number of bytes between consecutive rows (equals `w`)
    pub stride: usize,
    /// Backing storage in row-major order
    pub data: Vec<u8>,
}

impl Mask {
    /// All-zero mask of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            stride: w,
            data: vec![0; w * h],
        }
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.stride + x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[self.idx(x, y)]
    }

    #[inline]
    pub fn is_set(&self, x: usize, y: usize) -> bool {
        self.get(x, y) != 0
    }

    /// Store `v` at (x, y); any non-zero value is stored as 1.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: u8) {
        let i = self.idx(x, y);
        self.data[i] = u8::from(v != 0);
    }

    /// Number of foreground pixels.
    pub fn count(&self) -> usize {
        self.rows()
            .map(|row| row.iter().filter(|&&v| v != 0).count())
            .sum()
    }

    /// Pointwise `1 - self`.
    pub fn complement(&self) -> Mask {
        let mut out = Mask::new(self.w, self.h);
        for y in 0..self.h {
            let src = self.row(y);
            for (d, &s) in out.row_mut(y).iter_mut().zip(src) {
                *d = u8::from(s == 0);
            }
        }
        out
    }

    /// Foreground pixel coordinates as `(row, col)` in row-major scan order.
    pub fn foreground(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.h).flat_map(move |y| {
            self.row(y)
                .iter()
                .enumerate()
                .filter(|(_, v)| **v != 0)
                .map(move |(x, _)| (y, x))
        })
    }
}

impl ImageView for Mask {
    type Pixel = u8;

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
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[u8]> {
        (self.stride == self.w).then_some(&self.data[..self.w * self.h])
    }
}

impl ImageViewMut for Mask {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let start = y * self.stride;
        let end = start + self.w;
        &mut self.data[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complement_flips_every_pixel() {
        let mut mask = Mask::new(3, 2);
        mask.set(0, 0, 1);
        mask.set(2, 1, 5);
        let inv = mask.complement();
        assert_eq!(mask.count(), 2);
        assert_eq!(inv.count(), 4);
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(mask.get(x, y) ^ inv.get(x, y), 1);
            }
        }
    }

    #[test]
    fn foreground_is_row_major() {
        let mut mask = Mask::new(3, 3);
        mask.set(2, 0, 1);
        mask.set(0, 2, 1);
        mask.set(1, 1, 1);
        let pts: Vec<_> = mask.foreground().collect();
        assert_eq!(pts, vec![(0, 2), (1, 1), (2, 0)]);
    }
}
