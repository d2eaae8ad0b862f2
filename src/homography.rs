//! Four-point homography estimation and point mapping.
//!
//! [`perspective_transform`] solves the 8×8 direct linear system obtained by
//! fixing `h33 = 1`, which is exact for four correspondences. The system is
//! solved in `f64` and the result stored as `Matrix3<f32>` like the rest of
//! the crate.
use crate::error::{PerceptionError, Result};
use nalgebra::{Matrix3, SMatrix, SVector, Vector3};

const EPS: f32 = 1e-9;
/// Minimum doubled triangle area (px²) for three calibration points to count
/// as non-collinear.
const MIN_TRIANGLE_AREA: f64 = 1e-6;

/// Compute the homography that maps each `src[i]` onto `dst[i]`.
///
/// Exactly four correspondences are required and no three points of either
/// quadrilateral may be collinear.
pub fn perspective_transform(src: &[[f32; 2]], dst: &[[f32; 2]]) -> Result<Matrix3<f32>> {
    if src.len() != 4 || dst.len() != 4 {
        return Err(PerceptionError::DegenerateCalibration(format!(
            "expected 4 source and 4 destination points, got {} and {}",
            src.len(),
            dst.len()
        )));
    }
    check_quad(src, "source")?;
    check_quad(dst, "destination")?;

    let mut a = SMatrix::<f64, 8, 8>::zeros();
    let mut b = SVector::<f64, 8>::zeros();
    for i in 0..4 {
        let (x, y) = (src[i][0] as f64, src[i][1] as f64);
        let (u, v) = (dst[i][0] as f64, dst[i][1] as f64);
        a[(i, 0)] = x;
        a[(i, 1)] = y;
        a[(i, 2)] = 1.0;
        a[(i, 6)] = -x * u;
        a[(i, 7)] = -y * u;
        b[i] = u;

        a[(i + 4, 3)] = x;
        a[(i + 4, 4)] = y;
        a[(i + 4, 5)] = 1.0;
        a[(i + 4, 6)] = -x * v;
        a[(i + 4, 7)] = -y * v;
        b[i + 4] = v;
    }

    let h = a.lu().solve(&b).ok_or_else(|| {
        PerceptionError::DegenerateCalibration("singular perspective system".to_string())
    })?;
    if h.iter().any(|v| !v.is_finite()) {
        return Err(PerceptionError::DegenerateCalibration(
            "non-finite homography coefficients".to_string(),
        ));
    }

    Ok(Matrix3::new(
        h[0] as f32,
        h[1] as f32,
        h[2] as f32,
        h[3] as f32,
        h[4] as f32,
        h[5] as f32,
        h[6] as f32,
        h[7] as f32,
        1.0,
    ))
}

fn check_quad(pts: &[[f32; 2]], label: &str) -> Result<()> {
    if pts.iter().flatten().any(|v| !v.is_finite()) {
        return Err(PerceptionError::DegenerateCalibration(format!(
            "{label} points contain non-finite coordinates"
        )));
    }
    // Every triple out of four points.
    const TRIPLES: [[usize; 3]; 4] = [[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]];
    for [i, j, k] in TRIPLES {
        let (a, b, c) = (pts[i], pts[j], pts[k]);
        let area = (b[0] as f64 - a[0] as f64) * (c[1] as f64 - a[1] as f64)
            - (b[1] as f64 - a[1] as f64) * (c[0] as f64 - a[0] as f64);
        if area.abs() <= MIN_TRIANGLE_AREA {
            return Err(PerceptionError::DegenerateCalibration(format!(
                "{label} points {i}, {j}, {k} are collinear"
            )));
        }
    }
    Ok(())
}

/// Map a single point through `h`. Returns `None` when the point lands on
/// the line at infinity or the result is not finite.
#[inline]
pub fn apply_homography(h: &Matrix3<f32>, p: [f32; 2]) -> Option<[f32; 2]> {
    let v = h * Vector3::new(p[0], p[1], 1.0);
    let w = v[2];
    if !w.is_finite() || w.abs() <= EPS || !v[0].is_finite() || !v[1].is_finite() {
        return None;
    }
    Some([v[0] / w, v[1] / w])
}

/// Map every point through `h`; fails as a whole if any point does.
pub fn apply_homography_points(h: &Matrix3<f32>, pts: &[[f32; 2]]) -> Option<Vec<[f32; 2]>> {
    pts.iter().map(|&p| apply_homography(h, p)).collect()
}
