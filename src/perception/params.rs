//! Parameter types configuring the perception pipeline.
//!
//! Defaults reproduce the 320×160 rover camera rig: the stock calibration
//! square, an RGB > 160 terrain threshold, a red/low-blue sample gate and a
//! scale of 10 rectified pixels per world cell.

use crate::calibration::CalibrationGeometry;
use crate::classify::ClassifierParams;
use crate::error::{PerceptionError, Result};
use crate::world::AccumulationPolicy;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerceptionParams {
    /// Source/destination points of the rectifying homography.
    pub calibration: CalibrationGeometry,
    /// Colour thresholds for terrain and samples.
    pub classifier: ClassifierParams,
    /// Rectified pixels per world-grid cell.
    pub scale: f32,
    /// Per-class world map update rule.
    pub policy: AccumulationPolicy,
    /// Maximum distance (world cells) between a flagged sample cell and a
    /// known sample location for `near_sample` to be raised.
    pub sample_match_dist: f32,
}

impl Default for PerceptionParams {
    fn default() -> Self {
        Self {
            calibration: CalibrationGeometry::default(),
            classifier: ClassifierParams::default(),
            scale: 10.0,
            policy: AccumulationPolicy::default(),
            sample_match_dist: 0.1,
        }
    }
}

impl PerceptionParams {
    pub fn validate(&self) -> Result<()> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(PerceptionError::InvalidParams(format!(
                "scale must be a positive finite number, got {}",
                self.scale
            )));
        }
        if !self.sample_match_dist.is_finite() || self.sample_match_dist < 0.0 {
            return Err(PerceptionError::InvalidParams(format!(
                "sample_match_dist must be a non-negative finite number, got {}",
                self.sample_match_dist
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(PerceptionParams::default().validate().is_ok());
    }

    #[test]
    fn non_positive_scale_is_rejected() {
        for scale in [0.0, -10.0, f32::NAN, f32::INFINITY] {
            let params = PerceptionParams {
                scale,
                ..Default::default()
            };
            assert!(matches!(
                params.validate(),
                Err(PerceptionError::InvalidParams(_))
            ));
        }
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let params: PerceptionParams =
            serde_json::from_str(r#"{ "scale": 5.0, "policy": { "obstacle_weight": 3 } }"#)
                .expect("valid JSON");
        assert_eq!(params.scale, 5.0);
        assert_eq!(params.calibration, CalibrationGeometry::default());
        assert_eq!(params.policy.obstacle_weight, 3);
        assert_eq!(params.policy.navigable_weight, 1);
    }
}
