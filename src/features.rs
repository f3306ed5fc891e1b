//! Geometric summary of the line structure in a crack mask.
//!
//! The order of the five components is part of the persisted model contract:
//! standardisation statistics and the trained SVM are both indexed by it.
//!
//! | index | name             | definition                                      |
//! |-------|------------------|-------------------------------------------------|
//! | 0     | `mean_angle`     | mean of `|atan2(dy, dx)|` in degrees            |
//! | 1     | `angle_std_dev`  | population std-dev of the signed angles         |
//! | 2     | `mean_length`    | mean Euclidean segment length                   |
//! | 3     | `line_count`     | number of detected segments                     |
//! | 4     | `mask_density`   | on-pixels / total pixels                        |
//!
//! With no segments the angle and length statistics are 0, never NaN.
use crate::error::{CrackError, Result};
use crate::mask::Mask;
use crate::segments::{probabilistic_hough, HoughParams, Segment};
use nalgebra::SVector;
use serde::{Deserialize, Serialize};

pub const FEATURE_COUNT: usize = 5;

pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "mean_angle",
    "angle_std_dev",
    "mean_length",
    "line_count",
    "mask_density",
];

/// Fixed-length, always-finite feature vector.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector(pub SVector<f64, FEATURE_COUNT>);

impl FeatureVector {
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self(SVector::from(values))
    }

    pub fn zeros() -> Self {
        Self(SVector::zeros())
    }

    /// Build from a slice; anything but exactly five values is rejected.
    pub fn from_slice(values: &[f64]) -> Result<Self> {
        if values.len() != FEATURE_COUNT {
            return Err(CrackError::DimensionMismatch {
                expected: FEATURE_COUNT,
                actual: values.len(),
            });
        }
        Ok(Self(SVector::from_column_slice(values)))
    }

    /// Summarise a set of segments found in a mask of the given density.
    pub fn from_segments(segments: &[Segment], mask_density: f64) -> Self {
        let n = segments.len();
        if n == 0 {
            return Self::new([0.0, 0.0, 0.0, 0.0, mask_density]);
        }
        let nf = n as f64;
        let angles: Vec<f64> = segments.iter().map(Segment::angle_deg).collect();
        let mean_abs_angle = angles.iter().map(|a| a.abs()).sum::<f64>() / nf;
        let mean_signed = angles.iter().sum::<f64>() / nf;
        let variance = angles
            .iter()
            .map(|a| (a - mean_signed) * (a - mean_signed))
            .sum::<f64>()
            / nf;
        let mean_length = segments.iter().map(Segment::length).sum::<f64>() / nf;
        Self::new([
            mean_abs_angle,
            variance.sqrt(),
            mean_length,
            nf,
            mask_density,
        ])
    }

    pub fn as_slice(&self) -> &[f64] {
        self.0.as_slice()
    }

    pub fn mean_angle(&self) -> f64 {
        self.0[0]
    }
    pub fn angle_std_dev(&self) -> f64 {
        self.0[1]
    }
    pub fn mean_length(&self) -> f64 {
        self.0[2]
    }
    pub fn line_count(&self) -> f64 {
        self.0[3]
    }
    pub fn mask_density(&self) -> f64 {
        self.0[4]
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }

    /// `(name, value)` pairs in feature order.
    pub fn named(&self) -> Vec<(&'static str, f64)> {
        FEATURE_NAMES.iter().copied().zip(self.0.iter().copied()).collect()
    }
}

#[derive(Clone, Debug, Default)]
pub struct FeatureExtractor {
    hough: HoughParams,
}

impl FeatureExtractor {
    pub fn new(hough: HoughParams) -> Self {
        Self { hough }
    }

    pub fn params(&self) -> &HoughParams {
        &self.hough
    }

    pub fn extract(&self, mask: &Mask) -> FeatureVector {
        self.extract_with_segments(mask).0
    }

    /// Features plus the segments they were computed from.
    pub fn extract_with_segments(&self, mask: &Mask) -> (FeatureVector, Vec<Segment>) {
        let segments = probabilistic_hough(mask, &self.hough);
        let features = FeatureVector::from_segments(&segments, mask.density());
        (features, segments)
    }
}

/// Extract features with the default (fixed) line-detection parameters.
pub fn extract_features(mask: &Mask) -> FeatureVector {
    FeatureExtractor::default().extract(mask)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_mask_gives_all_zero_features() {
        let f = extract_features(&Mask::empty(640, 640));
        assert_eq!(f, FeatureVector::zeros());
    }

    #[test]
    fn statistics_over_segments() {
        let segs = [
            Segment::new([0, 0], [10, 0]),   // 0°, len 10
            Segment::new([0, 0], [0, 20]),   // 90°, len 20
            Segment::new([0, 0], [0, -30]),  // -90°, len 30
        ];
        let f = FeatureVector::from_segments(&segs, 0.25);
        assert!((f.mean_angle() - 60.0).abs() < 1e-9);
        // signed angles 0, 90, -90 → mean 0, population variance 5400
        assert!((f.angle_std_dev() - 5400f64.sqrt()).abs() < 1e-9);
        assert!((f.mean_length() - 20.0).abs() < 1e-9);
        assert_eq!(f.line_count(), 3.0);
        assert_eq!(f.mask_density(), 0.25);
        assert!(f.is_finite());
    }

    #[test]
    fn line_mask_features() {
        let mut m = Mask::empty(200, 200);
        for x in 20..120 {
            m.set(x, 100, true);
        }
        let f = extract_features(&m);
        assert_eq!(f.line_count(), 1.0);
        assert_eq!(f.mean_angle(), 0.0);
        assert_eq!(f.angle_std_dev(), 0.0);
        assert!((f.mean_length() - 99.0).abs() <= 1.0);
        assert!((f.mask_density() - 100.0 / 40_000.0).abs() < 1e-12);
    }

    #[test]
    fn wrong_length_is_rejected() {
        assert!(matches!(
            FeatureVector::from_slice(&[1.0, 2.0]),
            Err(CrackError::DimensionMismatch { expected: 5, actual: 2 })
        ));
        assert!(FeatureVector::from_slice(&[]).is_err());
        assert!(FeatureVector::from_slice(&[0.0; 5]).is_ok());
    }
}
