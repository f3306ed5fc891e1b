//! Per-column z-score statistics.
//!
//! `z = (x - mean) / std_dev` with population standard deviation. A column
//! with zero spread is scaled by 1 instead (it becomes identically 0), unless
//! strict mode turns it into a data-insufficiency error.
use crate::error::{CrackError, Result};
use crate::features::{FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
use log::warn;
use nalgebra::SVector;
use serde::{Deserialize, Serialize};

const MIN_STD_DEV: f64 = 1e-12;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Standardization {
    pub mean: FeatureVector,
    pub std_dev: FeatureVector,
}

impl Standardization {
    /// Identity transform.
    pub fn identity() -> Self {
        Self {
            mean: FeatureVector::zeros(),
            std_dev: FeatureVector(SVector::repeat(1.0)),
        }
    }

    pub fn fit(samples: &[FeatureVector], strict: bool) -> Result<Self> {
        if samples.is_empty() {
            return Err(CrackError::insufficient(
                "cannot compute standardization over zero samples",
            ));
        }
        let n = samples.len() as f64;
        let mean = samples
            .iter()
            .fold(SVector::<f64, FEATURE_COUNT>::zeros(), |acc, s| acc + s.0)
            / n;
        let var = samples
            .iter()
            .fold(SVector::<f64, FEATURE_COUNT>::zeros(), |acc, s| {
                let d = s.0 - mean;
                acc + d.component_mul(&d)
            })
            / n;
        let std_dev = var.map(f64::sqrt);

        for (col, &sd) in std_dev.iter().enumerate() {
            if sd < MIN_STD_DEV {
                if strict {
                    return Err(CrackError::insufficient(format!(
                        "feature column {col} ({}) has zero variance",
                        FEATURE_NAMES[col]
                    )));
                }
                warn!(
                    "feature column {col} ({}) has zero variance; leaving it unscaled",
                    FEATURE_NAMES[col]
                );
            }
        }

        Ok(Self {
            mean: FeatureVector(mean),
            std_dev: FeatureVector(std_dev),
        })
    }

    /// Divisors actually applied: the std-dev, or 1 for degenerate columns.
    pub fn scale(&self) -> SVector<f64, FEATURE_COUNT> {
        self.std_dev
            .0
            .map(|sd| if sd < MIN_STD_DEV { 1.0 } else { sd })
    }

    pub fn apply(&self, raw: &FeatureVector) -> FeatureVector {
        FeatureVector((raw.0 - self.mean.0).component_div(&self.scale()))
    }

    pub fn invert(&self, standardized: &FeatureVector) -> FeatureVector {
        FeatureVector(standardized.0.component_mul(&self.scale()) + self.mean.0)
    }

    /// Indices of columns with zero spread.
    pub fn degenerate_columns(&self) -> Vec<usize> {
        self.std_dev
            .0
            .iter()
            .enumerate()
            .filter(|(_, &sd)| sd < MIN_STD_DEV)
            .map(|(i, _)| i)
            .collect()
    }
}
