//! Labelled feature datasets built from per-class image folders.
//!
//! - [`CrackClass`]: the two known classes and their integer labels.
//! - [`LabeledFolder`]: one folder of images sharing a label.
//! - [`loader`]: walks folders (non-recursive) through the shared pipeline,
//!   skipping files that do not decode.
//! - [`standardize`]: per-column z-score statistics that travel with a model.
//!
//! A [`Dataset`] stores samples already standardised, together with the
//! statistics used, so the same transform can be replayed at inference time.

pub mod loader;
pub mod standardize;

pub use loader::{collect_samples, validate_folders, DatasetLoader, SkippedFile};
pub use standardize::Standardization;

use crate::error::{CrackError, Result};
use crate::features::FeatureVector;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrackClass {
    Shrinkage,
    Thermal,
}

impl CrackClass {
    /// Raw label 0 is shrinkage; any other value is thermal.
    pub fn from_raw(raw: i32) -> Self {
        if raw == 0 {
            CrackClass::Shrinkage
        } else {
            CrackClass::Thermal
        }
    }

    /// Strict conversion for configured labels.
    pub fn from_label(label: u8) -> Result<Self> {
        match label {
            0 => Ok(CrackClass::Shrinkage),
            1 => Ok(CrackClass::Thermal),
            other => Err(CrackError::config(format!(
                "label {other} is not one of 0 (shrinkage) or 1 (thermal)"
            ))),
        }
    }

    pub fn label(self) -> i32 {
        match self {
            CrackClass::Shrinkage => 0,
            CrackClass::Thermal => 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CrackClass::Shrinkage => "shrinkage",
            CrackClass::Thermal => "thermal",
        }
    }
}

impl fmt::Display for CrackClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Folder of images that all carry `label`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledFolder {
    pub folder: PathBuf,
    pub label: u8,
}

impl LabeledFolder {
    pub fn new(folder: impl Into<PathBuf>, class: CrackClass) -> Self {
        Self {
            folder: folder.into(),
            label: class.label() as u8,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LabeledSample {
    pub features: FeatureVector,
    pub class: CrackClass,
    /// File the features came from; empty for synthetic samples.
    pub source: PathBuf,
}

impl LabeledSample {
    pub fn new(features: FeatureVector, class: CrackClass) -> Self {
        Self {
            features,
            class,
            source: PathBuf::new(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Dataset {
    samples: Vec<LabeledSample>,
    standardization: Standardization,
}

impl Dataset {
    /// Fit standardisation on `raw` and store the standardised samples.
    pub fn from_raw(raw: Vec<LabeledSample>, strict: bool) -> Result<Self> {
        if raw.is_empty() {
            return Err(CrackError::insufficient("dataset has no samples"));
        }
        let features: Vec<FeatureVector> = raw.iter().map(|s| s.features).collect();
        let standardization = Standardization::fit(&features, strict)?;
        let samples = raw
            .into_iter()
            .map(|s| LabeledSample {
                features: standardization.apply(&s.features),
                ..s
            })
            .collect();
        Ok(Self {
            samples,
            standardization,
        })
    }

    /// Wrap samples that are already standardised with `standardization`.
    pub fn from_standardized(
        samples: Vec<LabeledSample>,
        standardization: Standardization,
    ) -> Self {
        Self {
            samples,
            standardization,
        }
    }

    pub fn samples(&self) -> &[LabeledSample] {
        &self.samples
    }

    pub fn standardization(&self) -> &Standardization {
        &self.standardization
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// `(shrinkage, thermal)` sample counts.
    pub fn class_counts(&self) -> (usize, usize) {
        let thermal = self
            .samples
            .iter()
            .filter(|s| s.class == CrackClass::Thermal)
            .count();
        (self.samples.len() - thermal, thermal)
    }

    /// Deterministic in-place shuffle.
    pub fn shuffle(&mut self, seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        self.samples.shuffle(&mut rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(v: f64, class: CrackClass) -> LabeledSample {
        LabeledSample::new(FeatureVector::new([v, v * 2.0, v + 1.0, v, 0.1 * v]), class)
    }

    #[test]
    fn class_mapping() {
        assert_eq!(CrackClass::from_raw(0), CrackClass::Shrinkage);
        assert_eq!(CrackClass::from_raw(1), CrackClass::Thermal);
        assert_eq!(CrackClass::from_raw(-3), CrackClass::Thermal);
        assert_eq!(CrackClass::Thermal.name(), "thermal");
        assert!(CrackClass::from_label(2).is_err());
    }

    #[test]
    fn empty_dataset_is_insufficient() {
        let err = Dataset::from_raw(Vec::new(), false).unwrap_err();
        assert!(err.is_insufficient_data());
    }

    #[test]
    fn samples_are_standardised_and_invertible() {
        let raw = vec![
            sample(1.0, CrackClass::Shrinkage),
            sample(2.0, CrackClass::Thermal),
            sample(6.0, CrackClass::Thermal),
        ];
        let ds = Dataset::from_raw(raw.clone(), false).unwrap();
        assert_eq!(ds.class_counts(), (1, 2));
        for col in 0..5 {
            let mean: f64 = ds.samples().iter().map(|s| s.features.0[col]).sum::<f64>() / 3.0;
            assert!(mean.abs() < 1e-12);
        }
        for (std, orig) in ds.samples().iter().zip(&raw) {
            let back = ds.standardization().invert(&std.features);
            assert!((back.0 - orig.features.0).norm() < 1e-9);
        }
    }

    #[test]
    fn shuffle_is_deterministic() {
        let raw: Vec<_> = (0..20)
            .map(|i| sample(i as f64, CrackClass::from_raw(i % 2)))
            .collect();
        let mut a = Dataset::from_raw(raw.clone(), false).unwrap();
        let mut b = Dataset::from_raw(raw, false).unwrap();
        a.shuffle(7);
        b.shuffle(7);
        assert_eq!(a.samples(), b.samples());
    }
}
