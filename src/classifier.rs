//! Single-sample prediction with a persisted model.
//!
//! A [`Classifier`] owns the loaded [`PersistedModel`] and rebuilds the
//! pipeline it was trained with, so raw images go through exactly the same
//! preprocessing, mask extraction and standardisation as the training data.
use crate::dataset::CrackClass;
use crate::error::{CrackError, Result};
use crate::features::{FeatureVector, FEATURE_COUNT};
use crate::pipeline::CrackPipeline;
use crate::training::PersistedModel;
use image::DynamicImage;
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    /// 0 for shrinkage, 1 for thermal.
    pub raw_label: i32,
    pub class: CrackClass,
    /// Signed SVM decision value; positive leans thermal.
    pub decision: f64,
}

impl Classification {
    pub fn name(&self) -> &'static str {
        self.class.name()
    }
}

#[derive(Clone, Debug)]
pub struct Classifier {
    model: PersistedModel,
    pipeline: CrackPipeline,
}

impl Classifier {
    pub fn new(model: PersistedModel) -> Self {
        let pipeline = CrackPipeline::new(model.pipeline);
        Self { model, pipeline }
    }

    /// Load a model written by the trainer. Any failure is a `ModelLoad` error.
    pub fn load(path: &Path) -> Result<Self> {
        let model = PersistedModel::load(path)?;
        debug!(
            "loaded {} ({} support vectors)",
            model.model_id,
            model.svm.support_vectors.len()
        );
        Ok(Self::new(model))
    }

    pub fn model(&self) -> &PersistedModel {
        &self.model
    }

    pub fn pipeline(&self) -> &CrackPipeline {
        &self.pipeline
    }

    /// Classify a feature vector that is already standardised.
    pub fn classify(&self, standardized: &FeatureVector) -> Result<Classification> {
        if !standardized.is_finite() {
            return Err(CrackError::config("feature vector contains non-finite values"));
        }
        let decision = self.model.svm.decision(standardized);
        let raw_label = if decision > 0.0 { 1 } else { 0 };
        Ok(Classification {
            raw_label,
            class: CrackClass::from_raw(raw_label),
            decision,
        })
    }

    /// Classify a standardised vector given as a slice of exactly five values.
    pub fn classify_slice(&self, standardized: &[f64]) -> Result<Classification> {
        if standardized.len() != FEATURE_COUNT {
            return Err(CrackError::DimensionMismatch {
                expected: FEATURE_COUNT,
                actual: standardized.len(),
            });
        }
        self.classify(&FeatureVector::from_slice(standardized)?)
    }

    /// Standardise raw pipeline features with the model's statistics, then classify.
    pub fn classify_features(&self, raw: &FeatureVector) -> Result<Classification> {
        self.classify(&self.model.standardization.apply(raw))
    }

    pub fn classify_image(&self, image: &DynamicImage) -> Result<Classification> {
        let raw = self.pipeline.features(image)?;
        self.classify_features(&raw)
    }

    pub fn classify_path(&self, path: &Path) -> Result<Classification> {
        let raw = self.pipeline.features_from_path(path)?;
        self.classify_features(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Standardization;
    use crate::pipeline::PipelineParams;
    use crate::svm::{Kernel, SolverParams, SvmModel};
    use crate::training::HyperparameterCandidate;

    fn classifier() -> Classifier {
        let xs = [
            FeatureVector::new([0.0, 0.0, 0.0, -1.0, 0.0]),
            FeatureVector::new([0.0, 0.0, 0.0, 1.0, 0.0]),
        ];
        let ys = [CrackClass::Shrinkage, CrackClass::Thermal];
        let cand = HyperparameterCandidate::new(Kernel::Rbf { gamma: 0.5 }, 1.0);
        let svm = SvmModel::train(&xs, &ys, cand.kernel, cand.cost, &SolverParams::default())
            .unwrap();
        let standardization = Standardization {
            mean: FeatureVector::new([0.0, 0.0, 0.0, 2.0, 0.0]),
            std_dev: FeatureVector::new([1.0, 1.0, 1.0, 2.0, 1.0]),
        };
        Classifier::new(PersistedModel::new(
            &cand,
            svm,
            standardization,
            1.0,
            PipelineParams::default(),
        ))
    }

    #[test]
    fn maps_labels_to_names() {
        let c = classifier();
        let thermal = c
            .classify(&FeatureVector::new([0.0, 0.0, 0.0, 1.0, 0.0]))
            .unwrap();
        assert_eq!(thermal.raw_label, 1);
        assert_eq!(thermal.name(), "thermal");
        let shrinkage = c.classify_slice(&[0.0, 0.0, 0.0, -1.0, 0.0]).unwrap();
        assert_eq!(shrinkage.raw_label, 0);
        assert_eq!(shrinkage.name(), "shrinkage");
    }

    #[test]
    fn raw_features_are_standardised_first() {
        let c = classifier();
        // line count 0 → z = -1 → shrinkage; 4 → z = 1 → thermal
        let zero = c.classify_features(&FeatureVector::zeros()).unwrap();
        assert_eq!(zero.class, CrackClass::Shrinkage);
        let four = c
            .classify_features(&FeatureVector::new([0.0, 0.0, 0.0, 4.0, 0.0]))
            .unwrap();
        assert_eq!(four.class, CrackClass::Thermal);
    }

    #[test]
    fn empty_vector_is_an_error() {
        let c = classifier();
        assert!(matches!(
            c.classify_slice(&[]),
            Err(CrackError::DimensionMismatch { expected: 5, actual: 0 })
        ));
    }

    #[test]
    fn missing_model_fails_to_load() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Classifier::load(&dir.path().join("absent.json")),
            Err(CrackError::ModelLoad { .. })
        ));
    }
}
