//! Accuracy of a persisted model over held-out labelled folders.
use crate::classifier::Classifier;
use crate::dataset::{collect_samples, LabeledFolder, SkippedFile};
use crate::error::{CrackError, Result};
use log::info;
use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccuracyReport {
    pub processed: usize,
    pub correct: usize,
    pub skipped: Vec<SkippedFile>,
}

impl AccuracyReport {
    /// `correct / processed` as a percentage. `processed` is never zero for a
    /// report returned by [`validate`].
    pub fn percent(&self) -> f64 {
        100.0 * self.correct as f64 / self.processed as f64
    }
}

/// Run every image under `folders` through the classifier's pipeline and
/// compare predictions with the folder labels.
pub fn validate(classifier: &Classifier, folders: &[LabeledFolder]) -> Result<AccuracyReport> {
    let (samples, skipped) = collect_samples(classifier.pipeline(), folders)?;
    if samples.is_empty() {
        return Err(CrackError::insufficient(format!(
            "no readable images in {} validation folders",
            folders.len()
        )));
    }
    let mut correct = 0;
    for sample in &samples {
        if classifier.classify_features(&sample.features)?.class == sample.class {
            correct += 1;
        }
    }
    let report = AccuracyReport {
        processed: samples.len(),
        correct,
        skipped,
    };
    info!(
        "validation: {}/{} correct ({:.2}%), {} skipped",
        report.correct,
        report.processed,
        report.percent(),
        report.skipped.len()
    );
    Ok(report)
}
