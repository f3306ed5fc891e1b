use crate::svm::Kernel;
use crate::training::{FoldRemainder, HyperparameterCandidate};
use serde::{Deserialize, Serialize};

/// Cross-validation outcome of one grid candidate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateReport {
    /// Position in grid enumeration order.
    pub index: usize,
    pub model_id: String,
    pub kernel: Kernel,
    pub cost: f64,
    pub fold_accuracies: Vec<f64>,
    pub mean_accuracy: f64,
    pub elapsed_ms: f64,
}

impl CandidateReport {
    pub fn candidate(&self) -> HyperparameterCandidate {
        HyperparameterCandidate::new(self.kernel, self.cost)
    }
}

/// Full record of one grid search, winner included.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSearchReport {
    pub samples: usize,
    pub shrinkage_samples: usize,
    pub thermal_samples: usize,
    pub folds: usize,
    pub fold_remainder: FoldRemainder,
    pub candidates: Vec<CandidateReport>,
    pub best_index: usize,
    pub best_model_id: String,
    pub best_accuracy: f64,
    pub total_ms: f64,
}

impl GridSearchReport {
    pub fn best(&self) -> Option<&CandidateReport> {
        self.candidates.iter().find(|c| c.index == self.best_index)
    }

    /// One line per candidate, `model_id  accuracy%`.
    pub fn summary_lines(&self) -> Vec<String> {
        self.candidates
            .iter()
            .map(|c| format!("{}  {:.2}%", c.model_id, c.mean_accuracy * 100.0))
            .collect()
    }
}
