use super::grid::HyperparameterCandidate;
use crate::dataset::{CrackClass, Dataset};
use crate::error::{CrackError, Result};
use crate::features::FeatureVector;
use crate::svm::{SolverParams, SvmModel};
use log::debug;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// What happens to the `N mod k` samples left over by equal-size folds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoldRemainder {
    /// The first `N mod k` folds take one extra sample each.
    #[default]
    Distribute,
    /// Folds have `floor(N / k)` samples; the tail is never held out.
    Truncate,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrossValidationParams {
    pub folds: usize,
    pub remainder: FoldRemainder,
    pub solver: SolverParams,
}

impl Default for CrossValidationParams {
    fn default() -> Self {
        Self {
            folds: 10,
            remainder: FoldRemainder::default(),
            solver: SolverParams::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossValidation {
    pub fold_accuracies: Vec<f64>,
    pub mean_accuracy: f64,
}

/// Contiguous held-out index ranges for `k` folds over `n` samples.
pub fn fold_ranges(n: usize, k: usize, remainder: FoldRemainder) -> Result<Vec<Range<usize>>> {
    if k < 2 {
        return Err(CrackError::config(format!(
            "cross-validation needs at least 2 folds, got {k}"
        )));
    }
    if n == 0 {
        return Err(CrackError::insufficient("cannot cross-validate an empty dataset"));
    }
    if k > n {
        return Err(CrackError::insufficient(format!(
            "{k} folds requested for only {n} samples"
        )));
    }
    let base = n / k;
    let extra = match remainder {
        FoldRemainder::Distribute => n % k,
        FoldRemainder::Truncate => 0,
    };
    let mut start = 0;
    Ok((0..k)
        .map(|fold| {
            let len = base + usize::from(fold < extra);
            let range = start..start + len;
            start += len;
            range
        })
        .collect())
}

/// Mean held-out accuracy (fraction in `[0, 1]`) of `candidate` over k folds.
///
/// Folds are contiguous blocks in dataset order; shuffle beforehand.
pub fn cross_validate(
    dataset: &Dataset,
    candidate: &HyperparameterCandidate,
    params: &CrossValidationParams,
) -> Result<CrossValidation> {
    let samples = dataset.samples();
    let folds = fold_ranges(samples.len(), params.folds, params.remainder)?;

    let mut fold_accuracies = Vec::with_capacity(folds.len());
    for (fold, held_out) in folds.iter().enumerate() {
        let (train_x, train_y): (Vec<FeatureVector>, Vec<CrackClass>) = samples
            .iter()
            .enumerate()
            .filter(|(idx, _)| !held_out.contains(idx))
            .map(|(_, s)| (s.features, s.class))
            .unzip();
        if train_x.is_empty() {
            return Err(CrackError::insufficient(format!(
                "fold {fold} leaves no training data"
            )));
        }
        let model = SvmModel::train(
            &train_x,
            &train_y,
            candidate.kernel,
            candidate.cost,
            &params.solver,
        )?;
        let test = &samples[held_out.clone()];
        let correct = test
            .iter()
            .filter(|s| model.predict_class(&s.features) == s.class)
            .count();
        let accuracy = correct as f64 / test.len() as f64;
        debug!(
            "fold {}/{}: {correct}/{} correct",
            fold + 1,
            folds.len(),
            test.len()
        );
        fold_accuracies.push(accuracy);
    }

    let mean_accuracy = fold_accuracies.iter().sum::<f64>() / fold_accuracies.len() as f64;
    Ok(CrossValidation {
        fold_accuracies,
        mean_accuracy,
    })
}
