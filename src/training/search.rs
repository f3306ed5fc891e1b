use super::cross_validation::{cross_validate, CrossValidationParams};
use super::grid::{HyperparameterCandidate, ParamGrid};
use super::persist::PersistedModel;
use crate::dataset::{CrackClass, Dataset, LabeledSample};
use crate::diagnostics::{CandidateReport, GridSearchReport};
use crate::error::{CrackError, Result};
use crate::features::FeatureVector;
use crate::pipeline::PipelineParams;
use crate::svm::SvmModel;
use log::{debug, info};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Cooperative stop flag checked between grid candidates.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BestCandidate {
    pub index: usize,
    pub candidate: HyperparameterCandidate,
    pub accuracy: f64,
}

/// Best-so-far candidate shared between workers.
///
/// An offer wins when its accuracy is strictly greater, or equal with an
/// earlier grid index. Any evaluation order therefore settles on the
/// candidate a sequential scan with a strict `>` would pick.
#[derive(Debug, Default)]
pub struct BestTracker {
    best: Mutex<Option<BestCandidate>>,
}

impl BestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `offer` became the new best.
    pub fn offer(&self, offer: BestCandidate) -> bool {
        let mut best = self.best.lock();
        let replace = match *best {
            None => true,
            Some(cur) => {
                offer.accuracy > cur.accuracy
                    || (offer.accuracy == cur.accuracy && offer.index < cur.index)
            }
        };
        if replace {
            *best = Some(offer);
        }
        replace
    }

    pub fn best(&self) -> Option<BestCandidate> {
        *self.best.lock()
    }
}

/// Cross-validated grid search over SVM hyperparameters.
#[derive(Clone, Debug, Default)]
pub struct GridSearch {
    pub grid: ParamGrid,
    pub cv: CrossValidationParams,
    pub cancel: CancelToken,
}

/// Result of [`select_best_model`].
#[derive(Clone, Debug)]
pub struct SelectedModel {
    pub model: PersistedModel,
    pub path: PathBuf,
    pub report: GridSearchReport,
}

impl GridSearch {
    pub fn new(grid: ParamGrid, cv: CrossValidationParams) -> Self {
        Self {
            grid,
            cv,
            cancel: CancelToken::new(),
        }
    }

    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    fn evaluate(
        &self,
        dataset: &Dataset,
        index: usize,
        candidate: &HyperparameterCandidate,
        tracker: &BestTracker,
        total: usize,
    ) -> Result<CandidateReport> {
        if self.cancel.is_cancelled() {
            return Err(CrackError::Cancelled);
        }
        let start = Instant::now();
        let cv = cross_validate(dataset, candidate, &self.cv)?;
        let model_id = candidate.model_id();
        let improved = tracker.offer(BestCandidate {
            index,
            candidate: *candidate,
            accuracy: cv.mean_accuracy,
        });
        info!(
            "[{}/{}] {} accuracy {:.2}%{}",
            index + 1,
            total,
            model_id,
            cv.mean_accuracy * 100.0,
            if improved { " (best so far)" } else { "" }
        );
        Ok(CandidateReport {
            index,
            model_id,
            kernel: candidate.kernel,
            cost: candidate.cost,
            fold_accuracies: cv.fold_accuracies,
            mean_accuracy: cv.mean_accuracy,
            elapsed_ms: start.elapsed().as_secs_f64() * 1000.0,
        })
    }

    /// Evaluate every candidate and report the winner.
    pub fn run(&self, dataset: &Dataset) -> Result<(BestCandidate, GridSearchReport)> {
        self.grid.validate()?;
        if dataset.is_empty() {
            return Err(CrackError::insufficient("grid search on an empty dataset"));
        }
        // Surface fold-count problems once, before any training.
        super::cross_validation::fold_ranges(dataset.len(), self.cv.folds, self.cv.remainder)?;

        let start = Instant::now();
        let candidates = self.grid.candidates();
        let total = candidates.len();
        let tracker = BestTracker::new();
        info!(
            "grid search: {total} candidates, {} samples, {} folds",
            dataset.len(),
            self.cv.folds
        );

        #[cfg(feature = "parallel")]
        let reports: Vec<CandidateReport> = candidates
            .par_iter()
            .enumerate()
            .map(|(index, cand)| self.evaluate(dataset, index, cand, &tracker, total))
            .collect::<Result<Vec<_>>>()?;
        #[cfg(not(feature = "parallel"))]
        let reports: Vec<CandidateReport> = candidates
            .iter()
            .enumerate()
            .map(|(index, cand)| self.evaluate(dataset, index, cand, &tracker, total))
            .collect::<Result<Vec<_>>>()?;

        let best = tracker
            .best()
            .ok_or_else(|| CrackError::config("grid produced no candidates"))?;
        let (shrinkage, thermal) = dataset.class_counts();
        let report = GridSearchReport {
            samples: dataset.len(),
            shrinkage_samples: shrinkage,
            thermal_samples: thermal,
            folds: self.cv.folds,
            fold_remainder: self.cv.remainder,
            candidates: reports,
            best_index: best.index,
            best_model_id: best.candidate.model_id(),
            best_accuracy: best.accuracy,
            total_ms: start.elapsed().as_secs_f64() * 1000.0,
        };
        info!(
            "best candidate {} with {:.2}% accuracy",
            report.best_model_id,
            best.accuracy * 100.0
        );
        Ok((best, report))
    }
}

/// Train `candidate` on the whole dataset.
pub fn train_full(
    dataset: &Dataset,
    candidate: &HyperparameterCandidate,
    search: &GridSearch,
) -> Result<SvmModel> {
    let (xs, ys): (Vec<FeatureVector>, Vec<CrackClass>) = dataset
        .samples()
        .iter()
        .map(|s: &LabeledSample| (s.features, s.class))
        .unzip();
    debug!("retraining {} on {} samples", candidate.model_id(), xs.len());
    SvmModel::train(&xs, &ys, candidate.kernel, candidate.cost, &search.cv.solver)
}

/// Grid search, retrain the winner on the full dataset and persist it
/// under `output_dir`.
pub fn select_best_model(
    dataset: &Dataset,
    search: &GridSearch,
    pipeline: PipelineParams,
    output_dir: &Path,
) -> Result<SelectedModel> {
    let (best, report) = search.run(dataset)?;
    let svm = train_full(dataset, &best.candidate, search)?;
    let model = PersistedModel::new(
        &best.candidate,
        svm,
        *dataset.standardization(),
        best.accuracy,
        pipeline,
    );
    let path = model.save(output_dir)?;
    Ok(SelectedModel {
        model,
        path,
        report,
    })
}
