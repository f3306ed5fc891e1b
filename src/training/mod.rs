//! Hyperparameter selection for the crack SVM.
//!
//! [`GridSearch`] walks a [`ParamGrid`] in a fixed order, scores every
//! candidate by k-fold cross-validation and keeps the best through a
//! compare-and-set [`BestTracker`]. [`select_best_model`] then refits the
//! winner on the whole dataset and writes a [`PersistedModel`] bundling the
//! SVM with its standardisation statistics.
//!
//! With the `parallel` feature candidates are scored on the rayon pool; the
//! selected model is the same as in a sequential run.

pub mod cross_validation;
pub mod grid;
pub mod persist;
pub mod search;

pub use cross_validation::{
    cross_validate, fold_ranges, CrossValidation, CrossValidationParams, FoldRemainder,
};
pub use grid::{HyperparameterCandidate, ParamGrid};
pub use persist::PersistedModel;
pub use search::{
    select_best_model, train_full, BestCandidate, BestTracker, CancelToken, GridSearch,
    SelectedModel,
};
