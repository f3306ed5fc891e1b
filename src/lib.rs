#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod classifier;
pub mod config;
pub mod dataset;
pub mod diagnostics;
pub mod error;
pub mod features;
pub mod image;
pub mod pipeline;
pub mod training;
pub mod validation;

// Image-stage building blocks; public for tools and tests.
pub mod edges;
pub mod mask;
pub mod preprocess;
pub mod segments;
pub mod svm;

// --- High-level re-exports -------------------------------------------------

pub use crate::classifier::{Classification, Classifier};
pub use crate::dataset::{CrackClass, Dataset, DatasetLoader, LabeledFolder, LabeledSample};
pub use crate::error::{CrackError, Result};
pub use crate::features::{extract_features, FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
pub use crate::pipeline::{CrackPipeline, PipelineParams};
pub use crate::training::{select_best_model, GridSearch, ParamGrid, PersistedModel};
pub use crate::validation::{validate, AccuracyReport};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use crack_classifier::prelude::*;
/// use std::path::Path;
///
/// # fn main() -> crack_classifier::Result<()> {
/// let classifier = Classifier::load(Path::new("models/best_model_RBF_C1.000000_G0.500000.json"))?;
/// let result = classifier.classify_path(Path::new("crack.png"))?;
/// println!("{} ({})", result.name(), result.raw_label);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::{
        Classifier, CrackClass, CrackPipeline, Dataset, DatasetLoader, FeatureVector, GridSearch,
        LabeledFolder, ParamGrid,
    };
}
