//! Serializable reports produced alongside the main results.
//!
//! - [`TimingBreakdown`]: per-stage wall-clock timings of a pipeline run.
//! - [`FeatureReport`]: intermediates of one image (features, segments, mask
//!   occupancy) for the inspection tool.
//! - [`GridSearchReport`]: every candidate's fold accuracies plus the winner.

pub mod features;
pub mod grid_search;
pub mod timing;

pub use features::{FeatureReport, NamedFeature};
pub use grid_search::{CandidateReport, GridSearchReport};
pub use timing::{StageTiming, TimingBreakdown};
