//! JSON configuration for the command-line tools.
//!
//! Each binary takes one config path. Sections carry `#[serde(default)]` so a
//! minimal file names only folders and outputs; everything else falls back to
//! the fixed pipeline and grid constants.

pub mod classify;
pub mod features;
pub mod train;
pub mod validate;

pub use classify::ClassifyConfig;
pub use features::{FeatureOutputConfig, FeatureToolConfig};
pub use train::TrainConfig;
pub use validate::ValidateConfig;
