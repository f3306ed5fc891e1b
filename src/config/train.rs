use crate::dataset::{validate_folders, LabeledFolder};
use crate::error::{CrackError, Result};
use crate::image::io::read_json_file;
use crate::pipeline::PipelineParams;
use crate::svm::SolverParams;
use crate::training::{CrossValidationParams, FoldRemainder, GridSearch, ParamGrid};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct TrainConfig {
    pub classes: Vec<LabeledFolder>,
    pub output_dir: PathBuf,
    #[serde(default = "default_folds")]
    pub folds: usize,
    #[serde(default)]
    pub fold_remainder: FoldRemainder,
    /// Shuffle seed applied before folds are cut; `null` keeps folder order.
    #[serde(default = "default_seed")]
    pub seed: Option<u64>,
    #[serde(default)]
    pub grid: ParamGrid,
    #[serde(default)]
    pub solver: SolverParams,
    #[serde(default)]
    pub pipeline: PipelineParams,
    #[serde(default)]
    pub strict_standardization: bool,
    /// Optional path for the grid-search report.
    #[serde(default)]
    pub report_json: Option<PathBuf>,
}

fn default_folds() -> usize {
    10
}

fn default_seed() -> Option<u64> {
    Some(42)
}

impl TrainConfig {
    /// Structural checks that need no image decoding.
    pub fn validate(&self) -> Result<()> {
        validate_folders(&self.classes)?;
        if self.folds < 2 {
            return Err(CrackError::config(format!(
                "folds must be at least 2, got {}",
                self.folds
            )));
        }
        self.grid.validate()
    }

    pub fn cross_validation(&self) -> CrossValidationParams {
        CrossValidationParams {
            folds: self.folds,
            remainder: self.fold_remainder,
            solver: self.solver,
        }
    }

    pub fn grid_search(&self) -> GridSearch {
        GridSearch::new(self.grid.clone(), self.cross_validation())
    }
}

pub fn load_config(path: &Path) -> Result<TrainConfig> {
    read_json_file(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::svm::KernelFamily;

    #[test]
    fn minimal_config_uses_defaults() {
        let json = r#"{
            "classes": [
                {"folder": "data/shrinkage", "label": 0},
                {"folder": "data/thermal", "label": 1}
            ],
            "output_dir": "models"
        }"#;
        let cfg: TrainConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.folds, 10);
        assert_eq!(cfg.fold_remainder, FoldRemainder::Distribute);
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.grid, ParamGrid::default());
        assert_eq!(cfg.solver.max_iter, 1000);
        assert_eq!(cfg.pipeline.preprocess.size, 640);
        assert!(cfg.report_json.is_none());
    }

    #[test]
    fn partial_grid_and_truncate() {
        let json = r#"{
            "classes": [],
            "output_dir": "m",
            "folds": 5,
            "fold_remainder": "truncate",
            "grid": {"kernels": ["rbf"], "cost": [1.0]}
        }"#;
        let cfg: TrainConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.fold_remainder, FoldRemainder::Truncate);
        assert_eq!(cfg.grid.kernels, vec![KernelFamily::Rbf]);
        assert_eq!(cfg.grid.gamma.len(), 7);
        assert_eq!(cfg.grid_search().cv.folds, 5);
        // no folders is a configuration error
        assert!(matches!(cfg.validate(), Err(CrackError::Config { .. })));
    }
}
