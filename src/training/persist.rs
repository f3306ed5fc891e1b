use super::grid::HyperparameterCandidate;
use crate::dataset::Standardization;
use crate::error::{CrackError, Result};
use crate::image::io::{read_json_file, write_json_file};
use crate::pipeline::PipelineParams;
use crate::svm::{KernelFamily, SvmModel};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Everything needed to classify a raw image later: the fitted SVM, the
/// standardisation it was trained under and the pipeline that produced the
/// training features.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PersistedModel {
    pub model_id: String,
    pub kernel: KernelFamily,
    pub svm: SvmModel,
    pub standardization: Standardization,
    /// Mean cross-validated accuracy of the winning candidate, in `[0, 1]`.
    pub cv_accuracy: f64,
    #[serde(default)]
    pub pipeline: PipelineParams,
}

impl PersistedModel {
    pub fn new(
        candidate: &HyperparameterCandidate,
        svm: SvmModel,
        standardization: Standardization,
        cv_accuracy: f64,
        pipeline: PipelineParams,
    ) -> Self {
        Self {
            model_id: candidate.model_id(),
            kernel: candidate.kernel.family(),
            svm,
            standardization,
            cv_accuracy,
            pipeline,
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.json", self.model_id)
    }

    /// Write to `<dir>/<model_id>.json` and return that path.
    pub fn save(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(self.file_name());
        write_json_file(&path, self)?;
        info!("saved model {} to {}", self.model_id, path.display());
        Ok(path)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let model: Self = read_json_file(path).map_err(|err| CrackError::ModelLoad {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        model
            .svm
            .validate()
            .and_then(|_| {
                if model.svm.kernel.family() == model.kernel {
                    Ok(())
                } else {
                    Err(CrackError::config("kernel family does not match the SVM"))
                }
            })
            .map_err(|err| CrackError::ModelLoad {
                path: path.to_path_buf(),
                reason: err.to_string(),
            })?;
        Ok(model)
    }
}
