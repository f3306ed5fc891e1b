use crate::error::Result;
use crate::image::io::read_json_file;
use crate::pipeline::PipelineParams;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct FeatureToolConfig {
    pub input: PathBuf,
    #[serde(default)]
    pub pipeline: PipelineParams,
    pub output: FeatureOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct FeatureOutputConfig {
    pub preprocessed_image: PathBuf,
    pub mask_image: PathBuf,
    pub features_json: PathBuf,
}

pub fn load_config(path: &Path) -> Result<FeatureToolConfig> {
    read_json_file(path)
}
