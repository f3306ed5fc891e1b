use crate::dataset::LabeledFolder;
use crate::error::Result;
use crate::image::io::read_json_file;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct ValidateConfig {
    pub model: PathBuf,
    pub classes: Vec<LabeledFolder>,
    #[serde(default)]
    pub report_json: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<ValidateConfig> {
    read_json_file(path)
}
