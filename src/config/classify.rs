use crate::error::Result;
use crate::image::io::read_json_file;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct ClassifyConfig {
    pub model: PathBuf,
    pub input: PathBuf,
}

pub fn load_config(path: &Path) -> Result<ClassifyConfig> {
    read_json_file(path)
}
