//! Error taxonomy shared by the pipeline, training and inference paths.
//!
//! Load failures carry the offending path. Data-insufficiency is a distinct
//! variant so callers never confuse "nothing to learn from" with an I/O fault.
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CrackError>;

#[derive(Debug, Error)]
pub enum CrackError {
    #[error("image decode error at {path}: {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("image encode error at {path}: {source}")]
    ImageSave {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("empty image ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },
    #[error("failed to load model {path}: {reason}")]
    ModelLoad { path: PathBuf, reason: String },
    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("json error at {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid configuration: {reason}")]
    Config { reason: String },
    #[error("insufficient data: {reason}")]
    InsufficientData { reason: String },
    #[error("feature vector length mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("grid search cancelled")]
    Cancelled,
}

impl CrackError {
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    pub fn insufficient(reason: impl Into<String>) -> Self {
        Self::InsufficientData {
            reason: reason.into(),
        }
    }

    /// True for the data-insufficiency class of failures.
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, Self::InsufficientData { .. })
    }
}
