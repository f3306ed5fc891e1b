//! I/O helpers for images and JSON artifacts.
//!
//! - `load_image`: decode a PNG/JPEG into a `DynamicImage` (channel layout kept).
//! - `save_grayscale_u8`: write an owned 8-bit gray buffer to disk.
//! - `write_json_file` / `read_json_file`: serde round-trip for reports, configs
//!   and persisted models.
use super::GrayImageU8;
use crate::error::{CrackError, Result};
use image::DynamicImage;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Decode an image from disk. Zero-sized images are rejected.
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    let img = image::open(path).map_err(|source| CrackError::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;
    if img.width() == 0 || img.height() == 0 {
        return Err(CrackError::EmptyImage {
            width: img.width(),
            height: img.height(),
        });
    }
    Ok(img)
}

/// Save an 8-bit grayscale buffer; the format follows the file extension.
pub fn save_grayscale_u8(buffer: &GrayImageU8, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    buffer
        .to_gray_image()
        .save(path)
        .map_err(|source| CrackError::ImageSave {
            path: path.to_path_buf(),
            source,
        })
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value).map_err(|source| CrackError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|source| CrackError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let data = fs::read_to_string(path).map_err(|source| CrackError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&data).map_err(|source| CrackError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| CrackError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }
    Ok(())
}
