use super::{CrackClass, Dataset, LabeledFolder, LabeledSample};
use crate::error::{CrackError, Result};
use crate::pipeline::CrackPipeline;
use log::{debug, info, warn};
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// File that was found but could not be turned into a feature vector.
#[derive(Clone, Debug, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Reject malformed folder/label pairings before any image is read.
pub fn validate_folders(folders: &[LabeledFolder]) -> Result<()> {
    if folders.is_empty() {
        return Err(CrackError::config("no labelled folders given"));
    }
    let mut seen = HashSet::new();
    for entry in folders {
        CrackClass::from_label(entry.label)?;
        if !entry.folder.is_dir() {
            return Err(CrackError::config(format!(
                "{} is not a directory",
                entry.folder.display()
            )));
        }
        if !seen.insert(entry.folder.clone()) {
            return Err(CrackError::config(format!(
                "folder {} listed more than once",
                entry.folder.display()
            )));
        }
    }
    Ok(())
}

/// Regular files directly inside `folder`, sorted by path.
fn list_files(folder: &Path) -> Result<Vec<PathBuf>> {
    let read = fs::read_dir(folder).map_err(|source| CrackError::Io {
        path: folder.to_path_buf(),
        source,
    })?;
    let mut files = Vec::new();
    for entry in read {
        let entry = entry.map_err(|source| CrackError::Io {
            path: folder.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Run the pipeline over every file of every folder. Files that fail are
/// skipped and reported, never fatal.
pub fn collect_samples(
    pipeline: &CrackPipeline,
    folders: &[LabeledFolder],
) -> Result<(Vec<LabeledSample>, Vec<SkippedFile>)> {
    validate_folders(folders)?;
    let mut samples = Vec::new();
    let mut skipped = Vec::new();
    for entry in folders {
        let class = CrackClass::from_label(entry.label)?;
        let files = list_files(&entry.folder)?;
        debug!(
            "{}: {} files labelled {}",
            entry.folder.display(),
            files.len(),
            class
        );
        for path in files {
            match pipeline.features_from_path(&path) {
                Ok(features) => samples.push(LabeledSample {
                    features,
                    class,
                    source: path,
                }),
                Err(err) => {
                    warn!("skipping {}: {err}", path.display());
                    skipped.push(SkippedFile {
                        path,
                        reason: err.to_string(),
                    });
                }
            }
        }
    }
    Ok((samples, skipped))
}

/// Builds standardised datasets from labelled folders.
#[derive(Clone, Debug, Default)]
pub struct DatasetLoader {
    pipeline: CrackPipeline,
    strict_standardization: bool,
}

impl DatasetLoader {
    pub fn new(pipeline: CrackPipeline) -> Self {
        Self {
            pipeline,
            strict_standardization: false,
        }
    }

    /// Fail on zero-variance feature columns instead of leaving them unscaled.
    pub fn with_strict_standardization(mut self, strict: bool) -> Self {
        self.strict_standardization = strict;
        self
    }

    pub fn pipeline(&self) -> &CrackPipeline {
        &self.pipeline
    }

    pub fn load(&self, folders: &[LabeledFolder]) -> Result<Dataset> {
        let (samples, skipped) = collect_samples(&self.pipeline, folders)?;
        info!(
            "loaded {} samples ({} skipped) from {} folders",
            samples.len(),
            skipped.len(),
            folders.len()
        );
        if samples.is_empty() {
            return Err(CrackError::insufficient(format!(
                "no readable images in {} folders",
                folders.len()
            )));
        }
        Dataset::from_raw(samples, self.strict_standardization)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_rejects_bad_pairings() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(validate_folders(&[]), Err(CrackError::Config { .. })));

        let missing = LabeledFolder {
            folder: dir.path().join("nope"),
            label: 0,
        };
        assert!(matches!(
            validate_folders(&[missing]),
            Err(CrackError::Config { .. })
        ));

        let bad_label = LabeledFolder {
            folder: dir.path().to_path_buf(),
            label: 7,
        };
        assert!(matches!(
            validate_folders(&[bad_label]),
            Err(CrackError::Config { .. })
        ));

        let twice = LabeledFolder::new(dir.path(), CrackClass::Thermal);
        assert!(validate_folders(&[twice.clone(), twice]).is_err());
    }

    #[test]
    fn unreadable_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), b"not an image").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        let folders = [LabeledFolder::new(dir.path(), CrackClass::Shrinkage)];

        let (samples, skipped) = collect_samples(&CrackPipeline::default(), &folders).unwrap();
        assert!(samples.is_empty());
        assert_eq!(skipped.len(), 1);

        let err = DatasetLoader::default().load(&folders).unwrap_err();
        assert!(err.is_insufficient_data());
    }
}
