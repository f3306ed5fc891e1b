mod common;

use common::synthetic_image::{blank_surface, horizontal_crack, write_png};
use crack_classifier::dataset::collect_samples;
use crack_classifier::svm::KernelFamily;
use crack_classifier::training::{
    cross_validate, select_best_model, CrossValidationParams, FoldRemainder, GridSearch,
    HyperparameterCandidate, ParamGrid,
};
use crack_classifier::{
    validate, Classifier, CrackClass, CrackError, CrackPipeline, DatasetLoader, LabeledFolder,
};
use image::DynamicImage;
use std::fs;
use tempfile::TempDir;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// `shrinkage/` holds three featureless surfaces, `thermal/` three long
/// horizontal cracks.
fn write_dataset() -> (TempDir, Vec<LabeledFolder>) {
    let root = tempfile::tempdir().unwrap();
    let shrinkage = root.path().join("shrinkage");
    let thermal = root.path().join("thermal");
    fs::create_dir_all(&shrinkage).unwrap();
    fs::create_dir_all(&thermal).unwrap();
    for (i, level) in [170u8, 185, 200].into_iter().enumerate() {
        write_png(&shrinkage, &format!("s{i}.png"), &blank_surface(level));
    }
    for (i, length) in [300u32, 400, 500].into_iter().enumerate() {
        write_png(
            &thermal,
            &format!("t{i}.png"),
            &horizontal_crack(length, 6, 200 + 100 * i as u32),
        );
    }
    let folders = vec![
        LabeledFolder::new(&shrinkage, CrackClass::Shrinkage),
        LabeledFolder::new(&thermal, CrackClass::Thermal),
    ];
    (root, folders)
}

fn small_grid() -> ParamGrid {
    ParamGrid {
        kernels: vec![KernelFamily::Polynomial, KernelFamily::Rbf],
        cost: vec![0.5, 1.0],
        gamma: vec![0.1, 0.5],
        degree: vec![1],
        coef0: vec![0.0],
    }
}

#[test]
fn line_counts_separate_the_two_folders() {
    init_logging();
    let (_root, folders) = write_dataset();
    let (samples, skipped) = collect_samples(&CrackPipeline::default(), &folders).unwrap();
    assert!(skipped.is_empty());
    assert_eq!(samples.len(), 6);
    for s in &samples {
        match s.class {
            CrackClass::Shrinkage => assert_eq!(s.features.line_count(), 0.0, "{s:?}"),
            CrackClass::Thermal => {
                assert!(s.features.line_count() >= 1.0, "{s:?}");
                assert!(s.features.mean_angle() < 1.0, "{s:?}");
                assert!(s.features.mean_length() >= 50.0, "{s:?}");
            }
        }
    }
}

#[test]
fn grid_search_selects_a_model_that_recognises_shrinkage() {
    init_logging();
    let (root, folders) = write_dataset();
    let mut dataset = DatasetLoader::default().load(&folders).unwrap();
    dataset.shuffle(7);
    assert_eq!(dataset.class_counts(), (3, 3));

    let search = GridSearch::new(
        small_grid(),
        CrossValidationParams {
            folds: 3,
            remainder: FoldRemainder::Distribute,
            ..Default::default()
        },
    );
    let out_dir = root.path().join("models");
    let selected = select_best_model(
        &dataset,
        &search,
        CrackPipeline::default().params(),
        &out_dir,
    )
    .unwrap();
    assert_eq!(selected.report.candidates.len(), 8);
    assert!(selected.path.exists());
    let file_name = selected.path.file_name().unwrap().to_string_lossy();
    assert!(file_name.starts_with("best_model_"), "{file_name}");
    assert_eq!(file_name, format!("{}.json", selected.model.model_id));

    let classifier = Classifier::load(&selected.path).unwrap();
    let held_out = DynamicImage::ImageLuma8(blank_surface(190));
    let result = classifier.classify_image(&held_out).unwrap();
    assert_eq!(result.name(), "shrinkage");
    assert_eq!(result.raw_label, 0);

    let report = validate(&classifier, &folders).unwrap();
    assert_eq!(report.processed, 6);
    assert_eq!(report.correct, 6);
    assert_eq!(report.percent(), 100.0);
}

#[test]
fn single_candidate_grid_persists_its_parameters() {
    let (root, folders) = write_dataset();
    let mut dataset = DatasetLoader::default().load(&folders).unwrap();
    dataset.shuffle(1);
    let cand = HyperparameterCandidate::new(
        crack_classifier::svm::Kernel::Rbf { gamma: 0.5 },
        1.0,
    );
    let search = GridSearch::new(
        ParamGrid::single(cand),
        CrossValidationParams {
            folds: 2,
            ..Default::default()
        },
    );
    let selected = select_best_model(
        &dataset,
        &search,
        CrackPipeline::default().params(),
        root.path(),
    )
    .unwrap();
    assert_eq!(selected.report.best_index, 0);
    assert!(selected
        .path
        .ends_with("best_model_RBF_C1.000000_G0.500000.json"));
}

#[test]
fn one_fold_cross_validation_is_rejected() {
    let (_root, folders) = write_dataset();
    let dataset = DatasetLoader::default().load(&folders).unwrap();
    let cand = HyperparameterCandidate::new(
        crack_classifier::svm::Kernel::Rbf { gamma: 0.5 },
        1.0,
    );
    let err = cross_validate(
        &dataset,
        &cand,
        &CrossValidationParams {
            folds: 1,
            ..Default::default()
        },
    )
    .unwrap_err();
    assert!(matches!(err, CrackError::Config { .. }));
}
