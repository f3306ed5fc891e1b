mod common;

use common::synthetic_image::{blank_surface, horizontal_crack, write_png};
use crack_classifier::svm::Kernel;
use crack_classifier::training::{
    select_best_model, CrossValidationParams, GridSearch, HyperparameterCandidate, ParamGrid,
};
use crack_classifier::{
    validate, Classifier, CrackClass, CrackError, CrackPipeline, DatasetLoader, LabeledFolder,
};
use std::fs;
use std::path::Path;

fn train_model(root: &Path) -> Classifier {
    let shrinkage = root.join("train_s");
    let thermal = root.join("train_t");
    fs::create_dir_all(&shrinkage).unwrap();
    fs::create_dir_all(&thermal).unwrap();
    for i in 0..2u32 {
        write_png(&shrinkage, &format!("{i}.png"), &blank_surface(180 + 10 * i as u8));
        write_png(
            &thermal,
            &format!("{i}.png"),
            &horizontal_crack(350 + 100 * i, 6, 320),
        );
    }
    let folders = [
        LabeledFolder::new(&shrinkage, CrackClass::Shrinkage),
        LabeledFolder::new(&thermal, CrackClass::Thermal),
    ];
    let dataset = DatasetLoader::default().load(&folders).unwrap();
    let search = GridSearch::new(
        ParamGrid::single(HyperparameterCandidate::new(Kernel::Rbf { gamma: 0.1 }, 1.0)),
        CrossValidationParams {
            folds: 2,
            ..Default::default()
        },
    );
    let selected = select_best_model(
        &dataset,
        &search,
        CrackPipeline::default().params(),
        &root.join("models"),
    )
    .unwrap();
    Classifier::load(&selected.path).unwrap()
}

#[test]
fn folder_without_readable_images_is_insufficient_data() {
    let root = tempfile::tempdir().unwrap();
    let classifier = train_model(root.path());

    let empty = root.path().join("empty");
    fs::create_dir_all(&empty).unwrap();
    fs::write(empty.join("notes.txt"), "not an image").unwrap();

    let err = validate(
        &classifier,
        &[LabeledFolder::new(&empty, CrackClass::Shrinkage)],
    )
    .unwrap_err();
    assert!(err.is_insufficient_data(), "{err}");
}

#[test]
fn unreadable_files_are_skipped_and_counted() {
    let root = tempfile::tempdir().unwrap();
    let classifier = train_model(root.path());

    let held_out = root.path().join("held_out");
    fs::create_dir_all(&held_out).unwrap();
    write_png(&held_out, "a.png", &blank_surface(175));
    fs::write(held_out.join("broken.png"), b"definitely not a png").unwrap();

    let report = validate(
        &classifier,
        &[LabeledFolder::new(&held_out, CrackClass::Shrinkage)],
    )
    .unwrap();
    assert_eq!(report.processed, 1);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.correct, 1);
}

#[test]
fn malformed_pairings_fail_before_processing() {
    let root = tempfile::tempdir().unwrap();
    let classifier = train_model(root.path());
    let missing = root.path().join("does_not_exist");
    let err = validate(
        &classifier,
        &[LabeledFolder::new(&missing, CrackClass::Thermal)],
    )
    .unwrap_err();
    assert!(matches!(err, CrackError::Config { .. }));
}

#[test]
fn missing_model_is_a_load_error() {
    let root = tempfile::tempdir().unwrap();
    assert!(matches!(
        Classifier::load(&root.path().join("absent.json")),
        Err(CrackError::ModelLoad { .. })
    ));
}
