use crack_classifier::config::train;
use crack_classifier::dataset::DatasetLoader;
use crack_classifier::image::io::write_json_file;
use crack_classifier::training::select_best_model;
use crack_classifier::{CrackError, CrackPipeline, Result};
use std::env;
use std::path::Path;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = train::load_config(Path::new(&config_path))?;
    config.validate()?;

    let loader = DatasetLoader::new(CrackPipeline::new(config.pipeline))
        .with_strict_standardization(config.strict_standardization);
    let mut dataset = loader.load(&config.classes)?;
    if let Some(seed) = config.seed {
        dataset.shuffle(seed);
    }
    let (shrinkage, thermal) = dataset.class_counts();
    println!(
        "Dataset: {} samples ({shrinkage} shrinkage, {thermal} thermal)",
        dataset.len()
    );

    let search = config.grid_search();
    let selected = select_best_model(&dataset, &search, config.pipeline, &config.output_dir)?;

    if let Some(report_path) = &config.report_json {
        write_json_file(report_path, &selected.report)?;
        println!("Saved grid-search report to {}", report_path.display());
    }
    println!(
        "Best model {} ({:.2}% cross-validated accuracy)",
        selected.model.model_id,
        selected.model.cv_accuracy * 100.0
    );
    println!("Saved model to {}", selected.path.display());
    Ok(())
}

fn usage() -> CrackError {
    CrackError::config("Usage: train <config.json>")
}
