use crack_classifier::config::validate as validate_config;
use crack_classifier::image::io::write_json_file;
use crack_classifier::{validate, Classifier, CrackError, Result};
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
    let config = validate_config::load_config(Path::new(&config_path))?;

    let classifier = Classifier::load(&config.model)?;
    let report = validate(&classifier, &config.classes)?;

    for skipped in &report.skipped {
        println!("Skipped {}: {}", skipped.path.display(), skipped.reason);
    }
    println!(
        "Accuracy: {:.2}% ({}/{} correct)",
        report.percent(),
        report.correct,
        report.processed
    );
    if let Some(path) = &config.report_json {
        write_json_file(path, &report)?;
    }
    Ok(())
}

fn usage() -> CrackError {
    CrackError::config("Usage: validate <config.json>")
}
