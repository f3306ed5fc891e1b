use crack_classifier::config::classify;
use crack_classifier::{Classifier, CrackError, Result};
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = classify::load_config(Path::new(&config_path))?;

    let classifier = Classifier::load(&config.model)?;
    let result = classifier.classify_path(&config.input)?;
    println!(
        "{}: {} (label {}, decision {:.4})",
        config.input.display(),
        result.name(),
        result.raw_label,
        result.decision
    );
    Ok(())
}

fn usage() -> CrackError {
    CrackError::config("Usage: classify <config.json>")
}
