use crack_classifier::config::features;
use crack_classifier::diagnostics::FeatureReport;
use crack_classifier::image::io::{load_image, save_grayscale_u8, write_json_file};
use crack_classifier::{CrackError, CrackPipeline, Result};
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
    let config = features::load_config(Path::new(&config_path))?;

    let image = load_image(&config.input)?;
    let pipeline = CrackPipeline::new(config.pipeline);
    let out = pipeline.run_detailed(&image)?;
    let report = FeatureReport::from_output(config.input.clone(), &out);

    save_grayscale_u8(&out.preprocessed, &config.output.preprocessed_image)?;
    save_grayscale_u8(out.mask.as_image(), &config.output.mask_image)?;
    write_json_file(&config.output.features_json, &report)?;

    for feature in &report.features {
        println!("{:>14} = {:.4}", feature.name, feature.value);
    }
    println!(
        "Saved preprocessed image to {}",
        config.output.preprocessed_image.display()
    );
    println!("Saved mask to {}", config.output.mask_image.display());
    println!(
        "Saved {} segments to {}",
        report.segments.len(),
        config.output.features_json.display()
    );
    Ok(())
}

fn usage() -> CrackError {
    CrackError::config("Usage: crack_features <config.json>")
}
