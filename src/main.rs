use crack_classifier::CrackPipeline;
use image::{DynamicImage, GrayImage, Luma};

fn main() {
    // Demo stub: a light surface with one long dark horizontal crack
    let img = GrayImage::from_fn(640, 480, |x, y| {
        if (236..242).contains(&y) && (80..560).contains(&x) {
            Luma([30])
        } else {
            Luma([190])
        }
    });
    let pipeline = CrackPipeline::default();
    match pipeline.run_detailed(&DynamicImage::ImageLuma8(img)) {
        Ok(out) => {
            for (name, value) in out.features.named() {
                println!("{name:>14} = {value:.4}");
            }
            println!("latency_ms={:.3}", out.timing.total_ms);
        }
        Err(err) => eprintln!("Error: {err}"),
    }
}
