//! Single authoritative image → feature pipeline.
//!
//! Training, validation and single-image classification all go through
//! [`CrackPipeline`], so the three stages cannot drift apart between the
//! paths that build a model and the paths that use it.
use crate::diagnostics::TimingBreakdown;
use crate::error::Result;
use crate::features::{FeatureExtractor, FeatureVector};
use crate::image::io::load_image;
use crate::image::GrayImageU8;
use crate::mask::{CrackMaskDetector, Mask, MaskParams};
use crate::preprocess::{PreprocessParams, Preprocessor};
use crate::segments::{HoughParams, Segment};
use image::DynamicImage;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineParams {
    pub preprocess: PreprocessParams,
    pub mask: MaskParams,
    pub hough: HoughParams,
}

/// Every intermediate of one pipeline run.
#[derive(Clone, Debug)]
pub struct PipelineOutput {
    pub preprocessed: GrayImageU8,
    pub mask: Mask,
    pub segments: Vec<Segment>,
    pub features: FeatureVector,
    pub timing: TimingBreakdown,
}

#[derive(Clone, Debug, Default)]
pub struct CrackPipeline {
    preprocessor: Preprocessor,
    detector: CrackMaskDetector,
    extractor: FeatureExtractor,
}

impl CrackPipeline {
    pub fn new(params: PipelineParams) -> Self {
        Self {
            preprocessor: Preprocessor::new(params.preprocess),
            detector: CrackMaskDetector::new(params.mask),
            extractor: FeatureExtractor::new(params.hough),
        }
    }

    pub fn params(&self) -> PipelineParams {
        PipelineParams {
            preprocess: *self.preprocessor.params(),
            mask: *self.detector.params(),
            hough: *self.extractor.params(),
        }
    }

    pub fn features(&self, image: &DynamicImage) -> Result<FeatureVector> {
        let pre = self.preprocessor.preprocess(image)?;
        let mask = self.detector.detect(&pre);
        Ok(self.extractor.extract(&mask))
    }

    /// Load `path` and run the full pipeline on it.
    pub fn features_from_path(&self, path: &Path) -> Result<FeatureVector> {
        let image = load_image(path)?;
        self.features(&image)
    }

    pub fn run_detailed(&self, image: &DynamicImage) -> Result<PipelineOutput> {
        let mut timing = TimingBreakdown::default();
        let preprocessed = timing.time("preprocess", || self.preprocessor.preprocess(image))?;
        let mask = timing.time("mask", || self.detector.detect(&preprocessed));
        let (features, segments) =
            timing.time("features", || self.extractor.extract_with_segments(&mask));
        Ok(PipelineOutput {
            preprocessed,
            mask,
            segments,
            features,
            timing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    #[test]
    fn blank_image_has_zero_features() {
        let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(300, 200, Luma([180])));
        let f = CrackPipeline::default().features(&img).unwrap();
        assert_eq!(f, FeatureVector::zeros());
    }

    #[test]
    fn detailed_run_reports_all_stages() {
        let img = DynamicImage::ImageLuma8(GrayImage::from_fn(640, 640, |x, y| {
            if (300..306).contains(&y) && (100..540).contains(&x) {
                Luma([20])
            } else {
                Luma([200])
            }
        }));
        let out = CrackPipeline::default().run_detailed(&img).unwrap();
        assert_eq!(out.mask.width(), 640);
        assert_eq!(out.timing.stages.len(), 3);
        assert!(out.features.line_count() >= 1.0);
        assert!(out.features.mean_angle() < 1.0);
        assert_eq!(out.features.line_count() as usize, out.segments.len());
    }
}
