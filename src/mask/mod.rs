//! Binary crack mask from a preprocessed image.
//!
//! Thresholds are self-calibrating: with `med` the mean intensity,
//! `low = max(0, 0.2·med)` and `high = min(255, 1.1·med)`. The Canny edge map
//! is then closed with one 3×3 dilation followed by one 3×3 erosion, which
//! bridges small gaps in thin crack outlines without thickening them.
use crate::edges::{canny, CannyThresholds, GradientNorm};
use crate::image::{GrayImageU8, ImageView};
use imageproc::distance_transform::Norm;
use imageproc::morphology::{dilate, erode};
use log::debug;
use serde::{Deserialize, Serialize};

/// Value of an "on" (candidate crack) pixel.
pub const MASK_ON: u8 = 255;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaskParams {
    /// Low Canny threshold as a fraction of the mean intensity.
    pub low_ratio: f64,
    /// High Canny threshold as a fraction of the mean intensity.
    pub high_ratio: f64,
    pub gradient_norm: GradientNorm,
    /// Chebyshev radius of the square structuring element (1 → 3×3).
    pub morph_radius: u8,
    pub dilate_iterations: usize,
    pub erode_iterations: usize,
}

impl Default for MaskParams {
    fn default() -> Self {
        Self {
            low_ratio: 0.2,
            high_ratio: 1.1,
            gradient_norm: GradientNorm::L1,
            morph_radius: 1,
            dilate_iterations: 1,
            erode_iterations: 1,
        }
    }
}

impl MaskParams {
    /// Edge thresholds for an image of mean intensity `mean`.
    pub fn thresholds_for_mean(&self, mean: f64) -> CannyThresholds {
        let low = (self.low_ratio * mean).max(0.0);
        let high = (self.high_ratio * mean).min(255.0);
        CannyThresholds::new(low as f32, high as f32)
    }
}

/// Single-channel image whose pixels are exactly 0 or [`MASK_ON`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    pixels: GrayImageU8,
}

impl Mask {
    /// All-off mask.
    pub fn empty(width: usize, height: usize) -> Self {
        Self {
            pixels: GrayImageU8::zeros(width, height),
        }
    }

    /// Binarise: any non-zero pixel becomes on.
    pub fn from_gray(mut gray: GrayImageU8) -> Self {
        for y in 0..gray.height() {
            for x in 0..gray.width() {
                if gray.get(x, y) != 0 {
                    gray.set(x, y, MASK_ON);
                }
            }
        }
        Self { pixels: gray }
    }

    pub fn width(&self) -> usize {
        self.pixels.width()
    }

    pub fn height(&self) -> usize {
        self.pixels.height()
    }

    #[inline]
    pub fn is_on(&self, x: usize, y: usize) -> bool {
        self.pixels.get(x, y) != 0
    }

    pub fn set(&mut self, x: usize, y: usize, on: bool) {
        self.pixels.set(x, y, if on { MASK_ON } else { 0 });
    }

    pub fn on_count(&self) -> usize {
        self.pixels.as_view().count_non_zero()
    }

    /// Fraction of on pixels, in `[0, 1]`; 0 for an empty mask.
    pub fn density(&self) -> f64 {
        let total = self.pixels.pixel_count();
        if total == 0 {
            return 0.0;
        }
        self.on_count() as f64 / total as f64
    }

    pub fn as_image(&self) -> &GrayImageU8 {
        &self.pixels
    }
}

#[derive(Clone, Debug, Default)]
pub struct CrackMaskDetector {
    params: MaskParams,
}

impl CrackMaskDetector {
    pub fn new(params: MaskParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &MaskParams {
        &self.params
    }

    pub fn detect(&self, preprocessed: &GrayImageU8) -> Mask {
        let view = preprocessed.as_view();
        let mean = view.mean();
        let thresholds = self.params.thresholds_for_mean(mean);
        debug!(
            "mask: mean={:.2} low={:.2} high={:.2}",
            mean, thresholds.low, thresholds.high
        );

        let edges = canny(&view, thresholds, self.params.gradient_norm);
        let mut morph = edges.to_gray_image();
        for _ in 0..self.params.dilate_iterations {
            morph = dilate(&morph, Norm::LInf, self.params.morph_radius);
        }
        for _ in 0..self.params.erode_iterations {
            morph = erode(&morph, Norm::LInf, self.params.morph_radius);
        }
        Mask::from_gray(GrayImageU8::from_gray_image(morph))
    }
}
