//! Image normalisation ahead of crack detection.
//!
//! Every input, whatever its size or channel layout, leaves this stage as a
//! `size × size` single-channel 8-bit image smoothed by a small Gaussian:
//!
//! 1. Resize to the canonical square (aspect ratio is not preserved).
//! 2. Convert multi-channel inputs to luma using BT.601 weights; single-channel
//!    inputs pass through.
//! 3. Separable Gaussian blur (default 5 taps, σ = 1.5), rounded back to 8 bits.
pub mod filters;

use crate::error::{CrackError, Result};
use crate::image::{GrayImageU8, ImageF32};
use filters::GaussianKernel;
use image::imageops::FilterType;
use image::DynamicImage;
use serde::{Deserialize, Serialize};

pub use filters::SeparableFilter;

pub const CANONICAL_SIZE: u32 = 640;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessParams {
    /// Side length of the square output image.
    pub size: u32,
    /// Gaussian kernel width in pixels (odd).
    pub blur_taps: usize,
    pub blur_sigma: f32,
}

impl Default for PreprocessParams {
    fn default() -> Self {
        Self {
            size: CANONICAL_SIZE,
            blur_taps: 5,
            blur_sigma: 1.5,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Preprocessor {
    params: PreprocessParams,
    kernel: GaussianKernel,
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new(PreprocessParams::default())
    }
}

impl Preprocessor {
    pub fn new(params: PreprocessParams) -> Self {
        Self {
            kernel: GaussianKernel::new(params.blur_taps, params.blur_sigma),
            params,
        }
    }

    pub fn params(&self) -> &PreprocessParams {
        &self.params
    }

    pub fn preprocess(&self, input: &DynamicImage) -> Result<GrayImageU8> {
        if input.width() == 0 || input.height() == 0 {
            return Err(CrackError::EmptyImage {
                width: input.width(),
                height: input.height(),
            });
        }
        let size = self.params.size;
        let resized = input.resize_exact(size, size, FilterType::Triangle);
        let gray = to_gray(&resized);
        let smoothed = filters::apply(&self.kernel, &ImageF32::from_u8(&gray.as_view()));
        Ok(smoothed.to_u8())
    }
}

fn to_gray(img: &DynamicImage) -> GrayImageU8 {
    if img.color().channel_count() >= 3 {
        let rgb = img.to_rgb8();
        let (w, h) = (rgb.width() as usize, rgb.height() as usize);
        let data = rgb
            .pixels()
            .map(|p| {
                let [r, g, b] = p.0;
                (0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32)
                    .round()
                    .clamp(0.0, 255.0) as u8
            })
            .collect();
        GrayImageU8::new(w, h, data)
    } else {
        GrayImageU8::from_gray_image(img.to_luma8())
    }
}
