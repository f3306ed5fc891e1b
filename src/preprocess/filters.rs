//! Separable smoothing filters applied row-wise then column-wise.
use crate::image::{ImageF32, ImageView, ImageViewMut};

/// Trait implemented by separable 1D filters.
pub trait SeparableFilter {
    /// Return the 1D taps (in left-to-right order). The kernel is assumed to be
    /// symmetric around its centre, but the implementation does not rely on it.
    fn taps(&self) -> &[f32];
}

/// Sampled Gaussian with an odd number of taps normalised to unit sum.
#[derive(Clone, Debug, PartialEq)]
pub struct GaussianKernel {
    taps: Vec<f32>,
    sigma: f32,
}

impl GaussianKernel {
    /// `size` is rounded up to the next odd value; `sigma` must be positive.
    pub fn new(size: usize, sigma: f32) -> Self {
        let size = size.max(1) | 1;
        let half = (size / 2) as f32;
        let denom = 2.0 * sigma * sigma;
        let mut taps: Vec<f32> = (0..size)
            .map(|i| {
                let d = i as f32 - half;
                (-(d * d) / denom).exp()
            })
            .collect();
        let sum: f32 = taps.iter().sum();
        for t in &mut taps {
            *t /= sum;
        }
        Self { taps, sigma }
    }

    pub fn sigma(&self) -> f32 {
        self.sigma
    }
}

impl SeparableFilter for GaussianKernel {
    #[inline]
    fn taps(&self) -> &[f32] {
        &self.taps
    }
}

/// Convolve `src` with `filter` along x then y, clamping at the borders.
pub fn apply(filter: &dyn SeparableFilter, src: &ImageF32) -> ImageF32 {
    let taps = filter.taps();
    let (w, h) = (src.w, src.h);
    if w == 0 || h == 0 || taps.is_empty() {
        return src.clone();
    }
    let radius = (taps.len() / 2) as isize;

    let mut tmp = ImageF32::new(w, h);
    for y in 0..h {
        let src_row = src.row(y);
        let dst_row = tmp.row_mut(y);
        for (x, dst) in dst_row.iter_mut().enumerate() {
            let mut acc = 0.0;
            for (k, &t) in taps.iter().enumerate() {
                let sx = (x as isize + k as isize - radius).clamp(0, w as isize - 1) as usize;
                acc += src_row[sx] * t;
            }
            *dst = acc;
        }
    }

    let mut out = ImageF32::new(w, h);
    for y in 0..h {
        let dst_row = out.row_mut(y);
        for (k, &t) in taps.iter().enumerate() {
            let sy = (y as isize + k as isize - radius).clamp(0, h as isize - 1) as usize;
            let src_row = tmp.row(sy);
            for (dst, &s) in dst_row.iter_mut().zip(src_row) {
                *dst += s * t;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gaussian_taps_are_normalised_and_symmetric() {
        let k = GaussianKernel::new(5, 1.5);
        let taps = k.taps();
        assert_eq!(taps.len(), 5);
        let sum: f32 = taps.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
        assert!((taps[0] - taps[4]).abs() < 1e-7);
        assert!((taps[1] - taps[3]).abs() < 1e-7);
        assert!(taps[2] > taps[1] && taps[1] > taps[0]);
    }

    #[test]
    fn blur_keeps_constant_image_constant() {
        let mut img = ImageF32::new(8, 6);
        img.data.iter_mut().for_each(|v| *v = 42.0);
        let out = apply(&GaussianKernel::new(5, 1.5), &img);
        assert!(out.data.iter().all(|&v| (v - 42.0).abs() < 1e-4));
    }
}
