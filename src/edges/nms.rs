//! Non‑maximum suppression on gradient magnitude with direction alignment.
//!
//! For each pixel the two neighbours along the gradient direction (quantised
//! to 0°, 45°, 90°, 135°) are compared against the centre. Along the axis
//! directions the comparison is strict on the "previous" side and non-strict
//! on the "next" side so that a two-pixel plateau (a sharp step edge) keeps
//! exactly one pixel. The 1-pixel frame is always suppressed.
use super::grad::Grad;
use crate::image::{ImageF32, ImageView, ImageViewMut};

const TAN_22_5_DEG: f32 = 0.414_213_56;

/// Return a magnitude image where non-maximal pixels and pixels at or below
/// `floor` are zeroed.
pub fn non_maximum_suppression(grad: &Grad, floor: f32) -> ImageF32 {
    let w = grad.mag.w;
    let h = grad.mag.h;
    let mut out = ImageF32::new(w, h);
    if w < 3 || h < 3 {
        return out;
    }

    for y in 1..h - 1 {
        let mag_prev = grad.mag.row(y - 1);
        let mag_row = grad.mag.row(y);
        let mag_next = grad.mag.row(y + 1);
        let gx_row = grad.gx.row(y);
        let gy_row = grad.gy.row(y);
        let out_row = out.row_mut(y);

        for x in 1..w - 1 {
            let mag = mag_row[x];
            if mag <= floor {
                continue;
            }

            let gx = gx_row[x];
            let gy = gy_row[x];
            let abs_gx = gx.abs();
            let abs_gy = gy.abs();

            let keep = if abs_gy <= abs_gx * TAN_22_5_DEG {
                mag > mag_row[x - 1] && mag >= mag_row[x + 1]
            } else if abs_gx <= abs_gy * TAN_22_5_DEG {
                mag > mag_prev[x] && mag >= mag_next[x]
            } else if (gx >= 0.0) == (gy >= 0.0) {
                mag > mag_prev[x - 1] && mag > mag_next[x + 1]
            } else {
                mag > mag_prev[x + 1] && mag > mag_next[x - 1]
            };

            if keep {
                out_row[x] = mag;
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edges::grad::{sobel_gradients, GradientNorm};

    #[test]
    fn step_edge_thins_to_single_column() {
        let mut img = ImageF32::new(12, 12);
        for y in 0..12 {
            for x in 6..12 {
                img.set(x, y, 200.0);
            }
        }
        let grad = sobel_gradients(&img, GradientNorm::L1);
        let thin = non_maximum_suppression(&grad, 0.0);
        for y in 1..11 {
            let kept: Vec<usize> = (0..12).filter(|&x| thin.get(x, y) > 0.0).collect();
            assert_eq!(kept, vec![5], "row {y}");
        }
    }
}
