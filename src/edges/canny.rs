//! Double-threshold Canny with 8-connected hysteresis.
use super::grad::{sobel_gradients, GradientNorm};
use super::nms::non_maximum_suppression;
use crate::image::{GrayImageU8, ImageF32, ImageU8, ImageView};

pub const EDGE_ON: u8 = 255;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CannyThresholds {
    /// Pixels above this magnitude may extend an edge.
    pub low: f32,
    /// Pixels above this magnitude start an edge.
    pub high: f32,
}

impl CannyThresholds {
    /// Swaps the thresholds when given in reverse order.
    pub fn new(low: f32, high: f32) -> Self {
        if low <= high {
            Self { low, high }
        } else {
            Self {
                low: high,
                high: low,
            }
        }
    }
}

/// Run Canny on an 8-bit image. The result holds 0 or [`EDGE_ON`] only.
pub fn canny(gray: &ImageU8<'_>, thresholds: CannyThresholds, norm: GradientNorm) -> GrayImageU8 {
    let (w, h) = (gray.width(), gray.height());
    let mut edges = GrayImageU8::zeros(w, h);
    if w < 3 || h < 3 {
        return edges;
    }

    let grad = sobel_gradients(&ImageF32::from_u8(gray), norm);
    let thin = non_maximum_suppression(&grad, thresholds.low);

    let mut stack: Vec<(usize, usize)> = Vec::new();
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            if thin.get(x, y) > thresholds.high && edges.get(x, y) == 0 {
                edges.set(x, y, EDGE_ON);
                stack.push((x, y));
                grow(&thin, &mut edges, &mut stack);
            }
        }
    }
    edges
}

fn grow(thin: &ImageF32, edges: &mut GrayImageU8, stack: &mut Vec<(usize, usize)>) {
    let (w, h) = (thin.w, thin.h);
    while let Some((x, y)) = stack.pop() {
        for ny in y.saturating_sub(1)..=(y + 1).min(h - 1) {
            for nx in x.saturating_sub(1)..=(x + 1).min(w - 1) {
                if edges.get(nx, ny) == 0 && thin.get(nx, ny) > 0.0 {
                    edges.set(nx, ny, EDGE_ON);
                    stack.push((nx, ny));
                }
            }
        }
    }
}
