//! Canny edge detection used to seed the crack mask.
//!
//! - `grad`: 3×3 Sobel derivatives with L1 or L2 magnitude.
//! - `nms`: thinning along the quantised gradient direction.
//! - `canny`: double threshold plus 8-connected hysteresis, producing a binary
//!   edge map with values 0/255.
//!
//! Borders clamp (replicate) during differentiation; the outermost 1-pixel
//! frame never carries an edge.

pub mod canny;
pub mod grad;
pub mod nms;

pub use canny::{canny, CannyThresholds};
pub use grad::{sobel_gradients, Grad, GradientNorm};
pub use nms::non_maximum_suppression;
