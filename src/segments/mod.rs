//! Straight line segments inside a binary mask.
//!
//! The detector is a progressive probabilistic Hough transform:
//!
//! - On-pixels are visited in a seeded random order and vote into a
//!   `(θ, ρ)` accumulator, one vote per angle bin.
//! - As soon as a bin reaches the vote threshold, the line through the current
//!   pixel is walked in both directions with 16.16 fixed-point stepping,
//!   tolerating runs of at most `max_line_gap` off-pixels.
//! - If the walked extent reaches `min_line_length` along x or y, the segment
//!   is emitted and its pixels withdraw their votes. Walked pixels are removed
//!   from the working mask either way.
//!
//! Parameters are fixed by default (ρ = 1 px, θ = 1°, threshold 50, minimum
//! length 20, maximum gap 10) so feature semantics match between training and
//! inference. The seed makes the visiting order, and therefore the output,
//! reproducible.

mod hough;
mod segment;

pub use hough::{probabilistic_hough, HoughParams};
pub use segment::Segment;
