//! Grayscale image buffers used by the crack pipeline.
//!
//! - [`GrayImageU8`]: owned 8-bit buffer (preprocessed images, masks).
//! - [`ImageU8`]: borrowed 8-bit view with stride.
//! - [`ImageF32`]: owned float buffer for filtering and gradients.
//!
//! Conversions to and from `image::GrayImage` live on the owned buffer so the
//! `image`/`imageproc` primitives can be used at the edges of each stage.
pub mod f32;
pub mod io;
pub mod traits;
pub mod u8;

pub use self::f32::ImageF32;
pub use self::traits::{ImageView, ImageViewMut, Rows};
pub use self::u8::{GrayImageU8, ImageU8};
