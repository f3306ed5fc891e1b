use image::{GrayImage, Luma};
use std::path::{Path, PathBuf};

pub const SIZE: u32 = 640;

/// Featureless surface: no edges, so no mask pixels and no lines.
pub fn blank_surface(level: u8) -> GrayImage {
    GrayImage::from_pixel(SIZE, SIZE, Luma([level]))
}

/// Light surface crossed by one dark horizontal crack of `length` pixels.
pub fn horizontal_crack(length: u32, thickness: u32, row: u32) -> GrayImage {
    assert!(length > 0 && length < SIZE, "crack length must fit the image");
    assert!(thickness > 0, "crack thickness must be positive");
    let x0 = (SIZE - length) / 2;
    GrayImage::from_fn(SIZE, SIZE, |x, y| {
        if (row..row + thickness).contains(&y) && (x0..x0 + length).contains(&x) {
            Luma([25])
        } else {
            Luma([200])
        }
    })
}

pub fn write_png(dir: &Path, name: &str, img: &GrayImage) -> PathBuf {
    let path = dir.join(name);
    img.save(&path).expect("write synthetic png");
    path
}
