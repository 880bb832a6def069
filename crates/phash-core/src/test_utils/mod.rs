//! Synthetic images for unit tests.

use image::{GrayImage, Luma, Rgb, RgbImage, Rgba, RgbaImage};

/// Colourful image whose channels vary independently
pub fn gradient_rgb_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            ((x + y) * 3 % 256) as u8,
        ])
    })
}

/// Single-colour image
pub fn solid_rgba_image(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba(color))
}

/// 32×32 diagonal gradient with a bright rectangle
pub fn pattern_gray_image() -> GrayImage {
    GrayImage::from_fn(32, 32, |x, y| {
        if (8..20).contains(&x) && (6..14).contains(&y) {
            Luma([220])
        } else {
            Luma([(40 + x * 3 + y * 2) as u8])
        }
    })
}
