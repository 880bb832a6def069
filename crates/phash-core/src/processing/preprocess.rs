//! Image normalisation ahead of the frequency transform.

use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, Rgba, RgbaImage};
use log::debug;
use ndarray::Array2;

use super::WORKING_SIZE;
use crate::config::MAX_MIN_WIDTH;
use crate::error::{Error, Result};

/// Largest intermediate image, in pixels, the upscaling step may allocate
pub const MAX_UPSCALED_PIXELS: u64 = 1 << 26;

/// Discrete Gaussian approximation applied after upscaling
const SMOOTHING_KERNEL: [f32; 9] = [
    0.0625, 0.125, 0.0625, //
    0.125, 0.25, 0.125, //
    0.0625, 0.125, 0.0625,
];

/// Grayscale intensities in [0, 255], `WORKING_SIZE` on a side.
///
/// Indexed `(x, y)`: the first axis runs along the image width.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkingGrid(Array2<f64>);

impl WorkingGrid {
    /// Build a grid by evaluating `f(x, y)` for every cell
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> f64,
    {
        Self(Array2::from_shape_fn(
            (WORKING_SIZE, WORKING_SIZE),
            |(x, y)| f(x, y),
        ))
    }

    /// Intensity at `(x, y)`
    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.0[[x, y]]
    }

    pub fn as_array(&self) -> &Array2<f64> {
        &self.0
    }
}

/// Normalise a decoded image into the working grid.
///
/// Images narrower than `min_width` are upscaled by `1 + min_width / width` and smoothed
/// first; `min_width == 0` disables that step. Images with a zero dimension are rejected,
/// as is a `min_width` whose upscaled image would exceed [`MAX_UPSCALED_PIXELS`].
pub fn preprocess(img: &DynamicImage, min_width: u32) -> Result<WorkingGrid> {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return Err(Error::EmptyImage { width, height });
    }
    if min_width > MAX_MIN_WIDTH {
        return Err(Error::Configuration(format!(
            "Minimum width must not exceed {}",
            MAX_MIN_WIDTH
        )));
    }

    let mut rgba = img.to_rgba8();

    if min_width > 0 && width < min_width {
        let (up_width, up_height) = upscale_dimensions(width, height, min_width);
        // The factor follows the width alone, so tall narrow images grow quadratically
        if up_width as u64 * up_height as u64 > MAX_UPSCALED_PIXELS {
            return Err(Error::Configuration(format!(
                "Upscaling {}x{} to {}x{} exceeds {} pixels",
                width, height, up_width, up_height, MAX_UPSCALED_PIXELS
            )));
        }
        debug!(
            "Upscaling {}x{} image to {}x{} before hashing",
            width, height, up_width, up_height
        );
        rgba = imageops::resize(&rgba, up_width, up_height, FilterType::Triangle);
        rgba = smooth(&rgba);
    }

    // Only the spatial resolution needs reducing here, fine detail is discarded anyway
    let small = imageops::resize(
        &rgba,
        WORKING_SIZE as u32,
        WORKING_SIZE as u32,
        FilterType::Nearest,
    );

    Ok(grayscale_grid(small))
}

/// Dimensions of an image of width `width` after upscaling towards `min_width`
pub fn upscale_dimensions(width: u32, height: u32, min_width: u32) -> (u32, u32) {
    let factor = 1.0 + min_width as f32 / width as f32;
    (
        (width as f32 * factor) as u32,
        (height as f32 * factor) as u32,
    )
}

/// Apply the 3×3 smoothing kernel to every channel.
///
/// The outer 1-pixel ring is copied through unchanged.
pub fn smooth(image: &RgbaImage) -> RgbaImage {
    let (width, height) = image.dimensions();
    let mut output = image.clone();

    if width < 3 || height < 3 {
        return output;
    }

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let mut acc = [0.0f32; 4];

            for (k, weight) in SMOOTHING_KERNEL.iter().enumerate() {
                let sx = x + (k % 3) as u32 - 1;
                let sy = y + (k / 3) as u32 - 1;
                let pixel = image.get_pixel(sx, sy);

                for (channel, value) in acc.iter_mut().enumerate() {
                    *value += weight * pixel[channel] as f32;
                }
            }

            output.put_pixel(x, y, Rgba(acc.map(|v| v.round().clamp(0.0, 255.0) as u8)));
        }
    }

    output
}

/// Convert to grayscale and read one channel per pixel.
///
/// The decoder's grayscale conversion is expanded back to RGBA, so R = G = B and the blue
/// channel carries the intensity.
fn grayscale_grid(small: RgbaImage) -> WorkingGrid {
    let gray = DynamicImage::ImageRgba8(small).grayscale().to_rgba8();
    WorkingGrid::from_fn(|x, y| gray.get_pixel(x as u32, y as u32)[2] as f64)
}
