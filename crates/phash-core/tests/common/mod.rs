//! Fixture images written to temporary directories.

use image::codecs::gif::GifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, Frame, Rgb, RgbImage};
use std::fs::File;
use std::path::{Path, PathBuf};

/// Diagonal ramp, brighter to the right and slightly towards the bottom
pub fn ramp_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        let v = ((x * 7 * 255 / width + y * 3 * 255 / height) / 10) as u8;
        Rgb([v, v, v])
    })
}

/// Flat-coloured blocks on a stepped background, well under 256 distinct colours
pub fn block_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        let in_red = x > width / 5 && x < width / 2 && y > height / 4 && y < height * 3 / 4;
        let in_blue = x > width * 3 / 5 && y > height / 2;
        if in_red {
            Rgb([220, 30, 30])
        } else if in_blue {
            Rgb([20, 40, 200])
        } else {
            let step = ((x + y) * 8 / (width + height)) as u8;
            Rgb([40 + step * 20, 60 + step * 15, 80 + step * 10])
        }
    })
}

/// 4×4 board of light and dark squares
pub fn checker_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        if ((x * 4 / width) + (y * 4 / height)) % 2 == 0 {
            Rgb([200, 200, 200])
        } else {
            Rgb([30, 30, 30])
        }
    })
}

/// Writes controlled variants of a base image into an output directory
pub struct ImageVariant {
    base: DynamicImage,
    output_dir: PathBuf,
}

impl ImageVariant {
    pub fn new<P: AsRef<Path>>(base: RgbImage, output_dir: P) -> Self {
        Self {
            base: DynamicImage::ImageRgb8(base),
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    /// Save the base image unchanged; the format follows the file extension
    pub fn identical(&self, file_name: &str) -> PathBuf {
        let path = self.output_dir.join(file_name);
        self.base.save(&path).unwrap();
        path
    }

    /// Save with every channel shifted by `amount`
    pub fn brightened(&self, file_name: &str, amount: i32) -> PathBuf {
        let path = self.output_dir.join(file_name);
        self.base.brighten(amount).save(&path).unwrap();
        path
    }

    /// Save as a lossy JPEG
    pub fn compressed(&self, file_name: &str, quality: u8) -> PathBuf {
        let path = self.output_dir.join(file_name);
        let mut file = File::create(&path).unwrap();
        JpegEncoder::new_with_quality(&mut file, quality)
            .encode_image(&self.base)
            .unwrap();
        path
    }

    /// Save as an animated GIF whose first frame is the base image
    pub fn animated(&self, file_name: &str, later_frame: RgbImage) -> PathBuf {
        let path = self.output_dir.join(file_name);
        let file = File::create(&path).unwrap();

        let frames = vec![
            Frame::new(self.base.to_rgba8()),
            Frame::new(DynamicImage::ImageRgb8(later_frame).to_rgba8()),
        ];
        GifEncoder::new(file).encode_frames(frames).unwrap();
        path
    }
}
