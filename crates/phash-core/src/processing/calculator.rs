//! Decoder → preprocessor → transform → extractor, behind a construct-once calculator.

use image::DynamicImage;
use log::{debug, error};
use once_cell::sync::Lazy;
use std::io::{Cursor, Read};
use std::path::Path;
use std::time::Instant;

use super::dct::{DctTable, FastDct, FrequencyGrid};
use super::fingerprint::{extract_fingerprint, Fingerprint};
use super::preprocess::{preprocess, WorkingGrid};
use crate::config::{Config, TransformKind};
use crate::error::{Error, Result};
use crate::logging::log_hash_error;

// Shared calculator behind the free functions
static DEFAULT_CALCULATOR: Lazy<PHashCalculator> = Lazy::new(PHashCalculator::new);

/// Anything that can turn an image file into a fingerprint
///
/// Failures are reported as `None`; implementations log the cause.
pub trait HashCalculator {
    fn calculate_hash(&self, path: &Path) -> Option<Fingerprint>;
}

#[derive(Debug, Clone)]
enum Transform {
    Direct,
    Fast(FastDct),
}

/// Perceptual hash calculator
///
/// Holds only read-only tables, so one instance can be shared across threads.
#[derive(Debug, Clone)]
pub struct PHashCalculator {
    min_width: u32,
    table: DctTable,
    transform: Transform,
}

impl PHashCalculator {
    /// Calculator with the default configuration (direct DCT, no upscaling)
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    pub fn with_config(config: &Config) -> Self {
        let transform = match config.transform {
            TransformKind::Direct => Transform::Direct,
            TransformKind::Fast => Transform::Fast(FastDct::new()),
        };

        Self {
            min_width: config.min_width,
            table: DctTable::new(),
            transform,
        }
    }

    /// Upscale and smooth images narrower than `min_width` before hashing (0 disables)
    pub fn with_min_width(mut self, min_width: u32) -> Self {
        self.min_width = min_width;
        self
    }

    pub fn min_width(&self) -> u32 {
        self.min_width
    }

    /// Calculate the fingerprint of an image file
    ///
    /// Returns `None` if the file is missing or cannot be decoded; the failure is logged.
    pub fn calculate_hash<P: AsRef<Path>>(&self, path: P) -> Option<Fingerprint> {
        let path = path.as_ref();
        let start = Instant::now();

        match self.fingerprint_file(path) {
            Ok(fingerprint) => {
                debug!(
                    "Hash calculated successfully - Path: {}, Hash: {}, Elapsed: {:.2?}",
                    path.display(),
                    fingerprint,
                    start.elapsed()
                );
                Some(fingerprint)
            }
            Err(e) => {
                log_hash_error(path, &e);
                None
            }
        }
    }

    /// Calculate the fingerprint of an encoded image read from a stream
    ///
    /// The stream is read to its end and need not be seekable. Returns `None` if it cannot
    /// be read or decoded; the failure is logged.
    pub fn calculate_hash_from_reader<R: Read>(&self, reader: R) -> Option<Fingerprint> {
        let start = Instant::now();

        match self.fingerprint_reader(reader) {
            Ok(fingerprint) => {
                debug!(
                    "Hash calculated successfully - Stream, Hash: {}, Elapsed: {:.2?}",
                    fingerprint,
                    start.elapsed()
                );
                Some(fingerprint)
            }
            Err(e) => {
                error!("Hash computation failed - Stream, Error: {}", e);
                None
            }
        }
    }

    /// Decode and fingerprint an image file
    pub fn fingerprint_file<P: AsRef<Path>>(&self, path: P) -> Result<Fingerprint> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }

        // Content sniffing wins over the extension
        let reader = image::io::Reader::open(path)?.with_guessed_format()?;
        if reader.format().is_none() {
            return Err(Error::UnsupportedFormat(path.display().to_string()));
        }

        let img = reader.decode()?;
        self.fingerprint_image(&img)
    }

    /// Decode and fingerprint an encoded image from a stream positioned at its start
    pub fn fingerprint_reader<R: Read>(&self, mut reader: R) -> Result<Fingerprint> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        self.fingerprint_bytes(&bytes)
    }

    /// Decode and fingerprint an encoded image held in memory
    pub fn fingerprint_bytes(&self, bytes: &[u8]) -> Result<Fingerprint> {
        let reader = image::io::Reader::new(Cursor::new(bytes)).with_guessed_format()?;
        if reader.format().is_none() {
            return Err(Error::UnsupportedFormat("unrecognised stream".to_string()));
        }

        let img = reader.decode()?;
        self.fingerprint_image(&img)
    }

    /// Fingerprint an already decoded image
    ///
    /// Fails only for images with a zero dimension.
    pub fn fingerprint_image(&self, img: &DynamicImage) -> Result<Fingerprint> {
        let grid = preprocess(img, self.min_width)?;
        Ok(self.fingerprint_grid(&grid))
    }

    /// Fingerprint a preprocessed working grid
    pub fn fingerprint_grid(&self, grid: &WorkingGrid) -> Fingerprint {
        extract_fingerprint(&self.transform(grid))
    }

    /// Run the configured DCT over a working grid
    pub fn transform(&self, grid: &WorkingGrid) -> FrequencyGrid {
        match &self.transform {
            Transform::Direct => self.table.apply(grid),
            Transform::Fast(fast) => fast.apply(grid, &self.table),
        }
    }
}

impl HashCalculator for PHashCalculator {
    fn calculate_hash(&self, path: &Path) -> Option<Fingerprint> {
        PHashCalculator::calculate_hash(self, path)
    }
}

impl Default for PHashCalculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Calculate a perceptual hash from an image file with the default calculator
pub fn phash_from_file<P: AsRef<Path>>(path: P) -> Result<Fingerprint> {
    DEFAULT_CALCULATOR.fingerprint_file(path)
}

/// Calculate a perceptual hash from an image in memory with the default calculator
pub fn phash_from_img(img: &DynamicImage) -> Result<Fingerprint> {
    DEFAULT_CALCULATOR.fingerprint_image(img)
}
