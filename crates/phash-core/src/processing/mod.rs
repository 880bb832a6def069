//! # Perceptual Hashing Module
//!
//! DCT-based perceptual hashing ("pHash") for image comparison and similarity detection.
//!
//! ## Overview
//!
//! Perceptual hashing generates "fingerprints" that remain similar for visually similar images,
//! unlike cryptographic hashes where minor changes produce completely different outputs.
//!
//! The pipeline runs strictly forward:
//!
//! 1. [`preprocess`]: optional upscale and smoothing for narrow images, resize to 32×32,
//!    grayscale conversion
//! 2. [`dct`]: 2D DCT-II over the 32×32 working grid
//! 3. [`fingerprint`]: threshold the top-left 8×8 coefficients against their mean
//!    (DC term excluded) and pack 64 bits, most significant first
//!
//! ## Hamming Distance Interpretation
//!
//! - 0-4: Nearly identical images (re-encodes, light compression, small colour shifts)
//! - 5-10: Similar images
//! - >10: Different images
//!
//! ## References
//!
//! - "Looks Like It", Neal Krawetz, hackerfactor.com
//! - <http://phash.org/>

pub mod batch;
pub mod calculator;
pub mod dct;
pub mod fingerprint;
pub mod preprocess;

/// Side length of the grid the DCT runs on
pub const WORKING_SIZE: usize = 32;

/// Side length of the low-frequency block that becomes the fingerprint
pub const SMALLER_SIZE: usize = 8;

pub use batch::{find_duplicates, fingerprint_files};
pub use calculator::{phash_from_file, phash_from_img, HashCalculator, PHashCalculator};
pub use dct::{DctTable, FrequencyGrid};
pub use fingerprint::{compare, distance, extract_fingerprint, Fingerprint};
pub use preprocess::{preprocess, smooth, upscale_dimensions, WorkingGrid};

#[cfg(test)]
mod tests;
