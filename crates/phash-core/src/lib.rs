//! Perceptual image fingerprints.
//!
//! This library computes DCT-based 64-bit perceptual hashes ("pHash") and compares them by
//! Hamming distance:
//! - Image decoding, normalisation and hash generation
//! - Distance and near-duplicate grouping
//! - Directory discovery and parallel batch hashing

// -- Internal Modules --
mod error;

// -- Public Re-exports --
pub use config::*;
pub use error::{Error, Result};
pub use processing::{
    compare, distance, phash_from_file, phash_from_img, Fingerprint, HashCalculator,
    PHashCalculator,
};
pub use types::*;

// -- Public Modules --
pub mod config;
pub mod discovery;
pub mod logging;
pub mod processing;
pub mod types;

// -- Test Modules --
#[cfg(test)]
pub mod test_utils;
