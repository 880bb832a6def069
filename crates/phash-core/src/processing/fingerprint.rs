//! 64-bit fingerprints: extraction from DCT coefficients and Hamming distance.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{FrequencyGrid, SMALLER_SIZE};
use crate::error::{Error, Result};

/// A perceptual hash represented as a 64-bit value
///
/// Bit 63 holds the DC coefficient's comparison, bit 0 the coefficient at `(7, 7)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(pub u64);

impl Fingerprint {
    /// Calculate the Hamming distance between two fingerprints
    pub fn distance(&self, other: &Fingerprint) -> u32 {
        (self.0 ^ other.0).count_ones()
    }

    /// Check if two images are perceptually similar based on a threshold
    pub fn is_similar(&self, other: &Fingerprint, threshold: u32) -> bool {
        self.distance(other) <= threshold
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Same bits read as a two's-complement signed integer
    pub fn as_i64(&self) -> i64 {
        self.0 as i64
    }

    pub fn from_i64(value: i64) -> Self {
        Self(value as u64)
    }
}

impl From<u64> for Fingerprint {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Hamming distance between two fingerprints, always in `0..=64`
pub fn distance(a: Fingerprint, b: Fingerprint) -> u32 {
    a.distance(&b)
}

/// Distance between two possibly-absent fingerprints
///
/// An absent fingerprint means the image could not be hashed; comparing it is an error rather
/// than a comparison against zero.
pub fn compare(a: Option<Fingerprint>, b: Option<Fingerprint>) -> Result<u32> {
    match (a, b) {
        (Some(a), Some(b)) => Ok(a.distance(&b)),
        _ => Err(Error::MissingFingerprint),
    }
}

/// Reduce the frequency grid to a 64-bit fingerprint
pub fn extract_fingerprint(freq: &FrequencyGrid) -> Fingerprint {
    // Mean of the low-frequency block without the DC term, which mostly tracks brightness
    let mut total = 0.0;
    for u in 0..SMALLER_SIZE {
        for v in 0..SMALLER_SIZE {
            total += freq.get(u, v);
        }
    }
    total -= freq.get(0, 0);
    let avg = total / ((SMALLER_SIZE * SMALLER_SIZE) - 1) as f64;

    // The DC term still gets a bit
    let mut hash: u64 = 0;
    for u in 0..SMALLER_SIZE {
        for v in 0..SMALLER_SIZE {
            hash = (hash << 1) | u64::from(freq.get(u, v) > avg);
        }
    }

    Fingerprint(hash)
}
