use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::processing::Fingerprint;

/// Supported image formats
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
    Webp,
    Other(String),
}

impl ImageFormat {
    /// Determine format from file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "jpg" | "jpeg" => Self::Jpeg,
            "png" => Self::Png,
            "gif" => Self::Gif,
            "webp" => Self::Webp,
            other => Self::Other(other.to_string()),
        }
    }

    /// Check if format can be decoded
    pub fn is_supported(&self) -> bool {
        match self {
            Self::Jpeg | Self::Png | Self::Gif | Self::Webp => true,
            Self::Other(_) => false,
        }
    }
}

/// Fingerprint of a single file, `None` when the file could not be decoded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FingerprintResult {
    /// Path to the image file
    pub path: PathBuf,

    /// Perceptual fingerprint of the first frame
    pub fingerprint: Option<Fingerprint>,
}

/// Images whose fingerprints are within the similarity threshold of the first member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateGroup {
    /// Group members, first one is the reference image
    pub members: Vec<FingerprintResult>,

    /// Largest distance between the reference and any other member
    pub max_distance: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ImageFormat::from_extension("JPG"), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_extension("jpeg"), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_extension("Png"), ImageFormat::Png);
        assert_eq!(ImageFormat::from_extension("gif"), ImageFormat::Gif);
        assert_eq!(ImageFormat::from_extension("webp"), ImageFormat::Webp);
        assert_eq!(
            ImageFormat::from_extension("txt"),
            ImageFormat::Other("txt".to_string())
        );
    }

    #[test]
    fn test_format_support() {
        assert!(ImageFormat::Gif.is_supported());
        assert!(!ImageFormat::Other("heic".to_string()).is_supported());
    }
}
