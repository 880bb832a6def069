use log::warn;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::log_file_error;
use crate::types::ImageFormat;

/// Discover decodable images in the provided directories
///
/// Paths are returned sorted so repeated scans report groups in the same order.
pub fn discover_images<P: AsRef<Path>>(directories: &[P], config: &Config) -> Result<Vec<PathBuf>> {
    let mut image_files = Vec::new();

    for directory in directories {
        image_files.extend(discover_images_in_directory(directory.as_ref(), config)?);
    }

    image_files.sort();
    image_files.dedup();
    Ok(image_files)
}

/// Discover images in a single directory
fn discover_images_in_directory(directory: &Path, config: &Config) -> Result<Vec<PathBuf>> {
    if !directory.exists() {
        return Err(Error::FileNotFound(directory.to_path_buf()));
    }

    let max_depth = config.max_depth.unwrap_or(usize::MAX);

    let mut image_files = Vec::new();

    for entry in WalkDir::new(directory).max_depth(max_depth) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                // Log error but continue with other files
                match e.path() {
                    Some(path) => log_file_error(path, "walk directory", &e),
                    None => warn!("Skipping unreadable directory entry: {}", e),
                }
                continue;
            }
        };

        if entry.file_type().is_file() && is_image_path(entry.path()) {
            image_files.push(entry.into_path());
        }
    }

    Ok(image_files)
}

/// Get image format from file extension
fn get_image_format(path: &Path) -> Option<ImageFormat> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(ImageFormat::from_extension)
}

/// Returns if the given path has a supported image extension
pub fn is_image_path(path: &Path) -> bool {
    match get_image_format(path) {
        Some(format) => format.is_supported(),
        None => false,
    }
}

// -- Tests --
