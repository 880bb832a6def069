//! Parallel fingerprinting of many files and near-duplicate grouping.

use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rayon::prelude::*;
use std::path::PathBuf;
use std::time::Instant;

use super::HashCalculator;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::types::{DuplicateGroup, FingerprintResult};

/// Fingerprint many files in parallel
///
/// Results come back in input order. Files that cannot be decoded are reported with
/// `fingerprint: None` rather than failing the batch.
pub fn fingerprint_files<C: HashCalculator + Sync + ?Sized>(
    calculator: &C,
    paths: &[PathBuf],
    config: &Config,
) -> Result<Vec<FingerprintResult>> {
    let start_time = Instant::now();

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()
        .map_err(|e| Error::Configuration(format!("Failed to build thread pool: {}", e)))?;

    let progress_bar = if config.show_progress {
        ProgressBar::new(paths.len() as u64)
    } else {
        ProgressBar::hidden()
    };
    progress_bar.set_style(
        ProgressStyle::with_template("[{eta}] {bar:40.cyan/blue} {pos}/{len} ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-"),
    );
    progress_bar.set_message("Computing image hashes...");

    let results: Vec<FingerprintResult> = pool.install(|| {
        paths
            .par_iter()
            .map(|path| {
                let fingerprint = calculator.calculate_hash(path);
                progress_bar.inc(1);
                FingerprintResult {
                    path: path.clone(),
                    fingerprint,
                }
            })
            .collect()
    });

    let failures = results.iter().filter(|r| r.fingerprint.is_none()).count();
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    let ips = if elapsed_secs > 0.0 {
        results.len() as f64 / elapsed_secs
    } else {
        0.0
    };

    progress_bar.finish_with_message(format!("Completed! Processed at {:.1} images/sec", ips));
    info!(
        "Fingerprinted {} images ({} failed) in {:.2}s",
        results.len(),
        failures,
        elapsed_secs
    );

    Ok(results)
}

/// Group near-duplicate images
///
/// Each group starts at the first ungrouped image (in input order) and collects every later
/// ungrouped image within `threshold` of it. Singletons and failed files are left out.
pub fn find_duplicates(results: &[FingerprintResult], threshold: u32) -> Vec<DuplicateGroup> {
    let mut grouped = vec![false; results.len()];
    let mut groups = Vec::new();

    for (i, reference) in results.iter().enumerate() {
        let reference_hash = match reference.fingerprint {
            Some(hash) if !grouped[i] => hash,
            _ => continue,
        };

        let mut members = vec![reference.clone()];
        let mut max_distance = 0;

        for (j, candidate) in results.iter().enumerate().skip(i + 1) {
            if grouped[j] {
                continue;
            }
            if let Some(hash) = candidate.fingerprint {
                let distance = reference_hash.distance(&hash);
                if distance <= threshold {
                    grouped[j] = true;
                    max_distance = max_distance.max(distance);
                    members.push(candidate.clone());
                }
            }
        }

        if members.len() > 1 {
            grouped[i] = true;
            groups.push(DuplicateGroup {
                members,
                max_distance,
            });
        }
    }

    groups
}
