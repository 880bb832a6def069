/// Demonstrates discovering, hashing and grouping the images in a directory.
///
/// Usage: cargo run --example scan_directory -- <DIR> [THRESHOLD]
use std::path::PathBuf;

use phash_core::discovery::discover_images;
use phash_core::logging;
use phash_core::processing::{find_duplicates, fingerprint_files};
use phash_core::{Config, PHashCalculator, Result};

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let Some(directory) = args.next().map(PathBuf::from) else {
        eprintln!("Usage: scan_directory <DIR> [THRESHOLD]");
        std::process::exit(2);
    };

    let config = Config {
        similarity_threshold: args.next().and_then(|t| t.parse().ok()).unwrap_or(5),
        ..Config::default()
    };
    config.validate()?;

    if let Err(e) = logging::init_logger("logs", config.log_level.to_level_filter()) {
        eprintln!("Failed to initialise logging: {}", e);
    }

    let paths = discover_images(&[&directory], &config)?;
    println!("Found {} images in {}", paths.len(), directory.display());

    let calculator = PHashCalculator::with_config(&config);
    let results = fingerprint_files(&calculator, &paths, &config)?;

    for result in &results {
        match result.fingerprint {
            Some(fingerprint) => println!("{}  {}", fingerprint, result.path.display()),
            None => println!("{:16}  {}", "-", result.path.display()),
        }
    }

    let groups = find_duplicates(&results, config.similarity_threshold);
    println!("\n{} duplicate groups", groups.len());
    for group in &groups {
        println!("max distance {}:", group.max_distance);
        for member in &group.members {
            println!("  {}", member.path.display());
        }
    }

    Ok(())
}
