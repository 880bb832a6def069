use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use log::{info, warn};
use phash_core::discovery::discover_images;
use phash_core::processing::{find_duplicates, fingerprint_files};
use phash_core::{compare, Config, LogLevel, PHashCalculator};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "phash")]
#[command(about = "Compute and compare perceptual image hashes")]
#[command(version)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Write a rolling log file into this directory instead of logging to stderr
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the fingerprint of each image
    Hash {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Print fingerprints as signed 64-bit integers instead of hex
        #[arg(long)]
        signed: bool,

        /// Upscale and smooth images narrower than this before hashing
        #[arg(long, default_value_t = 0)]
        min_width: u32,
    },

    /// Print the Hamming distance between two images
    Compare {
        first: PathBuf,
        second: PathBuf,

        /// Largest distance still reported as similar
        #[arg(short, long, default_value_t = 5)]
        threshold: u32,
    },

    /// Scan directories for near-duplicate images
    Scan {
        /// Directories to scan
        #[arg(required = true)]
        directories: Vec<PathBuf>,

        /// Largest distance still grouped as a duplicate
        #[arg(short, long)]
        threshold: Option<u32>,

        /// Maximum directory depth
        #[arg(long)]
        max_depth: Option<usize>,

        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Generate default configuration file
    GenerateConfig {
        /// Path to save configuration file
        #[arg(default_value = "phash.json")]
        path: PathBuf,
    },
}

/// `-v` flags win; without them the configuration file decides
fn log_level(verbose: u8, config: Option<&Config>) -> LogLevel {
    match verbose {
        0 => config.map_or(LogLevel::Info, |c| c.log_level),
        1 => LogLevel::Debug,
        _ => LogLevel::Trace,
    }
}

fn init_logging(level: LogLevel, log_dir: Option<&PathBuf>) -> anyhow::Result<()> {
    let level = level.to_level_filter();

    match log_dir {
        Some(dir) => phash_core::logging::init_logger(&dir.to_string_lossy(), level)
            .map_err(|e| anyhow::anyhow!("Failed to initialise file logger: {}", e)),
        None => {
            env_logger::Builder::new()
                .filter_level(level)
                .parse_env(phash_core::logging::LOG_ENV_VAR)
                .init();
            Ok(())
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Read before logging starts so its level can apply
    let file_config = match &cli.command {
        Commands::Scan {
            config: Some(config_path),
            ..
        } => Some(Config::from_file(config_path)?),
        _ => None,
    };
    init_logging(
        log_level(cli.verbose, file_config.as_ref()),
        cli.log_dir.as_ref(),
    )?;

    match cli.command {
        Commands::Hash {
            files,
            signed,
            min_width,
        } => {
            let config = Config {
                min_width,
                ..Config::default()
            };
            config.validate()?;

            let calculator = PHashCalculator::with_config(&config);
            let mut failed = 0;
            for path in &files {
                match calculator.calculate_hash(path) {
                    Some(fingerprint) if signed => {
                        println!("{}  {}", fingerprint.as_i64(), path.display())
                    }
                    Some(fingerprint) => println!("{}  {}", fingerprint, path.display()),
                    None => {
                        failed += 1;
                        println!("-  {}", path.display());
                    }
                }
            }

            if failed > 0 {
                warn!("{} of {} files could not be hashed", failed, files.len());
                return Ok(ExitCode::FAILURE);
            }
            Ok(ExitCode::SUCCESS)
        }

        Commands::Compare {
            first,
            second,
            threshold,
        } => {
            let calculator = PHashCalculator::new();
            let a = calculator
                .fingerprint_file(&first)
                .with_context(|| format!("Failed to hash {}", first.display()))?;
            let b = calculator
                .fingerprint_file(&second)
                .with_context(|| format!("Failed to hash {}", second.display()))?;

            let distance = compare(Some(a), Some(b))?;
            let verdict = if a.is_similar(&b, threshold) {
                "similar"
            } else {
                "different"
            };
            println!("{}  {}", distance, verdict);
            Ok(ExitCode::SUCCESS)
        }

        Commands::Scan {
            directories,
            threshold,
            max_depth,
            ..
        } => {
            let mut config = file_config.unwrap_or_default();

            if let Some(threshold) = threshold {
                config.similarity_threshold = threshold;
            }
            if max_depth.is_some() {
                config.max_depth = max_depth;
            }
            config.validate()?;

            let paths = discover_images(&directories, &config)?;
            if paths.is_empty() {
                bail!("No images found");
            }
            info!("Found {} images", paths.len());

            let calculator = PHashCalculator::with_config(&config);
            let results = fingerprint_files(&calculator, &paths, &config)?;
            let groups = find_duplicates(&results, config.similarity_threshold);

            for (i, group) in groups.iter().enumerate() {
                println!(
                    "Group {} ({} images, max distance {}):",
                    i + 1,
                    group.members.len(),
                    group.max_distance
                );
                for member in &group.members {
                    println!("  {}", member.path.display());
                }
            }
            info!("Found {} duplicate groups", groups.len());
            Ok(ExitCode::SUCCESS)
        }

        Commands::GenerateConfig { path } => {
            let config = Config::default();
            config.save_to_file(&path)?;
            println!("Configuration file generated at: {}", path.display());
            Ok(ExitCode::SUCCESS)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_overrides_config_level() {
        let config = Config {
            log_level: LogLevel::Warn,
            ..Config::default()
        };

        assert_eq!(log_level(0, Some(&config)), LogLevel::Warn);
        assert_eq!(log_level(0, None), LogLevel::Info);
        assert_eq!(log_level(1, Some(&config)), LogLevel::Debug);
        assert_eq!(log_level(3, None), LogLevel::Trace);
    }

    #[test]
    fn test_scan_accepts_config_path() {
        let cli =
            Cli::try_parse_from(["phash", "scan", "photos", "--config", "phash.json"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Scan {
                config: Some(_),
                ..
            }
        ));
    }
}
