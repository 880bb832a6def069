use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest `min_width` accepted by [`Config::validate`]
pub const MAX_MIN_WIDTH: u32 = 4096;

/// Which DCT implementation the calculator runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TransformKind {
    /// Literal O(N^4) double sum, reproduces reference fingerprints bit for bit
    #[default]
    Direct,

    /// Separable fast DCT-II, equal to `Direct` within floating-point tolerance
    Fast,
}

/// Log level for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Convert to the `log` crate's filter
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Configuration for fingerprint computation and batch scanning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Images narrower than this are upscaled and smoothed first (0 = never)
    pub min_width: u32,

    /// DCT implementation
    pub transform: TransformKind,

    /// Maximum Hamming distance at which two images count as near-duplicates (0-64)
    pub similarity_threshold: u32,

    /// Number of threads to use for batch processing (0 = auto)
    pub threads: usize,

    /// Maximum directory depth for scanning
    pub max_depth: Option<usize>,

    /// Whether to draw a progress bar during batch processing
    pub show_progress: bool,

    /// Log level
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_width: 0,
            transform: TransformKind::Direct,
            similarity_threshold: 5,
            threads: 0, // Auto
            max_depth: None,
            show_progress: true,
            log_level: LogLevel::Info,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())
            .map_err(|e| Error::Configuration(format!("Failed to open config file: {}", e)))?;

        let config: Config = serde_json::from_reader(file)
            .map_err(|e| Error::Configuration(format!("Failed to parse config file: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path.as_ref())
            .map_err(|e| Error::Configuration(format!("Failed to create config file: {}", e)))?;

        serde_json::to_writer_pretty(file, self)
            .map_err(|e| Error::Configuration(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        // A 64-bit fingerprint can differ in at most 64 bits
        if self.similarity_threshold > 64 {
            return Err(Error::Configuration(
                "Similarity threshold must be between 0 and 64".to_string(),
            ));
        }

        if self.min_width > MAX_MIN_WIDTH {
            return Err(Error::Configuration(format!(
                "Minimum width must not exceed {}",
                MAX_MIN_WIDTH
            )));
        }

        Ok(())
    }
}
