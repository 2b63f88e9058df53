//! Error types for countplot-core
//!
//! Two families of failure matter here:
//! - Update errors: a dataset tick could not be turned into a snapshot.
//!   These are always recoverable; the applet keeps its previous state.
//! - Configuration errors: the applet cannot be constructed at all.

use countplot_selection::SelectionError;
use countplot_stats::StatsError;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for countplot operations
#[derive(Error, Debug)]
pub enum CountplotError {
    /// A dataset update was rejected
    #[error("Update skipped: {0}")]
    Update(#[from] UpdateError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Selection request rejected
    #[error("Selection error: {0}")]
    Selection(#[from] SelectionError),

    /// Unknown configuration file format
    #[error("Unsupported configuration format: {path}")]
    UnsupportedFormat { path: PathBuf },

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reasons a dataset update is dropped
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UpdateError {
    /// Required dataset absent from the tick
    #[error("Dataset '{name}' not available")]
    MissingDataset { name: String },

    /// Dataset present but flagged invalid by the source
    #[error("Dataset '{name}' is flagged invalid")]
    InvalidDataset { name: String },

    /// Dataset has the wrong shape
    #[error("Dataset '{name}' has wrong shape: expected {expected}")]
    TypeMismatch { name: String, expected: &'static str },

    /// Dataset holds values outside their domain
    #[error("Dataset '{name}' holds an invalid value: {message}")]
    InvalidValue { name: String, message: String },

    /// Per-point datasets disagree on the number of points
    #[error("Dataset '{name}' has {actual} entries, expected {expected}")]
    LengthMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    /// Counts dataset has no scan points
    #[error("Scan has no points")]
    EmptyScan,

    /// Degenerate numeric input
    #[error("Statistics failed: {0}")]
    Statistics(#[from] StatsError),
}

/// Configuration validation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A dataset name is empty
    #[error("Dataset name for '{0}' must not be empty")]
    EmptyName(&'static str),

    /// Dual thresholds configured without a trial-count dataset
    #[error("Dual thresholds require a trial-count dataset")]
    MissingTrialCounts,

    /// Fixed threshold is not a finite number
    #[error("Threshold must be finite, got {0}")]
    NonFiniteThreshold(f64),

    /// Fixed dual thresholds do not form a band
    #[error("Low threshold {low} must be below high threshold {high}")]
    InvalidThresholds { low: f64, high: f64 },

    /// Default histogram range with fewer than two edges
    #[error("Histogram range needs at least 2 edges, got {0}")]
    TooFewBins(usize),

    /// Confidence level outside (0, 1)
    #[error("Confidence must be in (0, 1), got {0}")]
    InvalidConfidence(f64),
}

/// Result type alias for countplot operations
pub type CountplotResult<T> = Result<T, CountplotError>;

/// Result type alias for dataset updates
pub type UpdateResult<T> = Result<T, UpdateError>;

/// Result type alias for configuration validation
pub type ConfigResult<T> = Result<T, ConfigError>;
