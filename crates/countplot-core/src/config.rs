//! Applet configuration
//!
//! Names the datasets an applet reads and how thresholds and histogram bins
//! are obtained. Configurations load from JSON or TOML:
//!
//! ```toml
//! counts = "data.counts"
//! trial_counts = "data.shots"
//! confidence = 0.68
//!
//! [thresholds.dual]
//! low = { fixed = 2.0 }
//! high = { dataset = "thresholds.high" }
//!
//! [bins.range]
//! count = 250
//! ```

use crate::error::{ConfigError, ConfigResult, CountplotError, CountplotResult};
use countplot_stats::DEFAULT_CONFIDENCE;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Threshold dataset read by the single-ion preset
pub const SINGLE_ION_THRESHOLD_DATASET: &str = "singleIon.threshold";

/// Default number of histogram edges for the single-ion preset
pub const DEFAULT_BIN_EDGES: usize = 300;

/// Default number of histogram edges for the two-ion preset
pub const TWO_ION_MAX_HIST: usize = 250;

/// Where a threshold value comes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdSource {
    /// Constant value
    Fixed(f64),
    /// Scalar dataset read on every update
    Dataset(String),
}

/// Threshold shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdConfig {
    /// Two-class classification
    Single(ThresholdSource),
    /// Three-class classification
    Dual {
        low: ThresholdSource,
        high: ThresholdSource,
    },
}

/// Histogram bin specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinConfig {
    /// Explicit edges read from a dataset
    Dataset(String),
    /// Unit-width edges `0, 1, ..., count - 1`
    Range { count: usize },
}

impl Default for BinConfig {
    fn default() -> Self {
        BinConfig::Range {
            count: DEFAULT_BIN_EDGES,
        }
    }
}

fn default_confidence() -> f64 {
    DEFAULT_CONFIDENCE
}

/// Configuration of a threshold-histogram applet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppletConfig {
    /// 2D dataset of counts, one row per scan point
    pub counts: String,
    /// Abscissas; the point index is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<String>,
    /// Trials per scan point
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trial_counts: Option<String>,
    /// Confidence level of the error bars
    #[serde(default = "default_confidence")]
    pub confidence: f64,
    pub thresholds: ThresholdConfig,
    #[serde(default)]
    pub bins: BinConfig,
}

impl AppletConfig {
    /// Single threshold read from `singleIon.threshold`, 300 unit bin edges
    pub fn single_ion(counts: impl Into<String>) -> Self {
        Self {
            counts: counts.into(),
            x: None,
            trial_counts: None,
            confidence: DEFAULT_CONFIDENCE,
            thresholds: ThresholdConfig::Single(ThresholdSource::Dataset(
                SINGLE_ION_THRESHOLD_DATASET.to_string(),
            )),
            bins: BinConfig::default(),
        }
    }

    /// Low/high thresholds with per-point trial counts, 250 unit bin edges
    pub fn two_ion(
        counts: impl Into<String>,
        trial_counts: impl Into<String>,
        low: ThresholdSource,
        high: ThresholdSource,
    ) -> Self {
        Self {
            counts: counts.into(),
            x: None,
            trial_counts: Some(trial_counts.into()),
            confidence: DEFAULT_CONFIDENCE,
            thresholds: ThresholdConfig::Dual { low, high },
            bins: BinConfig::Range {
                count: TWO_ION_MAX_HIST,
            },
        }
    }

    /// Read abscissas from a dataset
    pub fn with_x(mut self, x: impl Into<String>) -> Self {
        self.x = Some(x.into());
        self
    }

    /// Normalise by per-point trial counts
    pub fn with_trial_counts(mut self, trial_counts: impl Into<String>) -> Self {
        self.trial_counts = Some(trial_counts.into());
        self
    }

    /// Use a single fixed threshold
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.thresholds = ThresholdConfig::Single(ThresholdSource::Fixed(threshold));
        self
    }

    pub fn with_bins(mut self, bins: BinConfig) -> Self {
        self.bins = bins;
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    /// Names of every dataset this configuration reads
    pub fn dataset_names(&self) -> Vec<&str> {
        let mut names = vec![self.counts.as_str()];
        names.extend(self.x.as_deref());
        names.extend(self.trial_counts.as_deref());
        let sources: Vec<&ThresholdSource> = match &self.thresholds {
            ThresholdConfig::Single(source) => vec![source],
            ThresholdConfig::Dual { low, high } => vec![low, high],
        };
        for source in sources {
            if let ThresholdSource::Dataset(name) = source {
                names.push(name);
            }
        }
        if let BinConfig::Dataset(name) = &self.bins {
            names.push(name);
        }
        names
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json_str)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load and validate a `.toml` or `.json` configuration file
    pub fn from_path(path: impl AsRef<Path>) -> CountplotResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml(&content)?,
            Some("json") => Self::from_json(&content)?,
            _ => {
                return Err(CountplotError::UnsupportedFormat {
                    path: path.to_path_buf(),
                })
            }
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.counts.is_empty() {
            return Err(ConfigError::EmptyName("counts"));
        }
        if self.x.as_deref() == Some("") {
            return Err(ConfigError::EmptyName("x"));
        }
        if self.trial_counts.as_deref() == Some("") {
            return Err(ConfigError::EmptyName("trial_counts"));
        }

        if !self.confidence.is_finite() || self.confidence <= 0.0 || self.confidence >= 1.0 {
            return Err(ConfigError::InvalidConfidence(self.confidence));
        }

        match &self.thresholds {
            ThresholdConfig::Single(source) => validate_source(source)?,
            ThresholdConfig::Dual { low, high } => {
                if self.trial_counts.is_none() {
                    return Err(ConfigError::MissingTrialCounts);
                }
                validate_source(low)?;
                validate_source(high)?;
                if let (ThresholdSource::Fixed(low), ThresholdSource::Fixed(high)) = (low, high) {
                    if low >= high {
                        return Err(ConfigError::InvalidThresholds {
                            low: *low,
                            high: *high,
                        });
                    }
                }
            }
        }

        match &self.bins {
            BinConfig::Dataset(name) if name.is_empty() => Err(ConfigError::EmptyName("bins")),
            BinConfig::Range { count } if *count < 2 => Err(ConfigError::TooFewBins(*count)),
            _ => Ok(()),
        }
    }
}

fn validate_source(source: &ThresholdSource) -> ConfigResult<()> {
    match source {
        ThresholdSource::Fixed(t) if !t.is_finite() => Err(ConfigError::NonFiniteThreshold(*t)),
        ThresholdSource::Dataset(name) if name.is_empty() => {
            Err(ConfigError::EmptyName("thresholds"))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_presets_are_valid() {
        assert!(AppletConfig::single_ion("counts").validate().is_ok());
        let two_ion = AppletConfig::two_ion(
            "counts",
            "shots",
            ThresholdSource::Fixed(2.0),
            ThresholdSource::Fixed(7.0),
        );
        assert!(two_ion.validate().is_ok());
        assert_eq!(two_ion.bins, BinConfig::Range { count: 250 });
    }

    #[test]
    fn test_single_ion_reads_default_threshold_dataset() {
        let config = AppletConfig::single_ion("counts");
        assert_eq!(
            config.dataset_names(),
            vec!["counts", SINGLE_ION_THRESHOLD_DATASET]
        );

        let config = config.with_threshold(4.0).with_x("scan.x");
        assert_eq!(config.dataset_names(), vec!["counts", "scan.x"]);
    }

    #[test]
    fn test_dual_requires_trial_counts() {
        let mut config = AppletConfig::two_ion(
            "counts",
            "shots",
            ThresholdSource::Fixed(2.0),
            ThresholdSource::Fixed(7.0),
        );
        config.trial_counts = None;
        assert_eq!(config.validate(), Err(ConfigError::MissingTrialCounts));
    }

    #[test]
    fn test_inverted_fixed_thresholds() {
        let config = AppletConfig::two_ion(
            "counts",
            "shots",
            ThresholdSource::Fixed(7.0),
            ThresholdSource::Fixed(2.0),
        );
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidThresholds { .. })
        ));
    }

    #[test]
    fn test_invalid_values() {
        let config = AppletConfig::single_ion("");
        assert_eq!(config.validate(), Err(ConfigError::EmptyName("counts")));

        let config = AppletConfig::single_ion("counts").with_confidence(1.5);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidConfidence(_))
        ));

        let config = AppletConfig::single_ion("counts").with_bins(BinConfig::Range { count: 1 });
        assert_eq!(config.validate(), Err(ConfigError::TooFewBins(1)));

        let config = AppletConfig::single_ion("counts").with_threshold(f64::INFINITY);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFiniteThreshold(_))
        ));
    }

    #[test]
    fn test_toml_parsing() {
        let toml_str = r#"
counts = "data.counts"
trial_counts = "data.shots"

[thresholds.dual]
low = { fixed = 2.0 }
high = { dataset = "thresholds.high" }

[bins.range]
count = 250
"#;
        let config = AppletConfig::from_toml(toml_str).unwrap();
        assert_eq!(config.counts, "data.counts");
        assert_eq!(config.confidence, DEFAULT_CONFIDENCE);
        assert_eq!(
            config.thresholds,
            ThresholdConfig::Dual {
                low: ThresholdSource::Fixed(2.0),
                high: ThresholdSource::Dataset("thresholds.high".to_string()),
            }
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_json_serialization() {
        let config = AppletConfig::single_ion("counts").with_x("scan.x");
        let json = config.to_json().unwrap();
        let parsed = AppletConfig::from_json(&json).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_json_defaults() {
        let json = r#"{"counts": "c", "thresholds": {"single": {"fixed": 3.0}}}"#;
        let config = AppletConfig::from_json(json).unwrap();
        assert_eq!(config.bins, BinConfig::Range { count: 300 });
        assert!(config.x.is_none());
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"counts": "c", "thresholds": {{"single": {{"fixed": 3.0}}}}}}"#
        )
        .unwrap();
        let config = AppletConfig::from_path(file.path()).unwrap();
        assert_eq!(config.counts, "c");

        let file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        assert!(matches!(
            AppletConfig::from_path(file.path()),
            Err(CountplotError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_from_path_validates() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(
            file,
            "counts = \"c\"\n\n[thresholds.single]\nfixed = 3.0\n\n[bins.range]\ncount = 0\n"
        )
        .unwrap();
        assert!(matches!(
            AppletConfig::from_path(file.path()),
            Err(CountplotError::Config(ConfigError::TooFewBins(0)))
        ));
    }
}
