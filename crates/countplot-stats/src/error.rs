//! Error types for countplot-stats

use thiserror::Error;

/// Errors raised by the statistics pipeline
///
/// Every variant describes degenerate input for a single update. Callers are
/// expected to drop the update rather than abort.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    /// A binomial interval was requested for zero trials
    #[error("Binomial interval is undefined for zero trials")]
    ZeroTrials,

    /// A scan point has no samples left to classify
    #[error("No samples to classify after truncation")]
    EmptySamples,

    /// Probability outside [0, 1] or not finite
    #[error("Invalid probability: {0} (must be finite and in [0, 1])")]
    InvalidProbability(f64),

    /// Confidence level outside (0, 1)
    #[error("Invalid confidence level: {0} (must be in (0, 1))")]
    InvalidConfidence(f64),

    /// Dual thresholds that do not form a band
    #[error("Invalid thresholds: low {low} must be below high {high}")]
    InvalidThresholds { low: f64, high: f64 },

    /// Threshold value that is not a finite number
    #[error("Threshold must be finite, got {0}")]
    NonFiniteThreshold(f64),

    /// Fewer than two bin edges
    #[error("Histogram needs at least 2 bin edges, got {0}")]
    TooFewEdges(usize),

    /// Bin edges that are not strictly increasing (or not finite)
    #[error("Bin edges must be finite and strictly increasing (violated at edge {index})")]
    NonIncreasingEdges { index: usize },

    /// Per-point vectors of differing lengths
    #[error("Length mismatch for {what}: expected {expected}, got {actual}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Failure attributed to one scan point
    #[error("Scan point {index}: {source}")]
    Point {
        index: usize,
        #[source]
        source: Box<StatsError>,
    },
}

impl StatsError {
    /// Attach a scan point index to an error
    pub fn at_point(self, index: usize) -> Self {
        StatsError::Point {
            index,
            source: Box::new(self),
        }
    }
}

/// Result type alias for statistics operations
pub type StatsResult<T> = Result<T, StatsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_error_display() {
        let err = StatsError::ZeroTrials.at_point(3);
        let msg = err.to_string();
        assert!(msg.contains("Scan point 3"));
        assert!(msg.contains("zero trials"));
    }

    #[test]
    fn test_edges_error_display() {
        let err = StatsError::NonIncreasingEdges { index: 2 };
        assert!(err.to_string().contains("edge 2"));
    }
}
