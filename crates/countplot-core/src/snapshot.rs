//! Scan snapshots
//!
//! A snapshot is everything the views need for one dataset tick: the x
//! values, per-point band probabilities with error bars, per-point histograms
//! and the raw samples behind them. Building one is a two-step process:
//!
//! 1. [`UpdateInputs::gather`] reads and validates every dataset the
//!    configuration names, failing before any computation is done
//! 2. [`ScanSnapshot::build`] runs the classifier and the binner
//!
//! Either step failing leaves the caller's previous snapshot untouched.

use crate::config::{AppletConfig, BinConfig, ThresholdConfig, ThresholdSource};
use crate::dataset::{self, DatasetSource};
use crate::error::{UpdateError, UpdateResult};
use countplot_selection::PointSet;
use countplot_stats::{
    band_series, classify, histogram_points, Band, BinEdges, PointEstimate, ProbabilityEstimate,
    Thresholds,
};
use serde::{Deserialize, Serialize};

/// Validated inputs of one update
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateInputs {
    pub x: Vec<f64>,
    pub points: Vec<Vec<u32>>,
    pub trial_counts: Option<Vec<u64>>,
    pub thresholds: Thresholds,
    pub edges: BinEdges,
}

fn threshold_value<S: DatasetSource + ?Sized>(
    source: &S,
    threshold: &ThresholdSource,
) -> UpdateResult<f64> {
    match threshold {
        ThresholdSource::Fixed(value) => Ok(*value),
        ThresholdSource::Dataset(name) => dataset::scalar(source, name),
    }
}

fn check_len(name: &str, expected: usize, actual: usize) -> UpdateResult<()> {
    if expected != actual {
        return Err(UpdateError::LengthMismatch {
            name: name.to_string(),
            expected,
            actual,
        });
    }
    Ok(())
}

impl UpdateInputs {
    /// Read every dataset named by `config` and check their consistency
    pub fn gather<S: DatasetSource + ?Sized>(
        config: &AppletConfig,
        source: &S,
    ) -> UpdateResult<Self> {
        let points = dataset::count_rows(source, &config.counts)?;
        if points.is_empty() {
            return Err(UpdateError::EmptyScan);
        }

        let x = match &config.x {
            Some(name) => {
                let x = dataset::array(source, name)?.to_vec();
                check_len(name, points.len(), x.len())?;
                x
            }
            None => (0..points.len()).map(|i| i as f64).collect(),
        };

        let trial_counts = match &config.trial_counts {
            Some(name) => {
                let trials = dataset::count_array(source, name)?;
                check_len(name, points.len(), trials.len())?;
                Some(trials)
            }
            None => None,
        };

        let thresholds = match &config.thresholds {
            ThresholdConfig::Single(threshold) => {
                Thresholds::Single(threshold_value(source, threshold)?)
            }
            ThresholdConfig::Dual { low, high } => Thresholds::Dual {
                low: threshold_value(source, low)?,
                high: threshold_value(source, high)?,
            },
        };
        thresholds.validate()?;

        let edges = match &config.bins {
            BinConfig::Dataset(name) => BinEdges::new(dataset::array(source, name)?.to_vec())?,
            BinConfig::Range { count } => BinEdges::range(*count)?,
        };

        Ok(Self {
            x,
            points,
            trial_counts,
            thresholds,
            edges,
        })
    }
}

/// Derived statistics and raw data of one scan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanSnapshot {
    x: Vec<f64>,
    points: Vec<Vec<u32>>,
    estimates: Vec<PointEstimate>,
    histograms: Vec<Vec<u64>>,
    edges: BinEdges,
    thresholds: Thresholds,
}

impl ScanSnapshot {
    /// Classify and histogram validated inputs
    pub fn build(inputs: UpdateInputs, confidence: f64) -> UpdateResult<Self> {
        let UpdateInputs {
            x,
            points,
            trial_counts,
            thresholds,
            edges,
        } = inputs;

        let estimates = classify(&points, &thresholds, trial_counts.as_deref(), confidence)?;
        let histograms = histogram_points(&points, &edges);

        Ok(Self {
            x,
            points,
            estimates,
            histograms,
            edges,
            thresholds,
        })
    }

    /// Gather and build in one go
    pub fn from_source<S: DatasetSource + ?Sized>(
        config: &AppletConfig,
        source: &S,
    ) -> UpdateResult<Self> {
        Self::build(UpdateInputs::gather(config, source)?, config.confidence)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn points(&self) -> &[Vec<u32>] {
        &self.points
    }

    pub fn estimates(&self) -> &[PointEstimate] {
        &self.estimates
    }

    pub fn histograms(&self) -> &[Vec<u64>] {
        &self.histograms
    }

    pub fn edges(&self) -> &BinEdges {
        &self.edges
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Band drawn as the clickable scatter
    pub fn primary_band(&self) -> Band {
        Band::Above
    }

    /// Estimates of one band across all points
    pub fn series(&self, band: Band) -> Option<Vec<ProbabilityEstimate>> {
        band_series(&self.estimates, band)
    }

    /// Position of a point on the primary series
    pub fn position(&self, index: usize) -> Option<(f64, f64)> {
        let x = *self.x.get(index)?;
        let y = self.estimates.get(index)?.band(self.primary_band())?.p;
        Some((x, y))
    }
}

impl PointSet for ScanSnapshot {
    fn num_points(&self) -> usize {
        self.len()
    }

    fn samples(&self, index: usize) -> Option<&[u32]> {
        self.points.get(index).map(Vec::as_slice)
    }

    fn histogram(&self, index: usize) -> Option<&[u64]> {
        self.histograms.get(index).map(Vec::as_slice)
    }
}
