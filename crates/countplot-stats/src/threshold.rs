//! Threshold classification of photon-count samples
//!
//! Each scan point carries a vector of repeated-trial counts. A single
//! threshold splits the counts into two bands (below, at-or-above); a pair
//! of thresholds splits them into three:
//!
//! | band      | single threshold `t` | dual thresholds `(low, high)` |
//! |-----------|----------------------|-------------------------------|
//! | `Below`   | `x < t`              | `x <= low`                    |
//! | `Between` | -                    | `low < x < high`              |
//! | `Above`   | `x >= t`             | `x >= high`                   |
//!
//! When a trial count `N` is supplied for a point only the first `N`
//! samples are counted and every band is divided by `N`, so the band
//! probabilities under-sum when `N` exceeds the number of samples.

use crate::binomial::ProbabilityEstimate;
use crate::error::{StatsError, StatsResult};
use serde::{Deserialize, Serialize};

/// Classification band for a single count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Band {
    Below,
    Between,
    Above,
}

impl Band {
    pub fn name(&self) -> &'static str {
        match self {
            Band::Below => "below",
            Band::Between => "between",
            Band::Above => "above",
        }
    }
}

/// One or two threshold cuts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Thresholds {
    Single(f64),
    Dual { low: f64, high: f64 },
}

impl Thresholds {
    /// Build a checked dual threshold pair
    pub fn dual(low: f64, high: f64) -> StatsResult<Self> {
        let thresholds = Thresholds::Dual { low, high };
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// Check that every cut is finite and that dual cuts form a band
    pub fn validate(&self) -> StatsResult<()> {
        match *self {
            Thresholds::Single(t) if !t.is_finite() => Err(StatsError::NonFiniteThreshold(t)),
            Thresholds::Single(_) => Ok(()),
            Thresholds::Dual { low, high } => {
                if !low.is_finite() {
                    return Err(StatsError::NonFiniteThreshold(low));
                }
                if !high.is_finite() {
                    return Err(StatsError::NonFiniteThreshold(high));
                }
                if low >= high {
                    return Err(StatsError::InvalidThresholds { low, high });
                }
                Ok(())
            }
        }
    }

    /// Band a single count falls in
    pub fn classify(&self, x: u32) -> Band {
        let x = f64::from(x);
        match *self {
            Thresholds::Single(t) => {
                if x >= t {
                    Band::Above
                } else {
                    Band::Below
                }
            }
            Thresholds::Dual { low, high } => {
                if x >= high {
                    Band::Above
                } else if x <= low {
                    Band::Below
                } else {
                    Band::Between
                }
            }
        }
    }

    /// Bands produced by this threshold shape
    pub fn bands(&self) -> &'static [Band] {
        match self {
            Thresholds::Single(_) => &[Band::Below, Band::Above],
            Thresholds::Dual { .. } => &[Band::Below, Band::Between, Band::Above],
        }
    }

    /// Cut values, in ascending order, for drawing marker lines
    pub fn values(&self) -> Vec<f64> {
        match *self {
            Thresholds::Single(t) => vec![t],
            Thresholds::Dual { low, high } => vec![low, high],
        }
    }
}

/// Per-point band probabilities
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointEstimate {
    /// Trial count the probabilities are normalised by
    pub trials: u64,
    pub below: ProbabilityEstimate,
    /// Only present for dual thresholds
    pub between: Option<ProbabilityEstimate>,
    pub above: ProbabilityEstimate,
}

impl PointEstimate {
    pub fn band(&self, band: Band) -> Option<&ProbabilityEstimate> {
        match band {
            Band::Below => Some(&self.below),
            Band::Between => self.between.as_ref(),
            Band::Above => Some(&self.above),
        }
    }
}

/// Classify one scan point
///
/// `trials` overrides the sample vector length as the normalising trial
/// count and truncates the samples to their first `trials` entries.
pub fn classify_point(
    samples: &[u32],
    trials: Option<u64>,
    thresholds: &Thresholds,
    confidence: f64,
) -> StatsResult<PointEstimate> {
    let n = trials.unwrap_or(samples.len() as u64);
    if n == 0 {
        return Err(StatsError::ZeroTrials);
    }
    let kept = usize::try_from(n).map_or(samples.len(), |n| n.min(samples.len()));
    let counted = &samples[..kept];
    if counted.is_empty() {
        return Err(StatsError::EmptySamples);
    }

    let (mut below, mut between, mut above) = (0u64, 0u64, 0u64);
    for &x in counted {
        match thresholds.classify(x) {
            Band::Below => below += 1,
            Band::Between => between += 1,
            Band::Above => above += 1,
        }
    }

    let between = match thresholds {
        Thresholds::Single(_) => None,
        Thresholds::Dual { .. } => Some(ProbabilityEstimate::from_counts(between, n, confidence)?),
    };

    Ok(PointEstimate {
        trials: n,
        below: ProbabilityEstimate::from_counts(below, n, confidence)?,
        between,
        above: ProbabilityEstimate::from_counts(above, n, confidence)?,
    })
}

/// Classify every scan point
///
/// `trial_counts`, when given, must have one entry per point. The first
/// failing point aborts the whole classification.
pub fn classify(
    points: &[Vec<u32>],
    thresholds: &Thresholds,
    trial_counts: Option<&[u64]>,
    confidence: f64,
) -> StatsResult<Vec<PointEstimate>> {
    thresholds.validate()?;
    if let Some(trials) = trial_counts {
        if trials.len() != points.len() {
            return Err(StatsError::LengthMismatch {
                what: "trial counts",
                expected: points.len(),
                actual: trials.len(),
            });
        }
    }

    points
        .iter()
        .enumerate()
        .map(|(i, samples)| {
            let trials = trial_counts.map(|t| t[i]);
            classify_point(samples, trials, thresholds, confidence).map_err(|e| e.at_point(i))
        })
        .collect()
}

/// Two-class probabilities of `x >= threshold`, normalised by vector length
pub fn classify_two_class(
    points: &[Vec<u32>],
    threshold: f64,
    confidence: f64,
) -> StatsResult<Vec<ProbabilityEstimate>> {
    let estimates = classify(points, &Thresholds::Single(threshold), None, confidence)?;
    Ok(estimates.into_iter().map(|e| e.above).collect())
}

/// Three independent series (below, between, above) for dual thresholds
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThreeClassSeries {
    pub below: Vec<ProbabilityEstimate>,
    pub between: Vec<ProbabilityEstimate>,
    pub above: Vec<ProbabilityEstimate>,
}

/// Three-class probabilities normalised by the per-point trial counts
pub fn classify_three_class(
    points: &[Vec<u32>],
    low: f64,
    high: f64,
    trial_counts: &[u64],
    confidence: f64,
) -> StatsResult<ThreeClassSeries> {
    let thresholds = Thresholds::dual(low, high)?;
    let estimates = classify(points, &thresholds, Some(trial_counts), confidence)?;

    let mut series = ThreeClassSeries::default();
    for e in estimates {
        series.below.push(e.below);
        // Dual thresholds always fill the middle band
        series.between.extend(e.between);
        series.above.push(e.above);
    }
    Ok(series)
}

/// Pull one band out of per-point estimates
pub fn band_series(estimates: &[PointEstimate], band: Band) -> Option<Vec<ProbabilityEstimate>> {
    estimates.iter().map(|e| e.band(band).copied()).collect()
}
