//! Binomial confidence intervals
//!
//! Intervals are equal-tailed quantile intervals of `Binom(n, p)`: for a
//! confidence level `c` the bounds are the `(1 - c) / 2` and `(1 + c) / 2`
//! quantiles, where the quantile of `q` is the smallest count `k` with
//! `CDF(k) >= q`. Bounds are returned in counts and converted to error bar
//! magnitudes on the probability scale by [`ProbabilityEstimate`].

use crate::error::{StatsError, StatsResult};
use serde::{Deserialize, Serialize};
use statrs::function::gamma::ln_gamma;

/// Confidence level used for error bars (about one sigma)
pub const DEFAULT_CONFIDENCE: f64 = 0.68;

/// Slack when comparing an accumulated CDF against a target quantile
const CDF_EPSILON: f64 = 1e-12;

fn ln_choose(n: u64, k: u64) -> f64 {
    // ln(n choose k) = ln Γ(n+1) - ln Γ(k+1) - ln Γ(n-k+1)
    let n1 = (n as f64) + 1.0;
    let k1 = (k as f64) + 1.0;
    let nk1 = ((n - k) as f64) + 1.0;
    ln_gamma(n1) - ln_gamma(k1) - ln_gamma(nk1)
}

/// PMF of `Binom(n, p)` at `k`, evaluated in log space
fn pmf(k: u64, n: u64, p: f64) -> f64 {
    if p == 0.0 {
        return if k == 0 { 1.0 } else { 0.0 };
    }
    if p == 1.0 {
        return if k == n { 1.0 } else { 0.0 };
    }
    let kf = k as f64;
    let nf = n as f64;
    (ln_choose(n, k) + kf * p.ln() + (nf - kf) * (1.0 - p).ln()).exp()
}

/// Smallest `k` such that `P(X <= k) >= q` for `X ~ Binom(n, p)`
fn quantile(q: f64, n: u64, p: f64) -> u64 {
    let mut cdf = 0.0;
    for k in 0..=n {
        cdf += pmf(k, n, p);
        if cdf >= q - CDF_EPSILON {
            return k;
        }
    }
    n
}

fn validate(p: f64, n_trials: u64, confidence: f64) -> StatsResult<()> {
    if n_trials == 0 {
        return Err(StatsError::ZeroTrials);
    }
    if !p.is_finite() || !(0.0..=1.0).contains(&p) {
        return Err(StatsError::InvalidProbability(p));
    }
    if !confidence.is_finite() || confidence <= 0.0 || confidence >= 1.0 {
        return Err(StatsError::InvalidConfidence(confidence));
    }
    Ok(())
}

/// Two-sided confidence interval, in counts, for a binomial proportion
///
/// Returns `(lower, upper)` with `0 <= lower <= upper <= n_trials`.
pub fn interval(p: f64, n_trials: u64, confidence: f64) -> StatsResult<(f64, f64)> {
    validate(p, n_trials, confidence)?;

    let alpha = (1.0 - confidence) / 2.0;
    let lower = quantile(alpha, n_trials, p);
    let upper = quantile(1.0 - alpha, n_trials, p);
    Ok((lower as f64, upper as f64))
}

/// Probability estimate with asymmetric error bars
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityEstimate {
    /// Point estimate, in [0, 1]
    pub p: f64,
    /// Distance from `p` up to the upper interval bound
    pub upper_err: f64,
    /// Distance from `p` down to the lower interval bound
    pub lower_err: f64,
}

impl ProbabilityEstimate {
    /// Estimate from an observed proportion over `n_trials` trials
    pub fn from_proportion(p: f64, n_trials: u64, confidence: f64) -> StatsResult<Self> {
        let (lower, upper) = interval(p, n_trials, confidence)?;
        let n = n_trials as f64;

        // max(0) only absorbs rounding; the quantile bounds bracket k/n
        Ok(Self {
            p,
            upper_err: (upper / n - p).max(0.0),
            lower_err: (p - lower / n).max(0.0),
        })
    }

    /// Estimate from `successes` out of `n_trials`
    pub fn from_counts(successes: u64, n_trials: u64, confidence: f64) -> StatsResult<Self> {
        if n_trials == 0 {
            return Err(StatsError::ZeroTrials);
        }
        Self::from_proportion(successes as f64 / n_trials as f64, n_trials, confidence)
    }

    /// Lower interval bound on the probability scale
    pub fn lower_bound(&self) -> f64 {
        self.p - self.lower_err
    }

    /// Upper interval bound on the probability scale
    pub fn upper_bound(&self) -> f64 {
        self.p + self.upper_err
    }
}
