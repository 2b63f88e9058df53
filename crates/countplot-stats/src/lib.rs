//! countplot-stats - Threshold statistics for photon-count scans
//!
//! This crate turns raw per-point count vectors into the quantities the
//! countplot applets draw:
//!
//! - **Binomial intervals**: equal-tailed quantile intervals for a
//!   proportion, converted to asymmetric error bars
//! - **Threshold classification**: two-band (single cut) or three-band
//!   (low/high cuts) probabilities per scan point
//! - **Histograms**: per-point count histograms over shared bin edges
//!
//! All functions are pure and return [`StatsResult`]; degenerate input
//! (zero trials, empty vectors, bad edges) is reported, never panicked on.

pub mod binomial;
pub mod error;
pub mod histogram;
pub mod threshold;

pub use binomial::*;
pub use error::*;
pub use histogram::*;
pub use threshold::*;
