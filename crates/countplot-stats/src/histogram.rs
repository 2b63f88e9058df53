//! Per-point count histograms
//!
//! Bin `i` counts samples `v` with `edges[i] <= v < edges[i + 1]`, except the
//! last bin which also includes its right edge. Samples outside
//! `[edges[0], edges[B]]` are dropped.

use crate::error::{StatsError, StatsResult};
use serde::{Deserialize, Serialize};

/// Validated, strictly increasing histogram bin edges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct BinEdges {
    edges: Vec<f64>,
}

impl BinEdges {
    /// Validate an explicit edge sequence
    pub fn new(edges: Vec<f64>) -> StatsResult<Self> {
        if edges.len() < 2 {
            return Err(StatsError::TooFewEdges(edges.len()));
        }
        if let Some(index) = edges.iter().position(|e| !e.is_finite()) {
            return Err(StatsError::NonIncreasingEdges { index });
        }
        if let Some(i) = edges.windows(2).position(|w| w[1] <= w[0]) {
            return Err(StatsError::NonIncreasingEdges { index: i + 1 });
        }
        Ok(Self { edges })
    }

    /// Unit-width edges `0, 1, ..., count - 1`
    pub fn range(count: usize) -> StatsResult<Self> {
        Self::new((0..count).map(|i| i as f64).collect())
    }

    /// Number of bins (one less than the number of edges)
    pub fn bin_count(&self) -> usize {
        self.edges.len() - 1
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.edges
    }

    /// First edge
    pub fn min(&self) -> f64 {
        self.edges[0]
    }

    /// Last edge
    pub fn max(&self) -> f64 {
        self.edges[self.edges.len() - 1]
    }

    /// Bin index for a value, `None` when out of range
    pub fn bin_of(&self, value: f64) -> Option<usize> {
        if value < self.min() || value > self.max() {
            return None;
        }
        if value == self.max() {
            return Some(self.bin_count() - 1);
        }
        // First edge strictly greater than value, minus one
        Some(self.edges.partition_point(|&e| e <= value) - 1)
    }

    /// Midpoint of every bin
    pub fn centers(&self) -> Vec<f64> {
        self.edges.windows(2).map(|w| (w[0] + w[1]) / 2.0).collect()
    }
}

impl TryFrom<Vec<f64>> for BinEdges {
    type Error = StatsError;

    fn try_from(edges: Vec<f64>) -> StatsResult<Self> {
        Self::new(edges)
    }
}

impl From<BinEdges> for Vec<f64> {
    fn from(edges: BinEdges) -> Self {
        edges.edges
    }
}

/// Count histogram of one sample vector
pub fn histogram(samples: &[u32], edges: &BinEdges) -> Vec<u64> {
    let mut counts = vec![0u64; edges.bin_count()];
    for &v in samples {
        if let Some(bin) = edges.bin_of(f64::from(v)) {
            counts[bin] += 1;
        }
    }
    counts
}

/// Histogram every scan point against the same edges
pub fn histogram_points(points: &[Vec<u32>], edges: &BinEdges) -> Vec<Vec<u64>> {
    points.iter().map(|samples| histogram(samples, edges)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_histogram_closed_last_bin() {
        let edges = BinEdges::new(vec![0.0, 2.0, 4.0, 6.0]).unwrap();
        // 5 sits inside [4, 6]
        assert_eq!(histogram(&[0, 1, 2, 3, 5], &edges), vec![2, 2, 1]);
        // 6 is the closed right edge, 7 is out of range
        assert_eq!(histogram(&[6, 6, 7], &edges), vec![0, 0, 2]);
    }

    #[test]
    fn test_histogram_drops_values_below_range() {
        let edges = BinEdges::new(vec![2.0, 3.0, 4.0]).unwrap();
        assert_eq!(histogram(&[0, 1, 2, 3, 4, 5], &edges), vec![1, 2]);
    }

    #[test]
    fn test_range_edges() {
        let edges = BinEdges::range(300).unwrap();
        assert_eq!(edges.bin_count(), 299);
        assert_eq!(edges.max(), 299.0);

        let counts = histogram(&[0, 298, 299, 300], &edges);
        assert_eq!(counts[0], 1);
        // 298 and 299 share the closed last bin
        assert_eq!(counts[298], 2);
        assert_eq!(counts.iter().sum::<u64>(), 3);
    }

    #[test]
    fn test_edges_validation() {
        assert_eq!(BinEdges::new(vec![1.0]), Err(StatsError::TooFewEdges(1)));
        assert_eq!(BinEdges::range(1), Err(StatsError::TooFewEdges(1)));
        assert_eq!(
            BinEdges::new(vec![0.0, 1.0, 1.0]),
            Err(StatsError::NonIncreasingEdges { index: 2 })
        );
        assert_eq!(
            BinEdges::new(vec![0.0, f64::NAN]),
            Err(StatsError::NonIncreasingEdges { index: 1 })
        );
    }

    #[test]
    fn test_bin_centers() {
        let edges = BinEdges::new(vec![0.0, 2.0, 4.0]).unwrap();
        assert_eq!(edges.centers(), vec![1.0, 3.0]);
    }

    #[test]
    fn test_histogram_points() {
        let edges = BinEdges::range(4).unwrap();
        let hists = histogram_points(&[vec![0, 1], vec![3, 3, 9]], &edges);
        assert_eq!(hists, vec![vec![1, 1, 0], vec![0, 0, 2]]);
    }

    #[test]
    fn test_deserialize_validates_edges() {
        let edges: BinEdges = serde_json::from_str("[0.0, 1.0, 2.0]").unwrap();
        assert_eq!(edges.bin_count(), 2);
        assert!(serde_json::from_str::<BinEdges>("[2.0, 1.0]").is_err());
    }

    proptest! {
        #[test]
        fn prop_counts_match_in_range_samples(
            samples in prop::collection::vec(0u32..40, 0..100),
            start in 0usize..10,
            count in 2usize..30,
        ) {
            let edges = BinEdges::new((start..start + count).map(|i| i as f64).collect()).unwrap();
            let counts = histogram(&samples, &edges);
            let total: u64 = counts.iter().sum();
            let in_range = samples
                .iter()
                .filter(|&&v| f64::from(v) >= edges.min() && f64::from(v) <= edges.max())
                .count() as u64;
            prop_assert_eq!(total, in_range);
            prop_assert!(total <= samples.len() as u64);
        }
    }
}
