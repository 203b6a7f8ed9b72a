use serde::{Deserialize, Serialize};

use crate::consts::CUBE_REGION_ID;
use crate::error::{Result, VelaError};

/// A binned intensity histogram as delivered by the backend.
///
/// Bins are ordered by value; `first_bin_center` is the center of bin 0 and
/// all bins share the same width.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub first_bin_center: f64,
    pub bin_width: f64,
    /// Count per bin. An empty vector is treated as an absent histogram.
    pub bins: Vec<f64>,
}

impl Histogram {
    pub fn new(first_bin_center: f64, bin_width: f64, bins: Vec<f64>) -> Self {
        Self {
            first_bin_center,
            bin_width,
            bins,
        }
    }

    /// Low edge of the first bin.
    pub fn lower_bound(&self) -> f64 {
        self.first_bin_center - 0.5 * self.bin_width
    }

    /// High edge of the last bin.
    pub fn upper_bound(&self) -> f64 {
        self.first_bin_center + (self.bins.len() as f64 - 0.5) * self.bin_width
    }

    pub fn total_count(&self) -> f64 {
        self.bins.iter().sum()
    }

    /// Value bounds bracketing the given cumulative-probability ranks.
    ///
    /// `ranks` are percentages in [0, 100], given in ascending order. Each bin
    /// is treated as a locally uniform distribution across its width, and the
    /// returned value is linearly interpolated inside the bin where the
    /// cumulative fraction crosses the rank. Ranks 0 and 100 return the exact
    /// histogram lower/upper bounds.
    ///
    /// A histogram whose total count is zero is undeterminable: the result is
    /// an empty vector and the caller must leave prior bounds unchanged.
    pub fn percentiles(&self, ranks: &[f64]) -> Result<Vec<f64>> {
        if !(self.bin_width > 0.0) || !self.bin_width.is_finite() {
            return Err(VelaError::InvalidHistogram(format!(
                "bin width must be positive and finite, got {}",
                self.bin_width
            )));
        }
        if self.bins.is_empty() {
            return Err(VelaError::InvalidHistogram("no bins".to_string()));
        }
        let mut prev = f64::NEG_INFINITY;
        for &rank in ranks {
            if !(0.0..=100.0).contains(&rank) {
                return Err(VelaError::InvalidRank { rank });
            }
            if rank < prev {
                return Err(VelaError::UnsortedRanks { prev, rank });
            }
            prev = rank;
        }

        let total = self.total_count();
        if total <= 0.0 {
            return Ok(Vec::new());
        }

        let min_val = self.lower_bound();
        let dx = self.bin_width;
        let bin_count = self.bins.len();

        let mut results = Vec::with_capacity(ranks.len());
        let mut next_rank = 0;
        let mut cumulative = 0.0;

        for (i, &count) in self.bins.iter().enumerate() {
            let current_fraction = cumulative / total;
            // Pin the final bin to exactly 1.0 so that rank 100 lands on the
            // upper bound without floating-point residue.
            let next_fraction = if i + 1 == bin_count {
                1.0
            } else {
                (cumulative + count) / total
            };

            while next_rank < ranks.len() && next_fraction >= ranks[next_rank] / 100.0 {
                let target = ranks[next_rank] / 100.0;
                let portion = if next_fraction > current_fraction {
                    ((target - current_fraction) / (next_fraction - current_fraction)).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                results.push(min_val + dx * (i as f64 + portion));
                next_rank += 1;
            }

            if next_rank == ranks.len() {
                break;
            }
            cumulative += count;
        }

        Ok(results)
    }
}

/// An inbound histogram message from the backend.
///
/// `region_id` follows the backend convention: [`crate::consts::IMAGE_REGION_ID`]
/// for per-channel histograms, [`crate::consts::CUBE_REGION_ID`] for whole-cube
/// histograms accumulated incrementally (with `progress` in [0, 1]).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HistogramUpdate {
    pub region_id: i32,
    pub channel: i32,
    pub stokes: i32,
    #[serde(default = "default_progress")]
    pub progress: f64,
    pub histogram: Histogram,
}

fn default_progress() -> f64 {
    1.0
}

impl HistogramUpdate {
    pub fn is_cube(&self) -> bool {
        self.region_id == CUBE_REGION_ID
    }
}
