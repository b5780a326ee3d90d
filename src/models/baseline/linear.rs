//! Linearly weighted moving average.

use crate::models::MovingAverage;
use crate::utils::stats::linearly_weighted_mean;

/// Moving average weighting the `i`-th oldest value by `i`.
///
/// `compute = Σ(v_i · i) / Σ i` with the oldest value at `i = 1`.
///
/// The legacy weighting starts the weight sum at 1 instead of 0, which
/// inflates the denominator by one. It is kept only for compatibility with
/// results produced by older deployments and must be requested explicitly.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LinearWeightedAverage {
    legacy_weighting: bool,
}

impl LinearWeightedAverage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Model using the historical `Σ i + 1` denominator.
    pub fn legacy() -> Self {
        Self {
            legacy_weighting: true,
        }
    }

    pub fn is_legacy(&self) -> bool {
        self.legacy_weighting
    }

    fn base_weight(&self) -> f64 {
        if self.legacy_weighting {
            1.0
        } else {
            0.0
        }
    }
}

impl MovingAverage for LinearWeightedAverage {
    fn compute(&self, window: &[f64]) -> Option<f64> {
        if window.is_empty() {
            return None;
        }
        Some(linearly_weighted_mean(window, self.base_weight()))
    }

    fn extrapolate(&self, window: &[f64], steps: usize) -> Vec<f64> {
        vec![linearly_weighted_mean(window, self.base_weight()); steps]
    }

    fn name(&self) -> &str {
        "linear"
    }
}
