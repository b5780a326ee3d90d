//! Simple moving average.

use crate::models::MovingAverage;
use crate::utils::stats::mean;

/// Unweighted mean of every value in the window.
///
/// Forecasts are flat at the current mean.
///
/// # Example
/// ```
/// use movavg_forecast::models::baseline::SimpleMovingAverage;
/// use movavg_forecast::models::MovingAverage;
///
/// let model = SimpleMovingAverage::new();
/// assert_eq!(model.compute(&[1.0, 2.0, 3.0, 4.0]), Some(2.5));
/// assert_eq!(model.predict(&[1.0, 2.0, 3.0, 4.0], 2), vec![2.5, 2.5]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SimpleMovingAverage;

impl SimpleMovingAverage {
    pub fn new() -> Self {
        Self
    }
}

impl MovingAverage for SimpleMovingAverage {
    fn compute(&self, window: &[f64]) -> Option<f64> {
        if window.is_empty() {
            return None;
        }
        Some(mean(window))
    }

    fn extrapolate(&self, window: &[f64], steps: usize) -> Vec<f64> {
        vec![mean(window); steps]
    }

    fn name(&self) -> &str {
        "simple"
    }
}
