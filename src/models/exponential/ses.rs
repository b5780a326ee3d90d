//! Single exponential smoothing (EWMA).

use crate::error::Result;
use crate::models::{check_unit_interval, MovingAverage};

/// Exponentially weighted moving average.
///
/// The model equation is:
/// `level_t = α × y_t + (1-α) × level_{t-1}`
///
/// seeded with the oldest value in the window. Forecasts are flat at the
/// final level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimpleExponentialSmoothing {
    /// Smoothing parameter (0 <= alpha <= 1).
    alpha: f64,
}

impl SimpleExponentialSmoothing {
    /// Default smoothing parameter.
    pub const DEFAULT_ALPHA: f64 = 0.3;

    /// Create a new EWMA model.
    ///
    /// # Arguments
    /// * `alpha` - Smoothing parameter in `[0, 1]`
    pub fn new(alpha: f64) -> Result<Self> {
        Ok(Self {
            alpha: check_unit_interval("alpha", alpha)?,
        })
    }

    /// Get the smoothing parameter.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Final level after smoothing the whole window.
    pub fn level(&self, window: &[f64]) -> Option<f64> {
        let (&first, rest) = window.split_first()?;
        Some(
            rest.iter()
                .fold(first, |level, &y| self.alpha * y + (1.0 - self.alpha) * level),
        )
    }
}

impl Default for SimpleExponentialSmoothing {
    fn default() -> Self {
        Self {
            alpha: Self::DEFAULT_ALPHA,
        }
    }
}

impl MovingAverage for SimpleExponentialSmoothing {
    fn compute(&self, window: &[f64]) -> Option<f64> {
        self.level(window)
    }

    fn extrapolate(&self, window: &[f64], steps: usize) -> Vec<f64> {
        let level = self.level(window).unwrap_or(f64::NAN);
        vec![level; steps]
    }

    fn name(&self) -> &str {
        "ewma"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MovAvgError;
    use approx::assert_relative_eq;

    #[test]
    fn ewma_known_calculation() {
        // l_0 = 10
        // l_1 = 0.5*12 + 0.5*10 = 11
        // l_2 = 0.5*14 + 0.5*11 = 12.5
        // l_3 = 0.5*13 + 0.5*12.5 = 12.75
        let model = SimpleExponentialSmoothing::new(0.5).unwrap();
        assert_relative_eq!(
            model.compute(&[10.0, 12.0, 14.0, 13.0]).unwrap(),
            12.75,
            epsilon = 1e-10
        );
    }

    #[test]
    fn ewma_single_value_is_that_value() {
        let model = SimpleExponentialSmoothing::new(0.8).unwrap();
        assert_eq!(model.compute(&[42.0]), Some(42.0));
    }

    #[test]
    fn ewma_constant_window() {
        let model = SimpleExponentialSmoothing::default();
        assert_relative_eq!(model.compute(&[10.0; 9]).unwrap(), 10.0, epsilon = 1e-12);
    }

    #[test]
    fn ewma_alpha_extremes() {
        let window = [1.0, 5.0, 9.0];
        let frozen = SimpleExponentialSmoothing::new(0.0).unwrap();
        let latest = SimpleExponentialSmoothing::new(1.0).unwrap();
        assert_eq!(frozen.compute(&window), Some(1.0));
        assert_eq!(latest.compute(&window), Some(9.0));
    }

    #[test]
    fn ewma_high_alpha_responds_quickly() {
        let window = [10.0, 10.0, 10.0, 20.0, 20.0];
        let low = SimpleExponentialSmoothing::new(0.1).unwrap();
        let high = SimpleExponentialSmoothing::new(0.9).unwrap();
        assert!(high.compute(&window).unwrap() > low.compute(&window).unwrap());
    }

    #[test]
    fn ewma_rejects_alpha_outside_unit_interval() {
        assert!(matches!(
            SimpleExponentialSmoothing::new(1.5),
            Err(MovAvgError::InvalidParameter(_))
        ));
        assert!(SimpleExponentialSmoothing::new(-0.1).is_err());
        assert!(SimpleExponentialSmoothing::new(f64::NAN).is_err());
    }

    #[test]
    fn ewma_predictions_are_flat() {
        let model = SimpleExponentialSmoothing::new(0.5).unwrap();
        let preds = model.predict(&[10.0, 12.0, 14.0, 13.0], 3);
        assert_eq!(preds.len(), 3);
        for p in preds {
            assert_relative_eq!(p, 12.75, epsilon = 1e-10);
        }
    }

    #[test]
    fn ewma_name_is_correct() {
        assert_eq!(SimpleExponentialSmoothing::default().name(), "ewma");
    }
}
