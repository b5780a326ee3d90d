//! Holt's linear trend (double exponential smoothing).

use crate::error::Result;
use crate::models::{check_unit_interval, MovingAverage};

/// Holt's Linear Trend model.
///
/// The model equations are:
/// - Level: `l_t = α × y_t + (1-α) × (l_{t-1} + b_{t-1})`
/// - Trend: `b_t = β × (l_t - l_{t-1}) + (1-β) × b_{t-1}`
/// - Forecast: `ŷ_{t+h} = l_t + h × b_t`
///
/// The oldest value in the window seeds the level with a zero trend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoltLinearTrend {
    /// Level smoothing parameter (0 <= alpha <= 1).
    alpha: f64,
    /// Trend smoothing parameter (0 <= beta <= 1).
    beta: f64,
}

impl HoltLinearTrend {
    pub const DEFAULT_ALPHA: f64 = 0.3;
    pub const DEFAULT_BETA: f64 = 0.1;

    /// Create a new Holt model.
    ///
    /// # Arguments
    /// * `alpha` - Level smoothing parameter in `[0, 1]`
    /// * `beta` - Trend smoothing parameter in `[0, 1]`
    pub fn new(alpha: f64, beta: f64) -> Result<Self> {
        Ok(Self {
            alpha: check_unit_interval("alpha", alpha)?,
            beta: check_unit_interval("beta", beta)?,
        })
    }

    /// Get the level smoothing parameter.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Get the trend smoothing parameter.
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Final `(level, trend)` after smoothing the window.
    pub fn smooth(&self, window: &[f64]) -> Option<(f64, f64)> {
        let (&first, rest) = window.split_first()?;
        let mut level = first;
        let mut trend = 0.0;

        for &y in rest {
            let level_prev = level;
            level = self.alpha * y + (1.0 - self.alpha) * (level_prev + trend);
            trend = self.beta * (level - level_prev) + (1.0 - self.beta) * trend;
        }

        Some((level, trend))
    }

    pub(crate) fn project(level: f64, trend: f64, steps: usize) -> Vec<f64> {
        (1..=steps).map(|h| level + h as f64 * trend).collect()
    }
}

impl Default for HoltLinearTrend {
    fn default() -> Self {
        Self {
            alpha: Self::DEFAULT_ALPHA,
            beta: Self::DEFAULT_BETA,
        }
    }
}

impl MovingAverage for HoltLinearTrend {
    fn compute(&self, window: &[f64]) -> Option<f64> {
        self.smooth(window).map(|(level, _)| level)
    }

    fn extrapolate(&self, window: &[f64], steps: usize) -> Vec<f64> {
        match self.smooth(window) {
            Some((level, trend)) => Self::project(level, trend, steps),
            None => vec![f64::NAN; steps],
        }
    }

    fn name(&self) -> &str {
        "holt"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn holt_known_calculation() {
        // l_0 = 10, b_0 = 0
        // l_1 = 0.5*12 + 0.5*(10 + 0) = 11,        b_1 = 0.5*(11 - 10) + 0.5*0 = 0.5
        // l_2 = 0.5*14 + 0.5*(11 + 0.5) = 12.75,   b_2 = 0.5*(12.75 - 11) + 0.5*0.5 = 1.125
        let model = HoltLinearTrend::new(0.5, 0.5).unwrap();
        let (level, trend) = model.smooth(&[10.0, 12.0, 14.0]).unwrap();
        assert_relative_eq!(level, 12.75, epsilon = 1e-10);
        assert_relative_eq!(trend, 1.125, epsilon = 1e-10);
        assert_relative_eq!(
            model.compute(&[10.0, 12.0, 14.0]).unwrap(),
            12.75,
            epsilon = 1e-10
        );
    }

    #[test]
    fn holt_predictions_follow_trend() {
        let model = HoltLinearTrend::new(0.5, 0.5).unwrap();
        let preds = model.predict(&[10.0, 12.0, 14.0], 3);
        assert_eq!(preds.len(), 3);
        assert_relative_eq!(preds[0], 13.875, epsilon = 1e-10);
        assert_relative_eq!(preds[1], 15.0, epsilon = 1e-10);
        assert_relative_eq!(preds[2], 16.125, epsilon = 1e-10);
    }

    #[test]
    fn holt_single_value_has_no_trend() {
        let model = HoltLinearTrend::default();
        assert_eq!(model.smooth(&[7.0]), Some((7.0, 0.0)));
        assert_eq!(model.predict(&[7.0], 2), vec![7.0, 7.0]);
    }

    #[test]
    fn holt_constant_window() {
        let model = HoltLinearTrend::new(0.7, 0.2).unwrap();
        assert_relative_eq!(model.compute(&[10.0; 8]).unwrap(), 10.0, epsilon = 1e-12);
    }

    #[test]
    fn holt_rising_series_has_positive_trend() {
        let model = HoltLinearTrend::default();
        let window: Vec<f64> = (0..10).map(|i| i as f64 * 2.0).collect();
        let (_, trend) = model.smooth(&window).unwrap();
        assert!(trend > 0.0);
    }

    #[test]
    fn holt_rejects_bad_parameters() {
        assert!(HoltLinearTrend::new(0.5, 100.1).is_err());
        assert!(HoltLinearTrend::new(-1.0, 0.5).is_err());
    }

    #[test]
    fn holt_empty_window() {
        let model = HoltLinearTrend::default();
        assert_eq!(model.compute(&[]), None);
        assert!(model.predict(&[], 3).iter().all(|p| p.is_nan()));
    }
}
