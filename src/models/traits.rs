//! Common interface for window models.

/// A smoothing model evaluated over the current window contents.
///
/// Models hold only their parameters. Every call rebuilds level, trend and
/// seasonal state from the window it is given, so an estimate never depends
/// on earlier calls.
pub trait MovingAverage {
    /// Estimate for the newest bucket, or `None` if the window cannot
    /// support the model yet.
    fn compute(&self, window: &[f64]) -> Option<f64>;

    /// Forecast `steps` values past the end of a non-empty window.
    fn extrapolate(&self, window: &[f64], steps: usize) -> Vec<f64>;

    /// Get the model name.
    fn name(&self) -> &str;

    /// Smallest window for which `compute` yields a value.
    fn min_window(&self) -> usize {
        1
    }

    /// Forecast exactly `steps` values.
    ///
    /// An empty window has nothing to extrapolate from and yields NaN for
    /// every step.
    fn predict(&self, window: &[f64], steps: usize) -> Vec<f64> {
        if window.is_empty() {
            return vec![f64::NAN; steps];
        }
        self.extrapolate(window, steps)
    }
}
