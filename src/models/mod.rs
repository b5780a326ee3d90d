//! Window models.
//!
//! Every model implements [`MovingAverage`]. Pipelines hold a
//! [`MovAvgModel`], the closed set of supported models with their parameters.

mod traits;

pub mod baseline;
pub mod exponential;

pub use baseline::{LinearWeightedAverage, SimpleMovingAverage};
pub use exponential::{HoltLinearTrend, HoltWinters, SeasonalType, SimpleExponentialSmoothing};
pub use traits::MovingAverage;

use crate::error::{MovAvgError, Result};
use std::str::FromStr;

/// Check that a smoothing parameter lies in `[0, 1]`.
pub(crate) fn check_unit_interval(name: &str, value: f64) -> Result<f64> {
    if !(0.0..=1.0).contains(&value) {
        return Err(MovAvgError::InvalidParameter(format!(
            "[{name}] must be between 0 and 1, inclusive; value supplied was [{value}]"
        )));
    }
    Ok(value)
}

/// Name of a supported model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelKind {
    Simple,
    Linear,
    Ewma,
    Holt,
    HoltWinters,
}

impl ModelKind {
    pub const ALL: [ModelKind; 5] = [
        ModelKind::Simple,
        ModelKind::Linear,
        ModelKind::Ewma,
        ModelKind::Holt,
        ModelKind::HoltWinters,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::Simple => "simple",
            ModelKind::Linear => "linear",
            ModelKind::Ewma => "ewma",
            ModelKind::Holt => "holt",
            ModelKind::HoltWinters => "holt_winters",
        }
    }
}

impl FromStr for ModelKind {
    type Err = MovAvgError;

    fn from_str(s: &str) -> Result<Self> {
        let lowered = s.trim().to_ascii_lowercase();
        ModelKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == lowered)
            .ok_or_else(|| MovAvgError::UnknownModel(s.to_string()))
    }
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A configured model, dispatched by match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MovAvgModel {
    Simple(SimpleMovingAverage),
    Linear(LinearWeightedAverage),
    Ewma(SimpleExponentialSmoothing),
    Holt(HoltLinearTrend),
    HoltWinters(HoltWinters),
}

impl MovAvgModel {
    pub fn kind(&self) -> ModelKind {
        match self {
            MovAvgModel::Simple(_) => ModelKind::Simple,
            MovAvgModel::Linear(_) => ModelKind::Linear,
            MovAvgModel::Ewma(_) => ModelKind::Ewma,
            MovAvgModel::Holt(_) => ModelKind::Holt,
            MovAvgModel::HoltWinters(_) => ModelKind::HoltWinters,
        }
    }

    fn inner(&self) -> &dyn MovingAverage {
        match self {
            MovAvgModel::Simple(m) => m,
            MovAvgModel::Linear(m) => m,
            MovAvgModel::Ewma(m) => m,
            MovAvgModel::Holt(m) => m,
            MovAvgModel::HoltWinters(m) => m,
        }
    }
}

impl Default for MovAvgModel {
    fn default() -> Self {
        MovAvgModel::Simple(SimpleMovingAverage)
    }
}

impl MovingAverage for MovAvgModel {
    fn compute(&self, window: &[f64]) -> Option<f64> {
        self.inner().compute(window)
    }

    fn extrapolate(&self, window: &[f64], steps: usize) -> Vec<f64> {
        self.inner().extrapolate(window, steps)
    }

    fn name(&self) -> &str {
        self.kind().as_str()
    }

    fn min_window(&self) -> usize {
        self.inner().min_window()
    }

    fn predict(&self, window: &[f64], steps: usize) -> Vec<f64> {
        self.inner().predict(window, steps)
    }
}

impl From<SimpleMovingAverage> for MovAvgModel {
    fn from(model: SimpleMovingAverage) -> Self {
        MovAvgModel::Simple(model)
    }
}

impl From<LinearWeightedAverage> for MovAvgModel {
    fn from(model: LinearWeightedAverage) -> Self {
        MovAvgModel::Linear(model)
    }
}

impl From<SimpleExponentialSmoothing> for MovAvgModel {
    fn from(model: SimpleExponentialSmoothing) -> Self {
        MovAvgModel::Ewma(model)
    }
}

impl From<HoltLinearTrend> for MovAvgModel {
    fn from(model: HoltLinearTrend) -> Self {
        MovAvgModel::Holt(model)
    }
}

impl From<HoltWinters> for MovAvgModel {
    fn from(model: HoltWinters) -> Self {
        MovAvgModel::HoltWinters(model)
    }
}
