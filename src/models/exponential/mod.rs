//! Exponential smoothing models.
//!
//! This module provides the exponentially weighted window models:
//! - Single exponential smoothing (EWMA)
//! - Holt's Linear Trend
//! - Holt-Winters (additive and multiplicative seasonality)

mod holt;
mod holt_winters;
mod ses;

pub use holt::HoltLinearTrend;
pub use holt_winters::{HoltWinters, HoltWintersState, SeasonalType, MULTIPLICATIVE_PADDING};
pub use ses::SimpleExponentialSmoothing;
