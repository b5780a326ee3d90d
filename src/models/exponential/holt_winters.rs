//! Holt-Winters (triple exponential smoothing).
//!
//! Adds a seasonal component with period `p` on top of Holt's level and
//! trend. At least two full seasons must be in the window before an
//! estimate is produced.

use crate::error::{MovAvgError, Result};
use crate::models::exponential::HoltLinearTrend;
use crate::models::{check_unit_interval, MovingAverage};
use crate::utils::stats::mean;
use serde::{Deserialize, Serialize};

/// Shift applied to every value under multiplicative seasonality so that
/// zero-valued buckets never become divisors.
pub const MULTIPLICATIVE_PADDING: f64 = 0.000_000_000_1;

/// Type of seasonal component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeasonalType {
    /// Seasonal effect is added to the level.
    #[default]
    #[serde(alias = "add", alias = "ADDITIVE")]
    Additive,
    /// Seasonal effect scales the level.
    #[serde(alias = "mult", alias = "MULTIPLICATIVE")]
    Multiplicative,
}

impl SeasonalType {
    /// Parse `add`/`additive` or `mult`/`multiplicative`, case-insensitively.
    pub fn parse(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "add" | "additive" => Ok(SeasonalType::Additive),
            "mult" | "multiplicative" => Ok(SeasonalType::Multiplicative),
            other => Err(MovAvgError::InvalidParameter(format!(
                "unknown seasonality type [{other}], expected one of [add, mult]"
            ))),
        }
    }
}

/// Smoothed state rebuilt from one window.
#[derive(Debug, Clone, PartialEq)]
pub struct HoltWintersState {
    pub level: f64,
    pub trend: f64,
    /// One seasonal slot per window position.
    pub seasonals: Vec<f64>,
}

/// Holt-Winters model.
///
/// With `v` the (padded) window values, `n` its length and `p` the period:
/// - Init: `l = mean(v[0..p])`, `b = mean((v[i] - v[i+p]) / 2)`,
///   `s[i] = v[i] / l` for `i < p` (all zero when `l == 0`)
/// - Level: `l_t = α(v_t - s_{t-p}) + (1-α)(l_{t-1} + b_{t-1})`
///   (multiplicative: `α(v_t / s_{t-p})`)
/// - Trend: `b_t = β(l_t - l_{t-1}) + (1-β)b_{t-1}`
/// - Seasonal: `s_t = γ(v_t - (l_{t-1} + b_{t-1})) + (1-γ)s_{t-p}`
///   (multiplicative: `γ(v_t / (l_{t-1} + b_{t-1}))`)
/// - Estimate: `l_n + s[(n-1-p) mod n]` (multiplicative: `l_n + (0·b_n)·s[...]`,
///   which is the level itself for any finite seasonal)
/// - Forecast: `l_n + h·b_n + s[n - p + (h-1) mod p]`
///   (multiplicative: `(l_n + h·b_n) · s[...]`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoltWinters {
    alpha: f64,
    beta: f64,
    gamma: f64,
    period: usize,
    seasonal_type: SeasonalType,
    pad: bool,
}

impl HoltWinters {
    pub const DEFAULT_ALPHA: f64 = 0.3;
    pub const DEFAULT_BETA: f64 = 0.1;
    pub const DEFAULT_GAMMA: f64 = 0.3;
    pub const DEFAULT_PERIOD: usize = 1;

    /// Create a new Holt-Winters model with padding enabled.
    pub fn new(
        alpha: f64,
        beta: f64,
        gamma: f64,
        period: usize,
        seasonal_type: SeasonalType,
    ) -> Result<Self> {
        if period == 0 {
            return Err(MovAvgError::InvalidParameter(
                "[period] must be a positive integer".to_string(),
            ));
        }
        Ok(Self {
            alpha: check_unit_interval("alpha", alpha)?,
            beta: check_unit_interval("beta", beta)?,
            gamma: check_unit_interval("gamma", gamma)?,
            period,
            seasonal_type,
            pad: true,
        })
    }

    /// Create a new Holt-Winters model with additive seasonality.
    pub fn additive(alpha: f64, beta: f64, gamma: f64, period: usize) -> Result<Self> {
        Self::new(alpha, beta, gamma, period, SeasonalType::Additive)
    }

    /// Create a new Holt-Winters model with multiplicative seasonality.
    pub fn multiplicative(alpha: f64, beta: f64, gamma: f64, period: usize) -> Result<Self> {
        Self::new(alpha, beta, gamma, period, SeasonalType::Multiplicative)
    }

    /// Enable or disable the multiplicative padding.
    pub fn with_padding(mut self, pad: bool) -> Self {
        self.pad = pad;
        self
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// Get the seasonal period.
    pub fn period(&self) -> usize {
        self.period
    }

    /// Get the seasonal type.
    pub fn seasonal_type(&self) -> SeasonalType {
        self.seasonal_type
    }

    pub fn is_padded(&self) -> bool {
        self.pad
    }

    fn padding(&self) -> f64 {
        match self.seasonal_type {
            SeasonalType::Multiplicative if self.pad => MULTIPLICATIVE_PADDING,
            _ => 0.0,
        }
    }

    /// Rebuild level, trend and seasonals from the window.
    ///
    /// Returns `None` while the window holds fewer than two seasons.
    pub fn smooth(&self, window: &[f64]) -> Option<HoltWintersState> {
        let period = self.period;
        let n = window.len();
        if n < 2 * period {
            return None;
        }

        let padding = self.padding();
        let values: Vec<f64> = window.iter().map(|v| v + padding).collect();

        // Initial level is the mean of the first season, initial trend the
        // mean half-slope between the first two seasons.
        let mut level = mean(&values[..period]);
        let mut trend = (0..period)
            .map(|i| (values[i] - values[i + period]) / 2.0)
            .sum::<f64>()
            / period as f64;

        let mut seasonals = vec![0.0; n];
        if level != 0.0 {
            for i in 0..period {
                seasonals[i] = values[i] / level;
            }
        }

        for i in period..n {
            let (level_prev, trend_prev) = (level, trend);
            let base = level_prev + trend_prev;

            level = match self.seasonal_type {
                SeasonalType::Multiplicative => {
                    self.alpha * (values[i] / seasonals[i - period]) + (1.0 - self.alpha) * base
                }
                SeasonalType::Additive => {
                    self.alpha * (values[i] - seasonals[i - period]) + (1.0 - self.alpha) * base
                }
            };

            trend = self.beta * (level - level_prev) + (1.0 - self.beta) * trend_prev;

            seasonals[i] = match self.seasonal_type {
                SeasonalType::Multiplicative => {
                    self.gamma * (values[i] / base) + (1.0 - self.gamma) * seasonals[i - period]
                }
                SeasonalType::Additive => {
                    self.gamma * (values[i] - base) + (1.0 - self.gamma) * seasonals[i - period]
                }
            };
        }

        Some(HoltWintersState {
            level,
            trend,
            seasonals,
        })
    }

    fn forecast_step(&self, base: f64, seasonal: f64) -> f64 {
        match self.seasonal_type {
            SeasonalType::Additive => base + seasonal,
            SeasonalType::Multiplicative => base * seasonal,
        }
    }
}

impl Default for HoltWinters {
    fn default() -> Self {
        Self {
            alpha: Self::DEFAULT_ALPHA,
            beta: Self::DEFAULT_BETA,
            gamma: Self::DEFAULT_GAMMA,
            period: Self::DEFAULT_PERIOD,
            seasonal_type: SeasonalType::Additive,
            pad: true,
        }
    }
}

impl MovingAverage for HoltWinters {
    fn compute(&self, window: &[f64]) -> Option<f64> {
        let state = self.smooth(window)?;
        let n = window.len();
        let seasonal = state.seasonals[(n - 1 - self.period) % n];
        let estimate = match self.seasonal_type {
            SeasonalType::Additive => state.level + seasonal,
            // The seasonal term is multiplied out by a zero trend weight.
            SeasonalType::Multiplicative => state.level + (0.0 * state.trend) * seasonal,
        };
        Some(estimate)
    }

    /// Below two seasons the seasonal component is unknown, so the forecast
    /// falls back to Holt's linear trend with the same alpha and beta.
    fn extrapolate(&self, window: &[f64], steps: usize) -> Vec<f64> {
        let Some(state) = self.smooth(window) else {
            let holt = HoltLinearTrend::new(self.alpha, self.beta).unwrap_or_default();
            return holt.extrapolate(window, steps);
        };

        let n = window.len();
        (1..=steps)
            .map(|h| {
                let idx = n - self.period + (h - 1) % self.period;
                let base = state.level + h as f64 * state.trend;
                self.forecast_step(base, state.seasonals[idx])
            })
            .collect()
    }

    fn name(&self) -> &str {
        "holt_winters"
    }

    fn min_window(&self) -> usize {
        2 * self.period
    }
}
