//! Pipeline configuration.
//!
//! [`PipelineSpec`] mirrors the request document and is deserialized as-is.
//! [`PipelineConfig`] is the validated, immutable form a runner consumes; the
//! only way to obtain one is through [`Validator`](super::Validator).

use super::gap::GapPolicy;
use crate::core::BucketsPath;
use crate::error::Result;
use crate::models::MovAvgModel;
use serde::{Deserialize, Serialize};

/// Raw configuration of one moving-average pipeline.
///
/// ```
/// use movavg_forecast::pipeline::{GapPolicy, PipelineSpec};
///
/// let spec = PipelineSpec::from_json(
///     r#"{"name": "the_movavg", "buckets_path": "the_sum", "window": 5,
///         "model": "ewma", "settings": {"alpha": 0.5}, "gap_policy": "insert_zeros"}"#,
/// )
/// .unwrap();
/// assert_eq!(spec.window, 5);
/// assert_eq!(spec.gap_policy, GapPolicy::InsertZeros);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineSpec {
    /// Name under which outputs are written into each bucket.
    pub name: String,
    /// Target metric, or `_count`.
    pub buckets_path: String,
    pub window: i64,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub settings: ModelSettings,
    #[serde(default)]
    pub gap_policy: GapPolicy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predict: Option<i64>,
}

fn default_model() -> String {
    "simple".to_string()
}

impl PipelineSpec {
    /// Spec with the simple model, skip policy and no predictions.
    pub fn new(name: impl Into<String>, buckets_path: impl Into<String>, window: i64) -> Self {
        Self {
            name: name.into(),
            buckets_path: buckets_path.into(),
            window,
            model: default_model(),
            settings: ModelSettings::default(),
            gap_policy: GapPolicy::default(),
            predict: None,
        }
    }

    pub fn from_json(document: &str) -> Result<Self> {
        Ok(serde_json::from_str(document)?)
    }

    /// Parse an array of pipeline specs.
    pub fn list_from_json(document: &str) -> Result<Vec<Self>> {
        Ok(serde_json::from_str(document)?)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_settings(mut self, settings: ModelSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_gap_policy(mut self, gap_policy: GapPolicy) -> Self {
        self.gap_policy = gap_policy;
        self
    }

    pub fn with_predict(mut self, steps: i64) -> Self {
        self.predict = Some(steps);
        self
    }
}

/// Model parameters. Each model reads only the settings it understands and
/// falls back to its defaults for the rest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beta: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gamma: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<i64>,
    /// Seasonality type: `add` or `mult`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub seasonal_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pad: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legacy_weighting: Option<bool>,
}

impl ModelSettings {
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = Some(beta);
        self
    }

    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = Some(gamma);
        self
    }

    pub fn with_period(mut self, period: i64) -> Self {
        self.period = Some(period);
        self
    }

    pub fn with_seasonal_type(mut self, seasonal_type: impl Into<String>) -> Self {
        self.seasonal_type = Some(seasonal_type.into());
        self
    }

    pub fn with_pad(mut self, pad: bool) -> Self {
        self.pad = Some(pad);
        self
    }

    pub fn with_legacy_weighting(mut self, legacy: bool) -> Self {
        self.legacy_weighting = Some(legacy);
        self
    }
}

/// Validated pipeline configuration. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    name: String,
    buckets_path: BucketsPath,
    window: usize,
    model: MovAvgModel,
    gap_policy: GapPolicy,
    predict: Option<usize>,
}

impl PipelineConfig {
    pub(crate) fn new(
        name: String,
        buckets_path: BucketsPath,
        window: usize,
        model: MovAvgModel,
        gap_policy: GapPolicy,
        predict: Option<usize>,
    ) -> Self {
        Self {
            name,
            buckets_path,
            window,
            model,
            gap_policy,
            predict,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn buckets_path(&self) -> &BucketsPath {
        &self.buckets_path
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn model(&self) -> &MovAvgModel {
        &self.model
    }

    pub fn gap_policy(&self) -> GapPolicy {
        self.gap_policy
    }

    /// Number of synthetic buckets to append, if predictions were requested.
    pub fn predict(&self) -> Option<usize> {
        self.predict
    }
}
