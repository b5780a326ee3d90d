//! Configuration checks performed once, before any bucket is read.

use super::config::{ModelSettings, PipelineConfig, PipelineSpec};
use crate::core::{BucketsPath, ParentAggregation};
use crate::error::{MovAvgError, Result};
use crate::models::{
    HoltLinearTrend, HoltWinters, LinearWeightedAverage, ModelKind, MovAvgModel, SeasonalType,
    SimpleExponentialSmoothing, SimpleMovingAverage,
};
use std::collections::HashSet;
use tracing::debug;

/// Turns raw pipeline specs into validated configurations.
///
/// Any violation fails the whole request; there is no partial acceptance.
pub struct Validator;

impl Validator {
    /// Largest accepted number of synthetic buckets per pipeline.
    pub const MAX_PREDICT: i64 = 10_000;

    /// Validate one pipeline against the parent it attaches to.
    pub fn validate(spec: &PipelineSpec, parent: &ParentAggregation) -> Result<PipelineConfig> {
        if spec.window <= 0 {
            return Err(MovAvgError::InvalidWindow(spec.window));
        }
        let window = usize::try_from(spec.window)
            .map_err(|_| MovAvgError::InvalidWindow(spec.window))?;

        let predict = match spec.predict {
            None => None,
            Some(steps) if steps <= 0 || steps > Self::MAX_PREDICT => {
                return Err(MovAvgError::InvalidPrediction(steps))
            }
            Some(steps) => Some(
                usize::try_from(steps).map_err(|_| MovAvgError::InvalidPrediction(steps))?,
            ),
        };

        if let Some(reason) = parent.missing_capability() {
            return Err(MovAvgError::UnsupportedParent {
                name: parent.name().to_string(),
                reason: reason.to_string(),
            });
        }

        let buckets_path = BucketsPath::parse(&spec.buckets_path)?;
        let kind: ModelKind = spec.model.parse()?;
        let model = build_model(kind, &spec.settings)?;

        debug!(
            pipeline = %spec.name,
            parent = parent.name(),
            target = %buckets_path,
            model = %kind,
            window,
            gap_policy = %spec.gap_policy,
            predict = ?predict,
            "accepted moving average configuration"
        );

        Ok(PipelineConfig::new(
            spec.name.clone(),
            buckets_path,
            window,
            model,
            spec.gap_policy,
            predict,
        ))
    }

    /// Validate every pipeline attached to one parent.
    ///
    /// Pipeline names must be unique since outputs are written by name.
    pub fn validate_all(
        specs: &[PipelineSpec],
        parent: &ParentAggregation,
    ) -> Result<Vec<PipelineConfig>> {
        let mut seen = HashSet::new();
        specs
            .iter()
            .map(|spec| {
                if !seen.insert(spec.name.as_str()) {
                    return Err(MovAvgError::InvalidParameter(format!(
                        "duplicate pipeline name [{}]",
                        spec.name
                    )));
                }
                Self::validate(spec, parent)
            })
            .collect()
    }
}

/// Build a model from its settings, applying per-model defaults.
fn build_model(kind: ModelKind, settings: &ModelSettings) -> Result<MovAvgModel> {
    let model = match kind {
        ModelKind::Simple => SimpleMovingAverage::new().into(),
        ModelKind::Linear => {
            if settings.legacy_weighting.unwrap_or(false) {
                LinearWeightedAverage::legacy().into()
            } else {
                LinearWeightedAverage::new().into()
            }
        }
        ModelKind::Ewma => SimpleExponentialSmoothing::new(
            settings
                .alpha
                .unwrap_or(SimpleExponentialSmoothing::DEFAULT_ALPHA),
        )?
        .into(),
        ModelKind::Holt => HoltLinearTrend::new(
            settings.alpha.unwrap_or(HoltLinearTrend::DEFAULT_ALPHA),
            settings.beta.unwrap_or(HoltLinearTrend::DEFAULT_BETA),
        )?
        .into(),
        ModelKind::HoltWinters => {
            let period = settings.period.unwrap_or(HoltWinters::DEFAULT_PERIOD as i64);
            if period < 1 {
                return Err(MovAvgError::InvalidParameter(format!(
                    "[period] must be a positive integer; value supplied was [{period}]"
                )));
            }
            let period = usize::try_from(period).map_err(|_| {
                MovAvgError::InvalidParameter(format!("[period] is too large: [{period}]"))
            })?;
            let seasonal_type = match settings.seasonal_type.as_deref() {
                Some(value) => SeasonalType::parse(value)?,
                None => SeasonalType::default(),
            };
            HoltWinters::new(
                settings.alpha.unwrap_or(HoltWinters::DEFAULT_ALPHA),
                settings.beta.unwrap_or(HoltWinters::DEFAULT_BETA),
                settings.gamma.unwrap_or(HoltWinters::DEFAULT_GAMMA),
                period,
                seasonal_type,
            )?
            .with_padding(settings.pad.unwrap_or(true))
            .into()
        }
    };
    Ok(model)
}
