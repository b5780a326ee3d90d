//! Streaming a validated pipeline over an ordered bucket series.

use super::config::PipelineConfig;
use super::gap::Resolved;
use super::window::SlidingWindow;
use crate::core::{Bucket, BucketSeries};
use crate::error::{MovAvgError, Result};
use crate::models::MovingAverage;
use std::collections::HashSet;
use tracing::{debug, trace};

/// Lifecycle of a runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerState {
    /// No bucket seen yet.
    AwaitingBuckets,
    /// At least one real bucket consumed.
    Streaming,
    /// Producing the forecast past the last real bucket.
    Predicting,
    /// Terminal.
    Done,
}

/// Output of one pipeline over one series.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    /// One entry per real bucket; `None` where the bucket was skipped or the
    /// model had too little data.
    pub values: Vec<Option<f64>>,
    /// Forecast for the synthetic buckets, empty unless predictions were
    /// requested and at least one real bucket was seen.
    pub predictions: Vec<f64>,
}

/// Runs one pipeline. Owns its window; nothing is shared between runners.
#[derive(Debug, Clone)]
pub struct PipelineRunner {
    config: PipelineConfig,
    window: SlidingWindow,
    state: RunnerState,
}

impl PipelineRunner {
    pub fn new(config: &PipelineConfig) -> Result<Self> {
        Ok(Self {
            window: SlidingWindow::new(config.window())?,
            config: config.clone(),
            state: RunnerState::AwaitingBuckets,
        })
    }

    pub fn state(&self) -> RunnerState {
        self.state
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn window(&self) -> &SlidingWindow {
        &self.window
    }

    /// Consume the next real bucket and return this pipeline's value for it.
    pub fn push(&mut self, bucket: &Bucket) -> Result<Option<f64>> {
        if bucket.is_synthetic() {
            return Err(MovAvgError::InvalidState(format!(
                "pipeline [{}] received synthetic bucket {}",
                self.config.name(),
                bucket.key()
            )));
        }

        match self.state {
            RunnerState::AwaitingBuckets => {
                debug!(
                    pipeline = self.config.name(),
                    model = self.config.model().name(),
                    window = self.config.window(),
                    "moving average started streaming"
                );
                self.state = RunnerState::Streaming;
            }
            RunnerState::Streaming => {}
            RunnerState::Predicting | RunnerState::Done => {
                return Err(MovAvgError::InvalidState(format!(
                    "pipeline [{}] received bucket {} after the last bucket",
                    self.config.name(),
                    bucket.key()
                )));
            }
        }

        let value = match self
            .config
            .gap_policy()
            .resolve(bucket, self.config.buckets_path())
        {
            Resolved::Skip => {
                trace!(pipeline = self.config.name(), key = %bucket.key(), "skipped gap bucket");
                return Ok(None);
            }
            Resolved::Value(value) => value,
        };

        self.window.offer(value);
        let model = self.config.model();
        let output = model.compute(&self.window.snapshot());
        if output.is_none() {
            trace!(
                pipeline = self.config.name(),
                key = %bucket.key(),
                size = self.window.size(),
                required = model.min_window(),
                "window too small for model"
            );
        }
        Ok(output)
    }

    /// End the stream and produce the forecast, if one was requested.
    ///
    /// A runner that never saw a bucket has nothing to extend and returns no
    /// predictions.
    pub fn finish(&mut self) -> Result<Vec<f64>> {
        let saw_buckets = match self.state {
            RunnerState::AwaitingBuckets => false,
            RunnerState::Streaming => true,
            RunnerState::Predicting | RunnerState::Done => {
                return Err(MovAvgError::InvalidState(format!(
                    "pipeline [{}] already finished",
                    self.config.name()
                )));
            }
        };

        let predictions = match self.config.predict() {
            Some(steps) if saw_buckets => {
                self.state = RunnerState::Predicting;
                let predictions = self
                    .config
                    .model()
                    .predict(&self.window.snapshot(), steps);
                debug!(
                    pipeline = self.config.name(),
                    steps,
                    window_size = self.window.size(),
                    "moving average emitted predictions"
                );
                predictions
            }
            _ => Vec::new(),
        };

        self.state = RunnerState::Done;
        Ok(predictions)
    }

    /// Stream every real bucket of `series`, then finish.
    pub fn run(&mut self, series: &BucketSeries) -> Result<PipelineOutput> {
        let values = series
            .buckets()
            .iter()
            .filter(|b| !b.is_synthetic())
            .map(|b| self.push(b))
            .collect::<Result<Vec<_>>>()?;
        let predictions = self.finish()?;
        Ok(PipelineOutput {
            values,
            predictions,
        })
    }
}

/// Run every pipeline over `series` and merge the outputs into its buckets.
///
/// Each real bucket receives every non-absent pipeline value under the
/// pipeline's name. Predictions are appended as synthetic buckets continuing
/// the key sequence; the k-th synthetic bucket carries the k-th prediction
/// of every pipeline that predicts at least k steps.
pub fn apply_pipelines(series: &BucketSeries, configs: &[PipelineConfig]) -> Result<BucketSeries> {
    let parent = series.parent();
    if let Some(reason) = parent.missing_capability() {
        return Err(MovAvgError::UnsupportedParent {
            name: parent.name().to_string(),
            reason: reason.to_string(),
        });
    }

    let mut names = HashSet::new();
    for config in configs {
        if !names.insert(config.name()) {
            return Err(MovAvgError::InvalidParameter(format!(
                "duplicate pipeline name [{}]",
                config.name()
            )));
        }
    }

    let outputs = configs
        .iter()
        .map(|config| PipelineRunner::new(config)?.run(series))
        .collect::<Result<Vec<_>>>()?;

    let mut merged = series.clone();
    let real_positions: Vec<usize> = merged
        .buckets()
        .iter()
        .enumerate()
        .filter(|(_, b)| !b.is_synthetic())
        .map(|(i, _)| i)
        .collect();

    for (config, output) in configs.iter().zip(&outputs) {
        for (&pos, value) in real_positions.iter().zip(&output.values) {
            if let Some(value) = value {
                merged.buckets_mut()[pos].set_value(config.name(), *value);
            }
        }
    }

    let horizon = outputs
        .iter()
        .map(|o| o.predictions.len())
        .max()
        .unwrap_or(0);
    let (Some(last_key), Some(spacing)) = (series.last_real_key(), parent.spacing()) else {
        return Ok(merged);
    };

    for step in 1..=horizon {
        let key = last_key.offset(spacing, step as i64)?;
        let mut bucket = Bucket::synthetic(key);
        for (config, output) in configs.iter().zip(&outputs) {
            if let Some(&value) = output.predictions.get(step - 1) {
                bucket.set_value(config.name(), value);
            }
        }
        merged.buckets_mut().push(bucket);
    }

    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BucketKey, ParentAggregation};
    use crate::pipeline::{GapPolicy, ModelSettings, PipelineSpec, Validator};
    use approx::assert_relative_eq;

    fn parent() -> ParentAggregation {
        ParentAggregation::histogram("histo", 1)
    }

    fn config(spec: PipelineSpec) -> PipelineConfig {
        Validator::validate(&spec, &parent()).unwrap()
    }

    fn series(values: &[Option<f64>]) -> BucketSeries {
        let buckets = values
            .iter()
            .enumerate()
            .map(|(i, v)| match v {
                Some(v) => Bucket::new(i as i64, 1).with_value("v", *v),
                None => Bucket::new(i as i64, 0),
            })
            .collect();
        BucketSeries::new(parent(), buckets).unwrap()
    }

    #[test]
    fn state_machine_progresses() {
        let cfg = config(PipelineSpec::new("avg", "v", 2).with_predict(1));
        let mut runner = PipelineRunner::new(&cfg).unwrap();
        assert_eq!(runner.state(), RunnerState::AwaitingBuckets);

        runner.push(&Bucket::new(0, 1).with_value("v", 1.0)).unwrap();
        assert_eq!(runner.state(), RunnerState::Streaming);

        assert_eq!(runner.finish().unwrap(), vec![1.0]);
        assert_eq!(runner.state(), RunnerState::Done);
    }

    #[test]
    fn misuse_after_finish_is_rejected() {
        let cfg = config(PipelineSpec::new("avg", "v", 2));
        let mut runner = PipelineRunner::new(&cfg).unwrap();
        runner.finish().unwrap();
        assert!(matches!(
            runner.push(&Bucket::new(0, 1).with_value("v", 1.0)),
            Err(MovAvgError::InvalidState(_))
        ));
        assert!(matches!(runner.finish(), Err(MovAvgError::InvalidState(_))));
    }

    #[test]
    fn skipped_gap_leaves_window_untouched() {
        let cfg = config(PipelineSpec::new("avg", "v", 3));
        let mut runner = PipelineRunner::new(&cfg).unwrap();
        runner.push(&Bucket::new(0, 1).with_value("v", 4.0)).unwrap();
        let before = runner.window().snapshot();
        assert_eq!(runner.push(&Bucket::new(1, 0)).unwrap(), None);
        assert_eq!(runner.window().snapshot(), before);
    }

    #[test]
    fn run_emits_one_value_per_bucket() {
        let cfg = config(PipelineSpec::new("avg", "v", 2));
        let output = PipelineRunner::new(&cfg)
            .unwrap()
            .run(&series(&[Some(2.0), None, Some(4.0), Some(8.0)]))
            .unwrap();
        assert_eq!(output.values, vec![Some(2.0), None, Some(3.0), Some(6.0)]);
        assert!(output.predictions.is_empty());
    }

    #[test]
    fn holt_winters_is_absent_until_two_seasons() {
        let cfg = config(
            PipelineSpec::new("hw", "v", 10)
                .with_model("holt_winters")
                .with_settings(ModelSettings::default().with_period(2)),
        );
        let values: Vec<Option<f64>> = (0..6).map(|i| Some(i as f64 + 1.0)).collect();
        let output = PipelineRunner::new(&cfg).unwrap().run(&series(&values)).unwrap();
        assert_eq!(output.values[..3], [None, None, None]);
        assert!(output.values[3..].iter().all(|v| v.is_some()));
    }

    #[test]
    fn all_gaps_predict_nan() {
        let cfg = config(PipelineSpec::new("avg", "v", 3).with_predict(2));
        let output = PipelineRunner::new(&cfg)
            .unwrap()
            .run(&series(&[None, None]))
            .unwrap();
        assert_eq!(output.values, vec![None, None]);
        assert_eq!(output.predictions.len(), 2);
        assert!(output.predictions.iter().all(|p| p.is_nan()));
    }

    #[test]
    fn no_buckets_no_predictions() {
        let cfg = config(PipelineSpec::new("avg", "v", 3).with_predict(4));
        let empty = BucketSeries::new(parent(), Vec::new()).unwrap();
        let merged = apply_pipelines(&empty, &[cfg]).unwrap();
        assert!(merged.is_empty());
    }

    #[test]
    fn apply_pipelines_appends_synthetic_buckets() {
        let cfg = config(
            PipelineSpec::new("avg", "v", 2)
                .with_gap_policy(GapPolicy::InsertZeros)
                .with_predict(2),
        );
        let merged = apply_pipelines(&series(&[Some(2.0), Some(4.0)]), &[cfg]).unwrap();
        assert_eq!(merged.len(), 4);

        let synthetic = &merged.buckets()[2..];
        assert_eq!(synthetic[0].key(), BucketKey::from(2_i64));
        assert_eq!(synthetic[1].key(), BucketKey::from(3_i64));
        for bucket in synthetic {
            assert!(bucket.is_synthetic());
            assert_eq!(bucket.doc_count(), 0);
            assert_eq!(bucket.value("v"), None);
            assert_relative_eq!(bucket.value("avg").unwrap(), 3.0, epsilon = 1e-12);
        }
        assert_eq!(merged.last_real_key(), Some(BucketKey::from(1_i64)));
    }

    #[test]
    fn apply_pipelines_rejects_duplicate_names() {
        let cfg = config(PipelineSpec::new("avg", "v", 2));
        let err = apply_pipelines(&series(&[Some(1.0)]), &[cfg.clone(), cfg]).unwrap_err();
        assert!(err.is_configuration_error());
    }
}
