//! # movavg-forecast
//!
//! Windowed moving averages over an ordered sequence of histogram buckets.
//!
//! Five models (simple, linear, EWMA, Holt and Holt-Winters) smooth a
//! sliding window of the most recent bucket values. Buckets without data are
//! skipped or zero-filled according to a gap policy, and a pipeline can
//! forecast a number of synthetic buckets past the end of the series.

#![allow(clippy::needless_range_loop)]

pub mod core;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod utils;

pub use error::{MovAvgError, Result};

pub mod prelude {
    pub use crate::core::{Bucket, BucketKey, BucketSeries, BucketsPath, ParentAggregation};
    pub use crate::error::{MovAvgError, Result};
    pub use crate::models::{MovAvgModel, MovingAverage};
    pub use crate::pipeline::{
        apply_pipelines, GapPolicy, ModelSettings, PipelineConfig, PipelineRunner, PipelineSpec,
        Validator,
    };
}
