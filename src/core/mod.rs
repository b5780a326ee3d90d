//! Core data structures for bucketed series.

mod bucket;
mod series;

pub use bucket::{Bucket, BucketKey, BucketsPath, KeySpacing};
pub use series::{BucketSeries, ParentAggregation};
