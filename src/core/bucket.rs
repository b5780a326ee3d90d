//! Histogram buckets and the keys that order them.

use crate::error::{MovAvgError, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Ordered key of a bucket: a numeric histogram key or a timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BucketKey {
    /// Numeric histogram key.
    Integer(i64),
    /// Date histogram key.
    Time(DateTime<Utc>),
}

/// Fixed distance between two consecutive bucket keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySpacing {
    /// Numeric histogram interval.
    Integer(i64),
    /// Date histogram interval.
    Time(Duration),
}

impl KeySpacing {
    /// Whether the spacing moves keys forward.
    pub fn is_positive(&self) -> bool {
        match self {
            KeySpacing::Integer(step) => *step > 0,
            KeySpacing::Time(step) => *step > Duration::zero(),
        }
    }

    /// Whether this spacing can be applied to `key`.
    pub fn matches(&self, key: &BucketKey) -> bool {
        matches!(
            (self, key),
            (KeySpacing::Integer(_), BucketKey::Integer(_))
                | (KeySpacing::Time(_), BucketKey::Time(_))
        )
    }
}

impl BucketKey {
    /// Key `steps` intervals after this one.
    pub fn offset(&self, spacing: KeySpacing, steps: i64) -> Result<BucketKey> {
        let overflow = || MovAvgError::KeyMismatch(format!("key {self} overflows after {steps} steps"));
        match (self, spacing) {
            (BucketKey::Integer(key), KeySpacing::Integer(step)) => step
                .checked_mul(steps)
                .and_then(|delta| key.checked_add(delta))
                .map(BucketKey::Integer)
                .ok_or_else(overflow),
            (BucketKey::Time(key), KeySpacing::Time(step)) => {
                let secs = step.num_seconds().checked_mul(steps).ok_or_else(overflow)?;
                let nanos = i64::from(step.subsec_nanos())
                    .checked_mul(steps)
                    .ok_or_else(overflow)?;
                let delta = Duration::new(secs, 0)
                    .and_then(|d| d.checked_add(&Duration::nanoseconds(nanos)))
                    .ok_or_else(overflow)?;
                key.checked_add_signed(delta)
                    .map(BucketKey::Time)
                    .ok_or_else(overflow)
            }
            _ => Err(MovAvgError::KeyMismatch(format!(
                "spacing {spacing:?} cannot be applied to key {self}"
            ))),
        }
    }

    fn same_kind(&self, other: &BucketKey) -> bool {
        matches!(
            (self, other),
            (BucketKey::Integer(_), BucketKey::Integer(_)) | (BucketKey::Time(_), BucketKey::Time(_))
        )
    }
}

/// Keys of different kinds are unordered.
impl PartialOrd for BucketKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if !self.same_kind(other) {
            return None;
        }
        match (self, other) {
            (BucketKey::Integer(a), BucketKey::Integer(b)) => a.partial_cmp(b),
            (BucketKey::Time(a), BucketKey::Time(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

impl std::fmt::Display for BucketKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BucketKey::Integer(key) => write!(f, "{key}"),
            BucketKey::Time(key) => write!(f, "{}", key.to_rfc3339()),
        }
    }
}

impl From<i64> for BucketKey {
    fn from(key: i64) -> Self {
        BucketKey::Integer(key)
    }
}

impl From<DateTime<Utc>> for BucketKey {
    fn from(key: DateTime<Utc>) -> Self {
        BucketKey::Time(key)
    }
}

/// One bucket of the parent aggregation.
///
/// `values` holds the named sub-aggregation results (metrics computed by the
/// parent, and moving averages injected by pipelines). Synthetic buckets are
/// appended by predictions and never carry the parent's own metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    key: BucketKey,
    doc_count: u64,
    #[serde(default)]
    values: BTreeMap<String, f64>,
    #[serde(default)]
    synthetic: bool,
}

impl Bucket {
    /// Create a bucket with no sub-aggregation values.
    pub fn new(key: impl Into<BucketKey>, doc_count: u64) -> Self {
        Self {
            key: key.into(),
            doc_count,
            values: BTreeMap::new(),
            synthetic: false,
        }
    }

    /// Attach a named sub-aggregation value.
    pub fn with_value(mut self, name: impl Into<String>, value: f64) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    pub(crate) fn synthetic(key: BucketKey) -> Self {
        Self {
            key,
            doc_count: 0,
            values: BTreeMap::new(),
            synthetic: true,
        }
    }

    pub fn key(&self) -> BucketKey {
        self.key
    }

    pub fn doc_count(&self) -> u64 {
        self.doc_count
    }

    /// Named sub-aggregation value, if present.
    pub fn value(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn values(&self) -> &BTreeMap<String, f64> {
        &self.values
    }

    /// Whether the bucket was produced by a prediction.
    pub fn is_synthetic(&self) -> bool {
        self.synthetic
    }

    pub(crate) fn set_value(&mut self, name: &str, value: f64) {
        self.values.insert(name.to_string(), value);
    }
}

/// Target of a pipeline inside each bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BucketsPath {
    /// The `_count` pseudo-field: the bucket's document count.
    DocCount,
    /// A named metric sub-aggregation.
    Metric(String),
}

impl BucketsPath {
    /// Path naming the document count.
    pub const DOC_COUNT: &'static str = "_count";

    /// Parse a `buckets_path` string.
    pub fn parse(path: &str) -> Result<Self> {
        let path = path.trim();
        if path.is_empty() {
            return Err(MovAvgError::InvalidParameter(
                "[buckets_path] must name a metric or _count".to_string(),
            ));
        }
        if path == Self::DOC_COUNT {
            Ok(BucketsPath::DocCount)
        } else {
            Ok(BucketsPath::Metric(path.to_string()))
        }
    }

    /// Raw value of this path in `bucket`, before gap resolution.
    pub fn lookup(&self, bucket: &Bucket) -> Option<f64> {
        match self {
            BucketsPath::DocCount => Some(bucket.doc_count() as f64),
            BucketsPath::Metric(name) => bucket.value(name),
        }
    }
}

impl std::fmt::Display for BucketsPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BucketsPath::DocCount => f.write_str(Self::DOC_COUNT),
            BucketsPath::Metric(name) => f.write_str(name),
        }
    }
}
