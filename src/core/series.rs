//! The parent aggregation and its merged, ordered bucket sequence.

use super::bucket::{Bucket, BucketKey, KeySpacing};
use crate::error::{MovAvgError, Result};
use chrono::Duration;

/// Capabilities advertised by the bucketing aggregation a pipeline attaches to.
///
/// A moving average needs a parent that is *sequential*: its buckets are
/// strictly ordered by key, empty buckets are materialized instead of being
/// dropped, and keys are evenly spaced so predictions can extend the series.
#[derive(Debug, Clone, PartialEq)]
pub struct ParentAggregation {
    name: String,
    strictly_ordered: bool,
    gap_aware: bool,
    spacing: Option<KeySpacing>,
}

impl ParentAggregation {
    /// Parent with no capabilities.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            strictly_ordered: false,
            gap_aware: false,
            spacing: None,
        }
    }

    /// Numeric histogram with a fixed interval and empty buckets filled in.
    pub fn histogram(name: impl Into<String>, interval: i64) -> Self {
        Self::new(name)
            .with_ordering(true)
            .with_gap_filling(true)
            .with_spacing(KeySpacing::Integer(interval))
    }

    /// Date histogram with a fixed interval and empty buckets filled in.
    pub fn date_histogram(name: impl Into<String>, interval: Duration) -> Self {
        Self::new(name)
            .with_ordering(true)
            .with_gap_filling(true)
            .with_spacing(KeySpacing::Time(interval))
    }

    /// Range aggregation: buckets are user-defined and may overlap.
    pub fn range(name: impl Into<String>) -> Self {
        Self::new(name)
    }

    pub fn with_ordering(mut self, strictly_ordered: bool) -> Self {
        self.strictly_ordered = strictly_ordered;
        self
    }

    pub fn with_gap_filling(mut self, gap_aware: bool) -> Self {
        self.gap_aware = gap_aware;
        self
    }

    pub fn with_spacing(mut self, spacing: KeySpacing) -> Self {
        self.spacing = Some(spacing);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_strictly_ordered(&self) -> bool {
        self.strictly_ordered
    }

    pub fn is_gap_aware(&self) -> bool {
        self.gap_aware
    }

    pub fn spacing(&self) -> Option<KeySpacing> {
        self.spacing
    }

    /// The first missing capability, if any.
    pub fn missing_capability(&self) -> Option<&'static str> {
        if !self.strictly_ordered {
            return Some("buckets are not strictly ordered by key");
        }
        if !self.gap_aware {
            return Some("empty buckets are not materialized");
        }
        match self.spacing {
            None => Some("bucket keys have no fixed spacing"),
            Some(spacing) if !spacing.is_positive() => Some("bucket key spacing must be positive"),
            Some(_) => None,
        }
    }

    /// Whether the parent can feed a moving average.
    pub fn is_sequential(&self) -> bool {
        self.missing_capability().is_none()
    }
}

/// Fully merged bucket sequence of one parent aggregation.
///
/// Construction checks that keys are strictly ascending and of a single
/// kind; a shard-local or partially merged sequence fails here before any
/// window is touched.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketSeries {
    parent: ParentAggregation,
    buckets: Vec<Bucket>,
}

impl BucketSeries {
    pub fn new(parent: ParentAggregation, buckets: Vec<Bucket>) -> Result<Self> {
        for (index, pair) in buckets.windows(2).enumerate() {
            let (prev, next) = (pair[0].key(), pair[1].key());
            match prev.partial_cmp(&next) {
                Some(std::cmp::Ordering::Less) => {}
                Some(_) => return Err(MovAvgError::UnorderedBuckets { index: index + 1 }),
                None => {
                    return Err(MovAvgError::KeyMismatch(format!(
                        "bucket {} has key {next} of a different kind than {prev}",
                        index + 1
                    )))
                }
            }
        }

        if let (Some(spacing), Some(first)) = (parent.spacing(), buckets.first()) {
            if !spacing.matches(&first.key()) {
                return Err(MovAvgError::KeyMismatch(format!(
                    "parent [{}] spacing {spacing:?} does not match key {}",
                    parent.name(),
                    first.key()
                )));
            }
        }

        Ok(Self { parent, buckets })
    }

    pub fn parent(&self) -> &ParentAggregation {
        &self.parent
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Key of the last bucket that came from the parent.
    pub fn last_real_key(&self) -> Option<BucketKey> {
        self.buckets
            .iter()
            .rev()
            .find(|b| !b.is_synthetic())
            .map(|b| b.key())
    }

    pub fn into_buckets(self) -> Vec<Bucket> {
        self.buckets
    }

    pub(crate) fn buckets_mut(&mut self) -> &mut Vec<Bucket> {
        &mut self.buckets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn histogram_is_sequential() {
        assert!(ParentAggregation::histogram("histo", 5).is_sequential());
        assert!(ParentAggregation::date_histogram("dates", Duration::days(1)).is_sequential());
    }

    #[test]
    fn range_is_not_sequential() {
        let parent = ParentAggregation::range("ranges");
        assert!(!parent.is_sequential());
        assert_eq!(
            parent.missing_capability(),
            Some("buckets are not strictly ordered by key")
        );
    }

    #[test]
    fn capability_checks_are_explicit() {
        let no_gaps = ParentAggregation::new("terms").with_ordering(true);
        assert_eq!(
            no_gaps.missing_capability(),
            Some("empty buckets are not materialized")
        );

        let no_spacing = no_gaps.clone().with_gap_filling(true);
        assert_eq!(
            no_spacing.missing_capability(),
            Some("bucket keys have no fixed spacing")
        );

        let backwards = no_spacing.with_spacing(KeySpacing::Integer(-1));
        assert!(!backwards.is_sequential());
    }

    #[test]
    fn series_accepts_ascending_keys() {
        let buckets = (-2..3).map(|k| Bucket::new(k, 1)).collect();
        let series = BucketSeries::new(ParentAggregation::histogram("h", 1), buckets).unwrap();
        assert_eq!(series.len(), 5);
        assert_eq!(series.last_real_key(), Some(BucketKey::Integer(2)));
    }

    #[test]
    fn series_rejects_unordered_keys() {
        let buckets = vec![Bucket::new(0, 1), Bucket::new(10, 1), Bucket::new(5, 1)];
        let err = BucketSeries::new(ParentAggregation::histogram("h", 5), buckets).unwrap_err();
        assert_eq!(err, MovAvgError::UnorderedBuckets { index: 2 });
    }

    #[test]
    fn series_rejects_duplicate_keys() {
        let buckets = vec![Bucket::new(0, 1), Bucket::new(0, 2)];
        assert!(BucketSeries::new(ParentAggregation::histogram("h", 5), buckets).is_err());
    }

    #[test]
    fn series_rejects_mixed_key_kinds() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let buckets = vec![Bucket::new(0, 1), Bucket::new(ts, 1)];
        let err = BucketSeries::new(ParentAggregation::histogram("h", 5), buckets).unwrap_err();
        assert!(matches!(err, MovAvgError::KeyMismatch(_)));
    }

    #[test]
    fn series_rejects_spacing_of_wrong_kind() {
        let buckets = vec![Bucket::new(0, 1)];
        let parent = ParentAggregation::date_histogram("dates", Duration::hours(1));
        assert!(BucketSeries::new(parent, buckets).is_err());
    }

    #[test]
    fn empty_series_is_valid() {
        let series = BucketSeries::new(ParentAggregation::histogram("h", 5), Vec::new()).unwrap();
        assert!(series.is_empty());
        assert_eq!(series.last_real_key(), None);
    }
}
