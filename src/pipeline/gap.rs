//! Gap policy: what to feed the window for buckets without data.

use crate::core::{Bucket, BucketsPath};
use serde::{Deserialize, Serialize};

/// Rule for buckets whose target value is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapPolicy {
    /// Leave the window untouched and emit no value for the bucket.
    #[default]
    #[serde(alias = "SKIP")]
    Skip,
    /// Feed 0.0 into the window as if it had been observed.
    #[serde(alias = "INSERT_ZEROS")]
    InsertZeros,
}

/// Outcome of resolving one bucket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolved {
    /// Value to admit into the window.
    Value(f64),
    /// Bucket is absent for this pipeline.
    Skip,
}

impl GapPolicy {
    /// Resolve the effective value of `bucket` for `path`.
    ///
    /// A bucket is a gap when it has no documents or when its target metric
    /// is missing or not finite. The `_count` pseudo-field is never a gap: an empty
    /// bucket simply counts zero documents.
    pub fn resolve(&self, bucket: &Bucket, path: &BucketsPath) -> Resolved {
        let raw = match path {
            BucketsPath::DocCount => return Resolved::Value(bucket.doc_count() as f64),
            BucketsPath::Metric(_) if bucket.doc_count() == 0 => None,
            BucketsPath::Metric(_) => path.lookup(bucket).filter(|v| v.is_finite()),
        };

        match (raw, self) {
            (Some(value), _) => Resolved::Value(value),
            (None, GapPolicy::Skip) => Resolved::Skip,
            (None, GapPolicy::InsertZeros) => Resolved::Value(0.0),
        }
    }
}

impl std::fmt::Display for GapPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GapPolicy::Skip => f.write_str("skip"),
            GapPolicy::InsertZeros => f.write_str("insert_zeros"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metric() -> BucketsPath {
        BucketsPath::Metric("the_metric".to_string())
    }

    #[test]
    fn populated_bucket_yields_its_metric() {
        let bucket = Bucket::new(0, 3).with_value("the_metric", 4.5);
        assert_eq!(GapPolicy::Skip.resolve(&bucket, &metric()), Resolved::Value(4.5));
        assert_eq!(
            GapPolicy::InsertZeros.resolve(&bucket, &metric()),
            Resolved::Value(4.5)
        );
    }

    #[test]
    fn empty_bucket_is_skipped() {
        let bucket = Bucket::new(0, 0);
        assert_eq!(GapPolicy::Skip.resolve(&bucket, &metric()), Resolved::Skip);
    }

    #[test]
    fn empty_bucket_becomes_zero() {
        let bucket = Bucket::new(0, 0);
        assert_eq!(
            GapPolicy::InsertZeros.resolve(&bucket, &metric()),
            Resolved::Value(0.0)
        );
    }

    #[test]
    fn stale_metric_on_empty_bucket_is_ignored() {
        let bucket = Bucket::new(0, 0).with_value("the_metric", 12.0);
        assert_eq!(GapPolicy::Skip.resolve(&bucket, &metric()), Resolved::Skip);
    }

    #[test]
    fn missing_or_nan_metric_is_a_gap() {
        let missing = Bucket::new(0, 2);
        let nan = Bucket::new(0, 2).with_value("the_metric", f64::NAN);
        assert_eq!(GapPolicy::Skip.resolve(&missing, &metric()), Resolved::Skip);
        assert_eq!(
            GapPolicy::InsertZeros.resolve(&nan, &metric()),
            Resolved::Value(0.0)
        );
    }

    #[test]
    fn infinite_metric_is_a_gap() {
        for value in [f64::INFINITY, f64::NEG_INFINITY] {
            let bucket = Bucket::new(0, 2).with_value("the_metric", value);
            assert_eq!(GapPolicy::Skip.resolve(&bucket, &metric()), Resolved::Skip);
            assert_eq!(
                GapPolicy::InsertZeros.resolve(&bucket, &metric()),
                Resolved::Value(0.0)
            );
        }
    }

    #[test]
    fn doc_count_is_never_a_gap() {
        let bucket = Bucket::new(0, 0);
        assert_eq!(
            GapPolicy::Skip.resolve(&bucket, &BucketsPath::DocCount),
            Resolved::Value(0.0)
        );
        let bucket = Bucket::new(0, 7);
        assert_eq!(
            GapPolicy::Skip.resolve(&bucket, &BucketsPath::DocCount),
            Resolved::Value(7.0)
        );
    }

    #[test]
    fn policy_deserializes_from_both_spellings() {
        let lower: GapPolicy = serde_json::from_str(r#""insert_zeros""#).unwrap();
        let upper: GapPolicy = serde_json::from_str(r#""SKIP""#).unwrap();
        assert_eq!(lower, GapPolicy::InsertZeros);
        assert_eq!(upper, GapPolicy::Skip);
        assert!(serde_json::from_str::<GapPolicy>(r#""interpolate""#).is_err());
    }
}
