//! Statistical helpers shared by the window models.

/// Calculate the mean of a slice.
///
/// Returns NaN for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Weighted mean where the `i`-th value (1-based) has weight `i`.
///
/// `base_weight` is added to the denominator before any value is seen.
pub fn linearly_weighted_mean(values: &[f64], base_weight: f64) -> f64 {
    let mut weighted = 0.0;
    let mut total_weight = base_weight;
    for (i, &v) in values.iter().enumerate() {
        let weight = (i + 1) as f64;
        weighted += v * weight;
        total_weight += weight;
    }
    weighted / total_weight
}
