//! Trailing-window mean and standard deviation.

/// Arithmetic mean of a slice. Returns NaN for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (denominator n - 1).
///
/// Returns 0.0 for fewer than two samples, so a degenerate window or
/// season reports zero spread instead of a library-level NaN.
pub fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let center = mean(values);
    let sum_squares = values
        .iter()
        .map(|value| (value - center) * (value - center))
        .sum::<f64>();
    (sum_squares / (values.len() - 1) as f64).sqrt()
}

/// Trailing mean/std pairs over a fixed window of consecutive values.
///
/// Position `i` covers `values[i + 1 - window ..= i]`, so each window
/// includes the value at its own position. The first `window - 1`
/// positions have no value since fewer than `window` samples exist.
pub fn rolling_stats(values: &[f64], window: usize) -> Vec<Option<(f64, f64)>> {
    let mut stats = Vec::with_capacity(values.len());
    for i in 0..values.len() {
        if i + 1 < window {
            stats.push(None);
        } else {
            let slice = &values[i + 1 - window..=i];
            stats.push(Some((mean(slice), sample_std(slice))));
        }
    }
    stats
}
