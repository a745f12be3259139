//! Rolling-window reductions over series with undefined entries.
//!
//! `rolling_sum` / `rolling_mean` need a full window of defined values;
//! `rolling_mean_min_periods` averages whatever defined values the window
//! holds once there are at least `min_periods` of them.

/// Rolling sum over `window` rows. Undefined unless all `window` values are defined.
pub fn rolling_sum(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let n = values.len();
    let mut result = vec![None; n];
    if window == 0 || n < window {
        return result;
    }

    for i in (window - 1)..n {
        result[i] = values[(i + 1 - window)..=i]
            .iter()
            .copied()
            .sum::<Option<f64>>();
    }

    result
}

/// Rolling mean over `window` rows. Undefined unless all `window` values are defined.
pub fn rolling_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    rolling_sum(values, window)
        .into_iter()
        .map(|sum| sum.map(|s| s / window as f64))
        .collect()
}

/// Rolling mean over up to `window` trailing rows, defined once at least
/// `min_periods` values in the window are defined.
pub fn rolling_mean_min_periods(
    values: &[Option<f64>],
    window: usize,
    min_periods: usize,
) -> Vec<Option<f64>> {
    let n = values.len();
    let mut result = vec![None; n];
    if window == 0 {
        return result;
    }

    for (i, out) in result.iter_mut().enumerate() {
        let start = (i + 1).saturating_sub(window);
        let (count, sum) = values[start..=i]
            .iter()
            .flatten()
            .fold((0usize, 0.0), |(c, s), v| (c + 1, s + v));
        if count >= min_periods.max(1) {
            *out = Some(sum / count as f64);
        }
    }

    result
}
