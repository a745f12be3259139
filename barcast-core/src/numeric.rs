//! Numeric policies shared by every stage: rounding and undefined-value fill.

/// Round to 2 decimals, ties to even on the scaled value.
///
/// `round2(0.125) == 0.12`, `round2(0.375) == 0.38`.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Replace undefined entries with 0.
///
/// This is the single point where warmup rows and zero-denominator ratios
/// become numbers. Indicator code never produces NaN for these cases.
pub fn fill_undefined(series: &[Option<f64>]) -> Vec<f64> {
    series.iter().map(|v| v.unwrap_or(0.0)).collect()
}
