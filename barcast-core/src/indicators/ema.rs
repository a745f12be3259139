//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[t] = alpha * x[t] + (1 - alpha) * EMA[t-1], alpha = 2/(span+1).
//! Seed: EMA[0] = x[0] (no adjusted/centered averaging).
//! Defined from the first row.

/// Compute EMA values from a pre-extracted f64 slice.
///
/// A non-finite input leaves that row and every later row undefined.
pub fn ema_of_series(values: &[f64], span: usize) -> Vec<Option<f64>> {
    let mut result = vec![None; values.len()];
    if span == 0 {
        return result;
    }

    let alpha = 2.0 / (span as f64 + 1.0);
    let mut prev: Option<f64> = None;

    for (out, &x) in result.iter_mut().zip(values) {
        if !x.is_finite() {
            break;
        }
        let ema = match prev {
            None => x,
            Some(p) => alpha * x + (1.0 - alpha) * p,
        };
        *out = Some(ema);
        prev = Some(ema);
    }

    result
}
