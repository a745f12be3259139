//! Concrete indicator implementations.
//!
//! `Macd` and `Atr` implement the `Indicator` trait from
//! `components::indicator`. The DMI family shares its intermediate sums, so
//! `dmi_series` computes +DI, -DI, DX and ADX together in one pass.

pub mod atr;
pub mod dmi;
pub mod ema;
pub mod macd;
pub mod rolling;

pub use atr::Atr;
pub use dmi::{dmi_series, DmiSeries};
pub use macd::Macd;

/// Create synthetic bars from close prices for testing.
///
/// high = max(prev_close, close) + 1.0, low = min(prev_close, close) - 1.0,
/// with prev_close = close on the first bar.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<crate::domain::Bar> {
    use crate::domain::Bar;
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let prev = if i == 0 { close } else { closes[i - 1] };
            Bar::new(close, prev.max(close) + 1.0, prev.min(close) - 1.0)
        })
        .collect()
}

/// Create bars from explicit (high, low, close) triples.
#[cfg(test)]
pub fn make_hlc_bars(data: &[(f64, f64, f64)]) -> Vec<crate::domain::Bar> {
    use crate::domain::Bar;
    data.iter()
        .map(|&(high, low, close)| Bar::new(close, high, low))
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
