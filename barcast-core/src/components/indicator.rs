//! Indicator trait.
//!
//! Indicators are pure functions: bar history in, numeric series out.
//! Undefined outputs (warmup rows, zero denominators) are `None`; the
//! caller decides how to fill them.

use crate::domain::Bar;

/// Trait for indicators.
///
/// Indicators take a full bar series and produce an output series of the same
/// length. The first `lookback()` values are `None` (warmup).
///
/// # Look-ahead guard
/// No indicator value at bar t may depend on data from bar t+1 or later, so
/// computing on a truncated batch yields a prefix of the full result.
pub trait Indicator: Send + Sync {
    /// Human-readable name (e.g., "ema_12", "adx_14").
    fn name(&self) -> &str;

    /// Number of leading rows that are always undefined.
    fn lookback(&self) -> usize;

    /// Compute the indicator for the entire bar series.
    fn compute(&self, bars: &[Bar]) -> Vec<Option<f64>>;
}
