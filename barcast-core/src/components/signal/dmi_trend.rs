//! DMI trend signal — directional bias gated by ADX, with crossover detection.
//!
//! Base call: Long when +DI > -DI and ADX is above the threshold, Short when
//! -DI > +DI and ADX is above the threshold, None otherwise.
//! A strict sign flip of (+DI − -DI) against the previous row overrides the
//! base call with Crossover.

use crate::config::DEFAULT_ADX_THRESHOLD;
use crate::domain::{FeatureRow, Signal};

use super::SignalGenerator;

/// DMI/ADX trend-and-crossover signal generator.
///
/// # Indicator dependencies
/// Reads `plus_di`, `minus_di` and `adx` from each `FeatureRow`.
#[derive(Debug, Clone)]
pub struct DmiTrendSignal {
    pub adx_threshold: f64,
}

impl DmiTrendSignal {
    pub fn new(adx_threshold: f64) -> Self {
        assert!(adx_threshold.is_finite(), "adx_threshold must be finite");
        Self { adx_threshold }
    }

    pub fn default_params() -> Self {
        Self::new(DEFAULT_ADX_THRESHOLD)
    }

    fn base_signal(&self, row: &FeatureRow) -> Signal {
        if row.adx <= self.adx_threshold {
            return Signal::None;
        }
        if row.plus_di > row.minus_di {
            Signal::Long
        } else if row.minus_di > row.plus_di {
            Signal::Short
        } else {
            Signal::None
        }
    }
}

/// True when the ordering of +DI and -DI strictly reversed between rows.
fn crossed(prev_plus: f64, prev_minus: f64, plus: f64, minus: f64) -> bool {
    (prev_plus < prev_minus && plus > minus) || (prev_plus > prev_minus && plus < minus)
}

impl SignalGenerator for DmiTrendSignal {
    fn name(&self) -> &str {
        "dmi_trend"
    }

    fn generate(&self, rows: &[FeatureRow]) -> Vec<Signal> {
        let Some(first) = rows.first() else {
            return Vec::new();
        };

        let mut prev_plus = first.plus_di;
        let mut prev_minus = first.minus_di;
        let mut signals = Vec::with_capacity(rows.len());

        for (i, row) in rows.iter().enumerate() {
            // Row 0 has no trend history to compare against.
            let signal = if i == 0 {
                Signal::None
            } else if crossed(prev_plus, prev_minus, row.plus_di, row.minus_di) {
                Signal::Crossover
            } else {
                self.base_signal(row)
            };
            signals.push(signal);
            prev_plus = row.plus_di;
            prev_minus = row.minus_di;
        }

        signals
    }
}
