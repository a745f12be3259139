//! Indicator precomputation for one batch.
//!
//! Every indicator series is computed symbolically (`Option<f64>`), then
//! zero-filled and rounded in one step when the `FeatureRow`s are built.

use tracing::debug;

use crate::components::indicator::Indicator;
use crate::config::PipelineConfig;
use crate::domain::{Bar, FeatureRow};
use crate::indicators::{dmi_series, Macd};
use crate::numeric::{fill_undefined, round2};

/// Computes MACD and the DMI family for a batch.
#[derive(Debug, Clone)]
pub struct IndicatorEngine {
    macd: Macd,
    dmi_period: usize,
}

impl IndicatorEngine {
    pub fn new(macd_fast: usize, macd_slow: usize, dmi_period: usize) -> Self {
        assert!(dmi_period >= 1, "DMI period must be >= 1");
        Self {
            macd: Macd::new(macd_fast, macd_slow),
            dmi_period,
        }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(config.macd_fast, config.macd_slow, config.dmi_period)
    }

    /// One `FeatureRow` per bar. Undefined indicator values become 0, all
    /// indicator columns are rounded to 2 decimals, `close` is kept as-is.
    pub fn compute(&self, bars: &[Bar]) -> Vec<FeatureRow> {
        let macd = self.macd.compute(bars);
        let dmi = dmi_series(bars, self.dmi_period);
        debug_assert_eq!(macd.len(), bars.len());
        debug_assert_eq!(dmi.adx.len(), bars.len());

        let undefined_adx = dmi.adx.iter().filter(|v| v.is_none()).count();
        debug!(
            bars = bars.len(),
            undefined_adx,
            indicator = self.macd.name(),
            "indicators computed"
        );

        let macd = fill_undefined(&macd);
        let plus_di = fill_undefined(&dmi.plus_di);
        let minus_di = fill_undefined(&dmi.minus_di);
        let adx = fill_undefined(&dmi.adx);

        bars.iter()
            .enumerate()
            .map(|(i, bar)| FeatureRow {
                close: bar.close,
                macd: round2(macd[i]),
                plus_di: round2(plus_di[i]),
                minus_di: round2(minus_di[i]),
                adx: round2(adx[i]),
            })
            .collect()
    }
}

impl Default for IndicatorEngine {
    fn default() -> Self {
        Self::from_config(&PipelineConfig::default())
    }
}
