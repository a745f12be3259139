//! Batch orchestration: validate, compute indicators, train, signal, persist.
//!
//! `analyze` is pure. `process_value` adds the side effects: one trade write
//! per row and two price-window reads, all non-fatal.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::components::signal::{DmiTrendSignal, SignalGenerator};
use crate::config::{ConfigError, PipelineConfig};
use crate::domain::{Bar, FeatureRow, PredictionSet, PriceWindow, Signal};
use crate::engine::IndicatorEngine;
use crate::error::{PipelineError, ProcessingWarning};
use crate::model::WindowedModelTrainer;
use crate::numeric::round2;
use crate::store::TradeStore;
use crate::validate::validate;

/// Look-back of the short price summary, in hours.
pub const LAST_HOUR: u32 = 1;
/// Look-back of the long price summary, in hours.
pub const LAST_DAY: u32 = 24;

/// Everything computed for a batch before anything is persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub features: Vec<FeatureRow>,
    pub predictions: PredictionSet,
    pub signals: Vec<Signal>,
    pub warnings: Vec<ProcessingWarning>,
}

/// The success object written for one batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchOutput {
    pub predictions: PredictionSet,
    pub signals: Vec<Signal>,
    pub original_data: Value,
    pub last_hour_prices: PriceWindow,
    #[serde(rename = "last24hPrices")]
    pub last_24h_prices: PriceWindow,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport {
    pub output: BatchOutput,
    pub warnings: Vec<ProcessingWarning>,
}

pub struct Pipeline {
    engine: IndicatorEngine,
    trainer: WindowedModelTrainer,
    signals: Box<dyn SignalGenerator>,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(&config))
    }

    fn from_valid_config(config: &PipelineConfig) -> Self {
        Self {
            engine: IndicatorEngine::from_config(config),
            trainer: WindowedModelTrainer::from_config(config),
            signals: Box::new(DmiTrendSignal::new(config.adx_threshold)),
        }
    }

    /// Indicators, per-window predictions and signals for validated bars.
    pub fn analyze(&self, bars: &[Bar]) -> Analysis {
        let features = self.engine.compute(bars);
        let training = self.trainer.train(&features);
        let signals = self.signals.generate(&features);
        debug_assert_eq!(signals.len(), bars.len());
        debug!(
            rows = bars.len(),
            windows = training.predictions.len(),
            generator = self.signals.name(),
            "batch analyzed"
        );

        Analysis {
            features,
            predictions: training.predictions,
            signals,
            warnings: training.warnings,
        }
    }

    /// Parse one input line and process it.
    pub fn process_line(&self, line: &str, store: &mut dyn TradeStore) -> Result<BatchReport, PipelineError> {
        let data: Value = serde_json::from_str(line)?;
        self.process_value(data, store)
    }

    /// Validate, analyze, persist one trade per row and read the price
    /// summaries. Only validation failures are fatal; everything after that
    /// degrades to warnings.
    pub fn process_value(&self, data: Value, store: &mut dyn TradeStore) -> Result<BatchReport, PipelineError> {
        let bars = validate(&data)?;
        let Analysis {
            predictions,
            signals,
            mut warnings,
            ..
        } = self.analyze(&bars);

        for (index, (bar, signal)) in bars.iter().zip(&signals).enumerate() {
            if let Err(e) = store.insert_trade(*signal, round2(bar.close), signal.as_str()) {
                warn!(index, error = %e, "trade not stored");
                warnings.push(ProcessingWarning::TradeNotStored {
                    index,
                    reason: e.to_string(),
                });
            }
        }

        let last_hour_prices = price_window(store, LAST_HOUR, &mut warnings);
        let last_24h_prices = price_window(store, LAST_DAY, &mut warnings);

        info!(
            rows = bars.len(),
            windows = predictions.len(),
            warnings = warnings.len(),
            "batch processed"
        );

        Ok(BatchReport {
            output: BatchOutput {
                predictions,
                signals,
                original_data: data,
                last_hour_prices,
                last_24h_prices,
            },
            warnings,
        })
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::from_valid_config(&PipelineConfig::default())
    }
}

fn price_window(store: &dyn TradeStore, hours: u32, warnings: &mut Vec<ProcessingWarning>) -> PriceWindow {
    store.first_last(hours).unwrap_or_else(|e| {
        warn!(hours, error = %e, "price summary unavailable");
        warnings.push(ProcessingWarning::SummaryUnavailable {
            hours,
            reason: e.to_string(),
        });
        PriceWindow::default()
    })
}
