//! Feature rows — the per-bar indicator values fed to the models and signals.
//!
//! `FeatureRow` is produced once per batch by the indicator engine.
//! `WindowRow` exists only inside one training window: normalization is
//! relative to the window slice, so two windows never share `WindowRow`s.

use serde::{Deserialize, Serialize};

/// A named feature column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Macd,
    PlusDi,
    MinusDi,
    Adx,
    Close,
    CloseSmoothed,
}

impl Feature {
    /// Columns min-max scaled by the normalizer, in storage order.
    pub const NORMALIZED: [Feature; 5] = [
        Feature::Macd,
        Feature::PlusDi,
        Feature::MinusDi,
        Feature::Adx,
        Feature::Close,
    ];

    /// Regression inputs, in design-matrix column order.
    pub const MODEL_INPUTS: [Feature; 4] =
        [Feature::Macd, Feature::PlusDi, Feature::MinusDi, Feature::Adx];

    pub fn name(&self) -> &'static str {
        match self {
            Feature::Macd => "macd",
            Feature::PlusDi => "plusDI",
            Feature::MinusDi => "minusDI",
            Feature::Adx => "ADX",
            Feature::Close => "close",
            Feature::CloseSmoothed => "close_smoothed",
        }
    }
}

/// Indicator values for one bar, undefined values already zero-filled and
/// everything except `close` rounded to 2 decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    pub close: f64,
    pub macd: f64,
    #[serde(rename = "plusDI")]
    pub plus_di: f64,
    #[serde(rename = "minusDI")]
    pub minus_di: f64,
    #[serde(rename = "ADX")]
    pub adx: f64,
}

impl FeatureRow {
    /// Value of a raw feature column. `CloseSmoothed` is not a raw column
    /// and yields `None`.
    pub fn get(&self, feature: Feature) -> Option<f64> {
        match feature {
            Feature::Macd => Some(self.macd),
            Feature::PlusDi => Some(self.plus_di),
            Feature::MinusDi => Some(self.minus_di),
            Feature::Adx => Some(self.adx),
            Feature::Close => Some(self.close),
            Feature::CloseSmoothed => None,
        }
    }
}

/// Min-max scaled copies of the normalized columns.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NormalizedRow {
    pub macd: f64,
    #[serde(rename = "plusDI")]
    pub plus_di: f64,
    #[serde(rename = "minusDI")]
    pub minus_di: f64,
    #[serde(rename = "ADX")]
    pub adx: f64,
    pub close: f64,
}

impl NormalizedRow {
    pub fn get(&self, feature: Feature) -> Option<f64> {
        match feature {
            Feature::Macd => Some(self.macd),
            Feature::PlusDi => Some(self.plus_di),
            Feature::MinusDi => Some(self.minus_di),
            Feature::Adx => Some(self.adx),
            Feature::Close => Some(self.close),
            Feature::CloseSmoothed => None,
        }
    }

    pub fn set(&mut self, feature: Feature, value: f64) {
        match feature {
            Feature::Macd => self.macd = value,
            Feature::PlusDi => self.plus_di = value,
            Feature::MinusDi => self.minus_di = value,
            Feature::Adx => self.adx = value,
            Feature::Close => self.close = value,
            Feature::CloseSmoothed => {}
        }
    }
}

/// One row of a training window: raw features, their window-relative
/// normalized copies and the smoothed close used as regression target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowRow {
    pub features: FeatureRow,
    pub normalized: NormalizedRow,
    pub close_smoothed: f64,
}

impl WindowRow {
    /// Regression inputs in `Feature::MODEL_INPUTS` order.
    pub fn model_inputs(&self) -> [f64; 4] {
        [
            self.normalized.macd,
            self.normalized.plus_di,
            self.normalized.minus_di,
            self.normalized.adx,
        ]
    }
}
