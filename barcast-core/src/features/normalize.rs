//! Min-max scaling of the model feature columns.

use tracing::debug;

use crate::config::DEFAULT_NORMALIZE_WINDOW;
use crate::domain::{Feature, FeatureRow, NormalizedRow};
use crate::error::ProcessingWarning;
use crate::numeric::round2;

const STAGE: &str = "normalize";

/// Scales `macd`, `plusDI`, `minusDI`, `ADX` and `close` into `[0, 1]`.
///
/// Min and max are taken over the trailing `window` rows together with the
/// whole batch, then applied to every row. A column whose range is zero
/// scales to 0.
#[derive(Debug, Clone)]
pub struct Normalizer {
    pub window: usize,
}

impl Normalizer {
    pub fn new(window: usize) -> Self {
        assert!(window >= 1, "normalize window must be >= 1");
        Self { window }
    }

    pub fn normalize(&self, rows: &[FeatureRow]) -> Result<Vec<NormalizedRow>, ProcessingWarning> {
        if rows.is_empty() {
            return Err(ProcessingWarning::EmptyData { stage: STAGE });
        }

        let tail = &rows[rows.len().saturating_sub(self.window)..];
        let mut normalized = vec![NormalizedRow::default(); rows.len()];

        for feature in Feature::NORMALIZED {
            let column = column(rows, feature)?;
            let (min, max) = tail
                .iter()
                .filter_map(|r| r.get(feature))
                .chain(column.iter().copied())
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                    (lo.min(v), hi.max(v))
                });
            let range = max - min;

            for (out, value) in normalized.iter_mut().zip(&column) {
                let scaled = if range > 0.0 { (value - min) / range } else { 0.0 };
                out.set(feature, round2(scaled));
            }
        }

        debug!(rows = rows.len(), window = self.window, "normalized features");
        Ok(normalized)
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(DEFAULT_NORMALIZE_WINDOW)
    }
}

fn column(rows: &[FeatureRow], feature: Feature) -> Result<Vec<f64>, ProcessingWarning> {
    rows.iter()
        .map(|row| {
            row.get(feature)
                .filter(|v| v.is_finite())
                .ok_or(ProcessingWarning::MissingFeature {
                    stage: STAGE,
                    feature: feature.name(),
                })
        })
        .collect()
}
