//! Rolling mean of close, used as the regression target.

use tracing::debug;

use crate::config::DEFAULT_SMOOTH_WINDOW;
use crate::domain::{Feature, FeatureRow};
use crate::error::ProcessingWarning;
use crate::indicators::rolling::rolling_mean_min_periods;
use crate::numeric::round2;

const STAGE: &str = "smooth";

#[derive(Debug, Clone)]
pub struct Smoother {
    pub window: usize,
}

impl Smoother {
    pub fn new(window: usize) -> Self {
        assert!(window >= 1, "smooth window must be >= 1");
        Self { window }
    }

    /// `close_smoothed` per row: mean of up to `window` trailing closes
    /// (partial windows allowed), rounded to 2 decimals.
    pub fn smooth(&self, rows: &[FeatureRow]) -> Result<Vec<f64>, ProcessingWarning> {
        if rows.is_empty() {
            return Err(ProcessingWarning::EmptyData { stage: STAGE });
        }
        let closes: Vec<Option<f64>> = rows
            .iter()
            .map(|r| r.close.is_finite().then_some(r.close))
            .collect();
        if closes.iter().any(Option::is_none) {
            return Err(ProcessingWarning::MissingFeature {
                stage: STAGE,
                feature: Feature::Close.name(),
            });
        }

        let smoothed = rolling_mean_min_periods(&closes, self.window, 1)
            .into_iter()
            .map(|v| v.map(round2))
            .collect::<Option<Vec<f64>>>()
            .ok_or(ProcessingWarning::MissingFeature {
                stage: STAGE,
                feature: Feature::CloseSmoothed.name(),
            })?;

        debug!(rows = rows.len(), window = self.window, "smoothed close");
        Ok(smoothed)
    }
}

impl Default for Smoother {
    fn default() -> Self {
        Self::new(DEFAULT_SMOOTH_WINDOW)
    }
}
