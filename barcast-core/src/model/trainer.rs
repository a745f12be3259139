//! Windowed model training — one fresh regression per window size.
//!
//! Each window takes the trailing `w` feature rows of the batch, normalizes
//! and smooths that slice on its own, fits OLS on the normalized
//! `{macd, plusDI, minusDI, ADX}` against `close_smoothed`, and predicts
//! in-sample. A window that cannot be fitted is skipped with a warning; the
//! other windows are unaffected.

use nalgebra::{DMatrix, DVector};
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::config::PipelineConfig;
use crate::domain::{Feature, FeatureRow, PredictionSet, WindowRow};
use crate::error::ProcessingWarning;
use crate::features::{Normalizer, Smoother};
use crate::model::linear::LinearRegression;
use crate::numeric::round2;

/// Predictions for every window that succeeded plus a warning for each one
/// that was skipped, in window order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainingOutcome {
    pub predictions: PredictionSet,
    pub warnings: Vec<ProcessingWarning>,
}

#[derive(Debug, Clone)]
pub struct WindowedModelTrainer {
    window_sizes: Vec<usize>,
    normalizer: Normalizer,
    smoother: Smoother,
    parallel: bool,
}

impl WindowedModelTrainer {
    pub fn new(window_sizes: Vec<usize>, normalizer: Normalizer, smoother: Smoother) -> Self {
        Self {
            window_sizes,
            normalizer,
            smoother,
            parallel: false,
        }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(
            config.window_sizes.clone(),
            Normalizer::new(config.normalize_window),
            Smoother::new(config.smooth_window),
        )
        .with_parallelism(config.parallel_windows)
    }

    /// Fit windows on the rayon pool. Output order and values do not change.
    pub fn with_parallelism(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn train(&self, rows: &[FeatureRow]) -> TrainingOutcome {
        let results: Vec<(usize, Result<Vec<f64>, ProcessingWarning>)> = if self.parallel {
            self.window_sizes
                .par_iter()
                .map(|&w| (w, self.train_window(rows, w)))
                .collect()
        } else {
            self.window_sizes
                .iter()
                .map(|&w| (w, self.train_window(rows, w)))
                .collect()
        };

        let mut outcome = TrainingOutcome::default();
        for (window, result) in results {
            match result {
                Ok(predictions) => {
                    debug!(window, rows = predictions.len(), "window fitted");
                    outcome.predictions.insert(window, predictions);
                }
                Err(warning) => {
                    warn!(window, %warning, "window skipped");
                    outcome.warnings.push(warning);
                }
            }
        }
        outcome
    }

    /// Build the window's rows, fit, and return rounded in-sample predictions.
    pub fn train_window(&self, rows: &[FeatureRow], window: usize) -> Result<Vec<f64>, ProcessingWarning> {
        let window_rows = self.prepare_window(rows, window)?;
        let n = window_rows.len();
        let p = Feature::MODEL_INPUTS.len();

        let x = DMatrix::from_row_iterator(n, p, window_rows.iter().flat_map(|r| r.model_inputs()));
        let y = DVector::from_iterator(n, window_rows.iter().map(|r| r.close_smoothed));

        let mut model = LinearRegression::new();
        model
            .fit(&x, &y)
            .and_then(|_| model.predict(&x))
            .map(|pred| pred.iter().copied().map(round2).collect())
            .map_err(|e| ProcessingWarning::ModelFit {
                window,
                reason: e.to_string(),
            })
    }

    /// Trailing `window` rows with window-relative normalization and smoothing.
    pub fn prepare_window(&self, rows: &[FeatureRow], window: usize) -> Result<Vec<WindowRow>, ProcessingWarning> {
        if rows.len() < window {
            return Err(ProcessingWarning::InsufficientHistory {
                window,
                available: rows.len(),
            });
        }
        let slice = &rows[rows.len() - window..];

        let normalized = self.normalizer.normalize(slice).map_err(|w| w.in_window(window))?;
        let smoothed = self.smoother.smooth(slice).map_err(|w| w.in_window(window))?;

        Ok(slice
            .iter()
            .zip(normalized)
            .zip(smoothed)
            .map(|((&features, normalized), close_smoothed)| WindowRow {
                features,
                normalized,
                close_smoothed,
            })
            .collect())
    }
}

impl Default for WindowedModelTrainer {
    fn default() -> Self {
        Self::from_config(&PipelineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(n: usize) -> Vec<FeatureRow> {
        (0..n)
            .map(|i| {
                let t = i as f64;
                FeatureRow {
                    close: 100.0 + t + (t * 0.7).sin(),
                    macd: (t * 0.3).sin(),
                    plus_di: 20.0 + (t * 0.5).cos() * 5.0,
                    minus_di: 18.0 + (t * 0.4).sin() * 4.0,
                    adx: 25.0 + t * 0.2,
                }
            })
            .collect()
    }

    #[test]
    fn short_batch_only_fits_smallest_window() {
        let outcome = WindowedModelTrainer::default().train(&rows(10));
        assert_eq!(outcome.predictions.windows().collect::<Vec<_>>(), vec![8]);
        assert_eq!(outcome.predictions.get(8).unwrap().len(), 8);
        assert_eq!(outcome.warnings.len(), 4);
        assert_eq!(
            outcome.warnings[0],
            ProcessingWarning::InsufficientHistory {
                window: 13,
                available: 10
            }
        );
    }

    #[test]
    fn long_batch_fits_every_window() {
        let outcome = WindowedModelTrainer::default().train(&rows(60));
        assert!(outcome.warnings.is_empty());
        for w in [8, 13, 20, 25, 50] {
            let preds = outcome.predictions.get(w).unwrap();
            assert_eq!(preds.len(), w);
            assert!(preds.iter().all(|p| p.is_finite() && *p == round2(*p)));
        }
    }

    #[test]
    fn parallel_matches_sequential() {
        let data = rows(55);
        let sequential = WindowedModelTrainer::default().train(&data);
        let parallel = WindowedModelTrainer::default().with_parallelism(true).train(&data);
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn non_finite_feature_skips_only_affected_windows() {
        let mut data = rows(30);
        // Row 5 is only inside the 25-row window.
        data[5].macd = f64::NAN;
        let outcome = WindowedModelTrainer::default().train(&data);
        assert!(outcome.predictions.contains(8));
        assert!(outcome.predictions.contains(20));
        assert!(!outcome.predictions.contains(25));
        assert!(matches!(
            &outcome.warnings[0],
            ProcessingWarning::Window { window: 25, .. }
        ));
    }

    #[test]
    fn window_rows_use_window_relative_scale() {
        let data = rows(30);
        let trainer = WindowedModelTrainer::default();
        let w8 = trainer.prepare_window(&data, 8).unwrap();
        assert_eq!(w8.len(), 8);
        assert_eq!(w8[7].features, data[29]);
        let closes: Vec<f64> = w8.iter().map(|r| r.normalized.close).collect();
        assert!(closes.contains(&0.0) && closes.contains(&1.0));
    }

    #[test]
    fn constant_features_predict_mean_target() {
        // Constant indicators: the fit collapses to the mean of close_smoothed.
        let data: Vec<FeatureRow> = (0..8)
            .map(|_| FeatureRow {
                close: 10.0,
                macd: 0.0,
                plus_di: 0.0,
                minus_di: 0.0,
                adx: 0.0,
            })
            .collect();
        let preds = WindowedModelTrainer::default().train_window(&data, 8).unwrap();
        assert_eq!(preds, vec![10.0; 8]);
    }
}
