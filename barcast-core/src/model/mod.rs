//! Regression models and the per-window trainer.

pub mod linear;
pub mod trainer;

pub use linear::{LinearRegression, LinearRegressionError};
pub use trainer::{TrainingOutcome, WindowedModelTrainer};
