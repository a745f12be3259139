//! Pipeline error taxonomy.
//!
//! `PipelineError` rejects a whole batch. `ProcessingWarning` skips one unit
//! (a training window, a trade write, a price summary) and processing goes on.

use thiserror::Error;

use crate::validate::ValidationError;

/// Fatal to the batch: nothing is persisted and one error object is emitted.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Non-fatal diagnostic attached to a processed batch.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProcessingWarning {
    #[error("insufficient history for window {window}: {available} rows available")]
    InsufficientHistory { window: usize, available: usize },

    #[error("{stage}: feature '{feature}' is missing or not finite")]
    MissingFeature {
        stage: &'static str,
        feature: &'static str,
    },

    #[error("{stage}: no data to process")]
    EmptyData { stage: &'static str },

    #[error("window {window}: {reason}")]
    Window { window: usize, reason: Box<ProcessingWarning> },

    #[error("window {window}: model fit failed: {reason}")]
    ModelFit { window: usize, reason: String },

    #[error("row {index}: trade not stored: {reason}")]
    TradeNotStored { index: usize, reason: String },

    #[error("{hours}h price summary unavailable: {reason}")]
    SummaryUnavailable { hours: u32, reason: String },
}

impl ProcessingWarning {
    /// Attach the training window a stage-level warning happened in.
    pub fn in_window(self, window: usize) -> Self {
        match self {
            already @ (ProcessingWarning::Window { .. }
            | ProcessingWarning::InsufficientHistory { .. }
            | ProcessingWarning::ModelFit { .. }) => already,
            other => ProcessingWarning::Window {
                window,
                reason: Box::new(other),
            },
        }
    }
}
