//! PredictionSet — per-window in-sample price predictions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Predicted close prices keyed by training window size.
///
/// A window size that was skipped has no entry. Keys serialize as strings
/// (`{"8": [..], "13": [..]}`) and iterate in ascending order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PredictionSet(BTreeMap<usize, Vec<f64>>);

impl PredictionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, window: usize, predictions: Vec<f64>) {
        self.0.insert(window, predictions);
    }

    pub fn get(&self, window: usize) -> Option<&[f64]> {
        self.0.get(&window).map(|v| v.as_slice())
    }

    pub fn contains(&self, window: usize) -> bool {
        self.0.contains_key(&window)
    }

    /// Window sizes that produced predictions, ascending.
    pub fn windows(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
