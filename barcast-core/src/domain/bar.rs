//! Bar — one market observation as it arrives on the input stream.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single bar with the three price fields the pipeline needs.
///
/// Any other fields present on the input object (timestamps, volume, symbol)
/// are carried untouched in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub close: f64,
    pub high: f64,
    pub low: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Bar {
    pub fn new(close: f64, high: f64, low: f64) -> Self {
        Self {
            close,
            high,
            low,
            extra: Map::new(),
        }
    }
}
