//! Trade — one persisted (signal, price) observation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::signal::Signal;

/// A stored trade row.
///
/// `timestamp` is the time the store accepted the row, not the bar's time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub signal: Signal,
    pub price: f64,
    pub direction: String,
    pub timestamp: DateTime<Utc>,
}

/// First and last stored price inside a look-back window.
///
/// Both fields are `None` (serialized as `null`) when no trade qualifies.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceWindow {
    pub first: Option<f64>,
    pub last: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_window_serializes_nulls() {
        let json = serde_json::to_string(&PriceWindow::default()).unwrap();
        assert_eq!(json, r#"{"first":null,"last":null}"#);
    }
}
