//! In-memory trade store for tests and non-persistent runs.

use chrono::{DateTime, Duration, Utc};

use super::{StoreError, TradeStore};
use crate::domain::{PriceWindow, Signal, Trade};

#[derive(Debug, Clone, Default)]
pub struct MemoryTradeStore {
    trades: Vec<Trade>,
}

impl MemoryTradeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a trade with an explicit timestamp.
    pub fn push(&mut self, trade: Trade) {
        self.trades.push(trade);
    }

    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }

    /// Window summary relative to an explicit `now`.
    pub fn first_last_at(&self, hours_back: u32, now: DateTime<Utc>) -> PriceWindow {
        let since = now - Duration::hours(i64::from(hours_back));
        // Ties on timestamp resolve by insertion order.
        let in_window: Vec<(usize, &Trade)> = self
            .trades
            .iter()
            .enumerate()
            .filter(|(_, t)| t.timestamp >= since)
            .collect();
        let first = in_window
            .iter()
            .min_by_key(|(i, t)| (t.timestamp, *i))
            .map(|(_, t)| t.price);
        let last = in_window
            .iter()
            .max_by_key(|(i, t)| (t.timestamp, *i))
            .map(|(_, t)| t.price);
        PriceWindow { first, last }
    }
}

impl TradeStore for MemoryTradeStore {
    fn insert_trade(&mut self, signal: Signal, price: f64, direction: &str) -> Result<(), StoreError> {
        if !price.is_finite() {
            return Err(StoreError::InvalidPrice(price));
        }
        self.trades.push(Trade {
            signal,
            price,
            direction: direction.to_string(),
            timestamp: Utc::now(),
        });
        Ok(())
    }

    fn first_last(&self, hours_back: u32) -> Result<PriceWindow, StoreError> {
        Ok(self.first_last_at(hours_back, Utc::now()))
    }
}
