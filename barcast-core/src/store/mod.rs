//! Trade persistence contract.
//!
//! The pipeline writes one trade per row and reads two price summaries per
//! batch. Stores are append-only; nothing is rolled back when a later write
//! fails.

pub mod memory;

pub use memory::MemoryTradeStore;

use thiserror::Error;

use crate::domain::{PriceWindow, Signal};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("price is not a finite number: {0}")]
    InvalidPrice(f64),

    #[error("storage backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    pub fn backend<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        StoreError::Backend(Box::new(err))
    }
}

pub trait TradeStore: Send {
    /// Append a trade stamped with the store's current time.
    /// `price` is expected to be pre-rounded.
    fn insert_trade(&mut self, signal: Signal, price: f64, direction: &str) -> Result<(), StoreError>;

    /// Earliest and latest stored price with a timestamp no older than
    /// `hours_back` hours.
    fn first_last(&self, hours_back: u32) -> Result<PriceWindow, StoreError>;
}

impl<T: TradeStore + ?Sized> TradeStore for Box<T> {
    fn insert_trade(&mut self, signal: Signal, price: f64, direction: &str) -> Result<(), StoreError> {
        (**self).insert_trade(signal, price, direction)
    }

    fn first_last(&self, hours_back: u32) -> Result<PriceWindow, StoreError> {
        (**self).first_last(hours_back)
    }
}
