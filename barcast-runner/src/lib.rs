//! barcast runner — serves the batch pipeline over line-delimited JSON.
//!
//! This crate builds on `barcast-core` to provide:
//! - The read/process/print loop over arbitrary readers and writers
//! - A SQLite trade store implementing the core persistence contract
//! - TOML-loadable serve configuration

pub mod config;
pub mod serve;
pub mod sqlite;

pub use config::{ServeConfig, DEFAULT_DATABASE};
pub use serve::{batch_fingerprint, serve, ServeError, ServeSummary};
pub use sqlite::SqliteTradeStore;

use barcast_core::store::{MemoryTradeStore, StoreError, TradeStore};

/// The store a serve run writes to: SQLite at `config.database`, or an
/// in-memory store when persistence is off.
pub fn open_store(config: &ServeConfig) -> Result<Box<dyn TradeStore>, StoreError> {
    if config.persist {
        Ok(Box::new(SqliteTradeStore::open(&config.database)?))
    } else {
        Ok(Box::new(MemoryTradeStore::new()))
    }
}
