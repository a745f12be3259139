//! SQLite-backed trade history.

use barcast_core::domain::{PriceWindow, Signal, Trade};
use barcast_core::store::{StoreError, TradeStore};
use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use tracing::debug;

/// Timestamp layout of SQLite's `CURRENT_TIMESTAMP` (UTC).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub struct SqliteTradeStore {
    conn: Connection,
}

fn ensure_table(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS trades (
             id        INTEGER PRIMARY KEY AUTOINCREMENT,
             timestamp DATETIME DEFAULT CURRENT_TIMESTAMP,
             signal    TEXT NOT NULL,
             price     REAL NOT NULL,
             direction TEXT NOT NULL
         );",
    )
    .map_err(StoreError::backend)
}

impl SqliteTradeStore {
    /// Open (or create) the database file and make sure the table exists.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(StoreError::backend)?;
        ensure_table(&conn)?;
        debug!(path = %path.display(), "trade store opened");
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(StoreError::backend)?;
        ensure_table(&conn)?;
        Ok(Self { conn })
    }

    /// Insert with an explicit timestamp instead of the column default.
    pub fn insert_trade_at(
        &mut self,
        signal: Signal,
        price: f64,
        direction: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        if !price.is_finite() {
            return Err(StoreError::InvalidPrice(price));
        }
        self.conn
            .execute(
                "INSERT INTO trades (timestamp, signal, price, direction) VALUES (?1, ?2, ?3, ?4)",
                params![
                    timestamp.format(TIMESTAMP_FORMAT).to_string(),
                    signal.as_str(),
                    price,
                    direction
                ],
            )
            .map_err(StoreError::backend)?;
        Ok(())
    }

    pub fn trade_count(&self) -> Result<usize, StoreError> {
        self.conn
            .query_row("SELECT COUNT(*) FROM trades", [], |row| row.get::<_, i64>(0))
            .map(|n| n as usize)
            .map_err(StoreError::backend)
    }

    /// All stored trades in insertion order.
    pub fn trades(&self) -> Result<Vec<Trade>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT signal, price, direction, timestamp FROM trades ORDER BY id ASC")
            .map_err(StoreError::backend)?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, f64>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })
            .map_err(StoreError::backend)?;

        let mut trades = Vec::new();
        for row in rows {
            let (signal, price, direction, timestamp) = row.map_err(StoreError::backend)?;
            let timestamp = NaiveDateTime::parse_from_str(&timestamp, TIMESTAMP_FORMAT)
                .map_err(StoreError::backend)?
                .and_utc();
            trades.push(Trade {
                signal: signal.parse::<Signal>().map_err(StoreError::backend)?,
                price,
                direction,
                timestamp,
            });
        }
        Ok(trades)
    }

    /// Window summary relative to an explicit `now`.
    pub fn first_last_at(&self, hours_back: u32, now: DateTime<Utc>) -> Result<PriceWindow, StoreError> {
        let since = (now - Duration::hours(i64::from(hours_back)))
            .format(TIMESTAMP_FORMAT)
            .to_string();
        let first = self.price_query(
            "SELECT price FROM trades WHERE timestamp >= ?1 ORDER BY timestamp ASC, id ASC LIMIT 1",
            &since,
        )?;
        let last = self.price_query(
            "SELECT price FROM trades WHERE timestamp >= ?1 ORDER BY timestamp DESC, id DESC LIMIT 1",
            &since,
        )?;
        Ok(PriceWindow { first, last })
    }

    fn price_query(&self, sql: &str, since: &str) -> Result<Option<f64>, StoreError> {
        self.conn
            .query_row(sql, params![since], |row| row.get::<_, f64>(0))
            .optional()
            .map_err(StoreError::backend)
    }
}

impl TradeStore for SqliteTradeStore {
    fn insert_trade(&mut self, signal: Signal, price: f64, direction: &str) -> Result<(), StoreError> {
        if !price.is_finite() {
            return Err(StoreError::InvalidPrice(price));
        }
        self.conn
            .execute(
                "INSERT INTO trades (signal, price, direction) VALUES (?1, ?2, ?3)",
                params![signal.as_str(), price, direction],
            )
            .map_err(StoreError::backend)?;
        Ok(())
    }

    fn first_last(&self, hours_back: u32) -> Result<PriceWindow, StoreError> {
        self.first_last_at(hours_back, Utc::now())
    }
}
