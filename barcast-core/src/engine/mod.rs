//! Indicator engine — turns validated bars into zero-filled feature rows.
//!
//! Indicators run once over the full batch. Training windows slice the
//! resulting rows, so every window sees indicators with the full batch's
//! history behind them.

pub mod precompute;

pub use precompute::IndicatorEngine;
