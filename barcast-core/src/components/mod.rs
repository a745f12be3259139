//! Component traits — the seams of the batch pipeline.
//!
//! - Indicator: bar series in, numeric series out
//! - Signal generator: feature rows in, one trading call per row out

pub mod indicator;
pub mod signal;

pub use indicator::Indicator;
pub use signal::{DmiTrendSignal, SignalGenerator};
