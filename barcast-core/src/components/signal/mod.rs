//! Signal generation — turns a batch of feature rows into per-row calls.
//!
//! Generators see indicator values only. They carry state across rows of one
//! batch (previous-row values for crossover detection) but never across
//! batches.

pub mod dmi_trend;

pub use dmi_trend::DmiTrendSignal;

use crate::domain::{FeatureRow, Signal};

/// Trait for signal generators.
///
/// # Contract
/// `generate` returns exactly one `Signal` per input row, in order. The value
/// at row t may only depend on rows `0..=t`.
pub trait SignalGenerator: Send + Sync {
    /// Human-readable name (e.g., "dmi_trend").
    fn name(&self) -> &str;

    fn generate(&self, rows: &[FeatureRow]) -> Vec<Signal>;
}
