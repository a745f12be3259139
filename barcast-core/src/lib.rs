//! barcast core — bar validation, indicators, windowed regression and signals.
//!
//! This crate holds everything that turns one batch of bars into output:
//! - Input validation into typed bars
//! - MACD and DMI/ADX indicators with explicit undefined values
//! - Per-window normalization, smoothing and OLS prediction
//! - DMI trend/crossover signal generation
//! - The trade-store contract and an in-memory implementation
//! - The batch pipeline tying these together

pub mod components;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod features;
pub mod indicators;
pub mod model;
pub mod numeric;
pub mod pipeline;
pub mod store;
pub mod validate;

pub use config::PipelineConfig;
pub use error::{PipelineError, ProcessingWarning};
pub use pipeline::{Analysis, BatchOutput, BatchReport, Pipeline};
