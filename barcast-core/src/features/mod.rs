//! Per-window feature preparation: min-max normalization and close smoothing.
//!
//! Both stages work on one window's slice of `FeatureRow`s and report
//! problems as `ProcessingWarning`s so the trainer can skip that window.

pub mod normalize;
pub mod smooth;

pub use normalize::Normalizer;
pub use smooth::Smoother;
