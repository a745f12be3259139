//! Domain types for barcast

pub mod bar;
pub mod feature;
pub mod prediction;
pub mod signal;
pub mod trade;

pub use bar::Bar;
pub use feature::{Feature, FeatureRow, NormalizedRow, WindowRow};
pub use prediction::PredictionSet;
pub use signal::{ParseSignalError, Signal};
pub use trade::{PriceWindow, Trade};
