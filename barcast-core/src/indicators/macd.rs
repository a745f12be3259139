//! MACD — fast EMA minus slow EMA of close.
//!
//! Both EMAs use the first-value seed, so MACD is defined from row 0
//! (and is exactly 0 there).

use crate::components::indicator::Indicator;
use crate::config::{DEFAULT_MACD_FAST, DEFAULT_MACD_SLOW};
use crate::domain::Bar;
use crate::indicators::ema::ema_of_series;

#[derive(Debug, Clone)]
pub struct Macd {
    fast: usize,
    slow: usize,
    name: String,
}

impl Macd {
    pub fn new(fast: usize, slow: usize) -> Self {
        assert!(fast >= 1, "MACD fast span must be >= 1");
        assert!(slow > fast, "MACD slow span must be > fast span");
        Self {
            fast,
            slow,
            name: format!("macd_{fast}_{slow}"),
        }
    }

    pub fn default_params() -> Self {
        Self::new(DEFAULT_MACD_FAST, DEFAULT_MACD_SLOW)
    }
}

impl Indicator for Macd {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        0
    }

    fn compute(&self, bars: &[Bar]) -> Vec<Option<f64>> {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let fast = ema_of_series(&closes, self.fast);
        let slow = ema_of_series(&closes, self.slow);
        fast.into_iter()
            .zip(slow)
            .map(|(f, s)| Some(f? - s?))
            .collect()
    }
}
