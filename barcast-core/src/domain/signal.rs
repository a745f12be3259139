//! Signal — the discrete per-bar trading call.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Trading signal emitted for every row of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    None,
    Long,
    Short,
    Crossover,
}

impl Signal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::None => "none",
            Signal::Long => "long",
            Signal::Short => "short",
            Signal::Crossover => "crossover",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown signal '{0}'")]
pub struct ParseSignalError(pub String);

impl FromStr for Signal {
    type Err = ParseSignalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Signal::None),
            "long" => Ok(Signal::Long),
            "short" => Ok(Signal::Short),
            "crossover" => Ok(Signal::Crossover),
            other => Err(ParseSignalError(other.to_string())),
        }
    }
}
