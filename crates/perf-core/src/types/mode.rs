//! Session modes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of session a strategy is running in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Historical replay with full chart history
    #[serde(rename = "backtest", alias = "back_test")]
    #[default]
    BackTest,
    /// Parameter sweep over historical data
    Optimization,
    /// Live data, simulated execution
    ForwardTest,
    /// Live data, live execution
    Trade,
}

impl Mode {
    /// Whether net profit history is recorded into the chart series.
    pub fn records_history(&self) -> bool {
        matches!(self, Mode::BackTest)
    }

    /// Get all modes.
    pub fn all() -> &'static [Mode] {
        &[Mode::BackTest, Mode::Optimization, Mode::ForwardTest, Mode::Trade]
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Mode::BackTest => "backtest",
            Mode::Optimization => "optimization",
            Mode::ForwardTest => "forward_test",
            Mode::Trade => "trade",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "backtest" | "back_test" => Ok(Mode::BackTest),
            "optimization" | "optimize" => Ok(Mode::Optimization),
            "forward_test" | "forwardtest" | "forward" => Ok(Mode::ForwardTest),
            "trade" | "live" => Ok(Mode::Trade),
            _ => Err(format!("Invalid mode: {}", s)),
        }
    }
}
