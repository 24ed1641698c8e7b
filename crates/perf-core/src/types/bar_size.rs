//! Bar sizes for the performance chart.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Period used to aggregate net profit snapshots into chart bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BarSize {
    /// 1 minute bars
    #[serde(rename = "1m")]
    #[default]
    Minute1,
    /// 5 minute bars
    #[serde(rename = "5m")]
    Minute5,
    /// 15 minute bars
    #[serde(rename = "15m")]
    Minute15,
    /// 30 minute bars
    #[serde(rename = "30m")]
    Minute30,
    /// 1 hour bars
    #[serde(rename = "1h")]
    Hour1,
    /// 4 hour bars
    #[serde(rename = "4h")]
    Hour4,
    /// Daily bars
    #[serde(rename = "1d")]
    Daily,
}

impl BarSize {
    /// Get the duration of the bar in seconds.
    pub fn as_secs(&self) -> u64 {
        match self {
            BarSize::Minute1 => 60,
            BarSize::Minute5 => 300,
            BarSize::Minute15 => 900,
            BarSize::Minute30 => 1800,
            BarSize::Hour1 => 3600,
            BarSize::Hour4 => 14400,
            BarSize::Daily => 86400,
        }
    }

    /// Get the duration of the bar in milliseconds.
    pub fn as_millis(&self) -> i64 {
        self.as_secs() as i64 * 1000
    }

    /// Start of the bar containing `timestamp` (Unix milliseconds).
    pub fn bucket_start(&self, timestamp: i64) -> i64 {
        let size = self.as_millis();
        timestamp.div_euclid(size) * size
    }

    /// Get all available bar sizes.
    pub fn all() -> &'static [BarSize] {
        &[
            BarSize::Minute1,
            BarSize::Minute5,
            BarSize::Minute15,
            BarSize::Minute30,
            BarSize::Hour1,
            BarSize::Hour4,
            BarSize::Daily,
        ]
    }
}

impl fmt::Display for BarSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BarSize::Minute1 => "1m",
            BarSize::Minute5 => "5m",
            BarSize::Minute15 => "15m",
            BarSize::Minute30 => "30m",
            BarSize::Hour1 => "1h",
            BarSize::Hour4 => "4h",
            BarSize::Daily => "1d",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for BarSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1m" | "1min" | "minute" => Ok(BarSize::Minute1),
            "5m" | "5min" => Ok(BarSize::Minute5),
            "15m" | "15min" => Ok(BarSize::Minute15),
            "30m" | "30min" => Ok(BarSize::Minute30),
            "1h" | "1hour" | "hour" => Ok(BarSize::Hour1),
            "4h" | "4hour" => Ok(BarSize::Hour4),
            "1d" | "day" | "daily" => Ok(BarSize::Daily),
            _ => Err(format!("Invalid bar size: {}", s)),
        }
    }
}
