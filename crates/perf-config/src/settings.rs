//! Configuration structures.

use perf_accounting::AccumulatorConfig;
use perf_commission::CommissionSchedule;
use perf_core::types::{BarSize, Mode};
use serde::{Deserialize, Serialize};

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub accounting: AccountingSettings,
    #[serde(default)]
    pub commission: CommissionSchedule,
}

impl AppConfig {
    /// Check cross-field constraints serde cannot express.
    pub fn validate(&self) -> Result<(), String> {
        self.check_sections()
            .into_iter()
            .try_for_each(|(_, result)| result)
    }

    /// Validation result for every section, in file order.
    pub fn check_sections(&self) -> Vec<(&'static str, Result<(), String>)> {
        vec![
            ("app", self.app.validate()),
            ("logging", self.logging.validate()),
            ("accounting", self.accounting.validate()),
            ("commission", self.commission.validate()),
        ]
    }

    /// Accumulator configuration for a session.
    pub fn accumulator(&self) -> AccumulatorConfig {
        AccumulatorConfig {
            multiplier: self.accounting.multiplier,
            mode: self.accounting.mode,
        }
    }
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl AppSettings {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("app.name must not be empty".to_string());
        }
        Ok(())
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "strategy-performance".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.level.trim().is_empty() {
            return Err("logging.level must not be empty".to_string());
        }
        match self.format.to_lowercase().as_str() {
            "pretty" | "text" | "json" => Ok(()),
            other => Err(format!(
                "logging.format must be pretty or json, got '{}'",
                other
            )),
        }
    }
}

/// Accounting settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountingSettings {
    /// Contract multiplier
    pub multiplier: i64,
    pub mode: Mode,
    /// Bar size used when exporting chart bars
    pub chart_bar_size: BarSize,
}

impl Default for AccountingSettings {
    fn default() -> Self {
        Self {
            multiplier: 1,
            mode: Mode::BackTest,
            chart_bar_size: BarSize::Minute1,
        }
    }
}

impl AccountingSettings {
    pub fn validate(&self) -> Result<(), String> {
        if self.multiplier < 1 {
            return Err(format!(
                "accounting.multiplier must be at least 1, got {}",
                self.multiplier
            ));
        }
        Ok(())
    }
}
