//! Commission schedules selectable from configuration.

use perf_core::traits::CommissionModel;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{NoCommission, PerFillCommission, PerUnitCommission};

/// Commission schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum CommissionSchedule {
    /// No commission
    #[default]
    None,
    /// Rate per share or contract, with an optional floor and cap
    PerUnit {
        rate: Decimal,
        #[serde(default)]
        minimum: Decimal,
        #[serde(default)]
        max_percent: Option<Decimal>,
    },
    /// Flat fee per fill
    PerFill { fee: Decimal },
}

impl CommissionSchedule {
    /// Bundled North America stock pricing: 0.005 per share, 1.00 minimum,
    /// capped at 0.5% of trade value.
    pub fn bundled_north_america_stock() -> Self {
        CommissionSchedule::PerUnit {
            rate: dec!(0.005),
            minimum: dec!(1.00),
            max_percent: Some(dec!(0.5)),
        }
    }

    /// Bundled North America futures pricing: 2.40 per contract.
    pub fn bundled_north_america_futures() -> Self {
        CommissionSchedule::PerUnit {
            rate: dec!(2.40),
            minimum: Decimal::ZERO,
            max_percent: None,
        }
    }

    /// Look up a named preset.
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "none" | "zero" => Some(CommissionSchedule::None),
            "stock" | "na_stock" => Some(Self::bundled_north_america_stock()),
            "futures" | "na_futures" => Some(Self::bundled_north_america_futures()),
            _ => None,
        }
    }

    /// Check that rates and fees are nonnegative.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            CommissionSchedule::None => Ok(()),
            CommissionSchedule::PerUnit {
                rate,
                minimum,
                max_percent,
            } => {
                if rate.is_sign_negative() || minimum.is_sign_negative() {
                    return Err("commission rate and minimum must be nonnegative".to_string());
                }
                if let Some(percent) = max_percent {
                    if *percent <= Decimal::ZERO {
                        return Err("commission max_percent must be positive".to_string());
                    }
                }
                Ok(())
            }
            CommissionSchedule::PerFill { fee } => {
                if fee.is_sign_negative() {
                    return Err("commission fee must be nonnegative".to_string());
                }
                Ok(())
            }
        }
    }

    /// Build the commission model for this schedule.
    pub fn build(&self) -> Box<dyn CommissionModel> {
        debug!(schedule = ?self, "Building commission model");
        match self {
            CommissionSchedule::None => Box::new(NoCommission),
            CommissionSchedule::PerUnit {
                rate,
                minimum,
                max_percent,
            } => {
                let mut model = PerUnitCommission::new(*rate).with_minimum(*minimum);
                if let Some(percent) = max_percent {
                    model = model.with_max_percent(*percent);
                }
                Box::new(model)
            }
            CommissionSchedule::PerFill { fee } => Box::new(PerFillCommission::new(*fee)),
        }
    }
}
