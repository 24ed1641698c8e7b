//! Commission model implementations.

use perf_core::error::CommissionError;
use perf_core::traits::CommissionModel;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Commission-free execution.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCommission;

impl CommissionModel for NoCommission {
    fn cost(&self, _quantity: u64, _price: f64) -> Result<f64, CommissionError> {
        Ok(0.0)
    }

    fn name(&self) -> &str {
        "none"
    }
}

/// Per-share or per-contract commission with a floor and an optional cap.
///
/// `cost = max(rate * quantity, minimum)`, then capped at `max_percent` of
/// the traded value when a cap is set.
#[derive(Debug, Clone)]
pub struct PerUnitCommission {
    rate: Decimal,
    minimum: Decimal,
    max_percent: Option<Decimal>,
}

impl PerUnitCommission {
    /// Create a new per-unit commission.
    pub fn new(rate: Decimal) -> Self {
        Self {
            rate,
            minimum: Decimal::ZERO,
            max_percent: None,
        }
    }

    /// Set the minimum charged per fill.
    pub fn with_minimum(mut self, minimum: Decimal) -> Self {
        self.minimum = minimum;
        self
    }

    /// Cap the commission at a percentage of the traded value.
    pub fn with_max_percent(mut self, percent: Decimal) -> Self {
        self.max_percent = Some(percent);
        self
    }

    pub fn rate(&self) -> Decimal {
        self.rate
    }
}

impl CommissionModel for PerUnitCommission {
    fn cost(&self, quantity: u64, price: f64) -> Result<f64, CommissionError> {
        if quantity == 0 {
            return Err(CommissionError::InvalidQuantity(quantity));
        }
        if !price.is_finite() || price <= 0.0 {
            return Err(CommissionError::InvalidPrice(price));
        }
        let quantity_dec = Decimal::from(quantity);

        let mut commission = self
            .rate
            .checked_mul(quantity_dec)
            .ok_or_else(|| {
                CommissionError::Unavailable(format!(
                    "{} x {} units overflows",
                    self.rate, quantity
                ))
            })?
            .max(self.minimum);

        // A cap beyond Decimal range never binds
        if let Some(maximum) = self
            .max_percent
            .and_then(|percent| value_cap(quantity_dec, price, percent))
        {
            commission = commission.min(maximum);
        }

        commission.to_f64().ok_or_else(|| {
            CommissionError::Unavailable(format!("commission {} not representable", commission))
        })
    }

    fn name(&self) -> &str {
        "per_unit"
    }
}

/// `percent` of the traded value, or `None` when it exceeds Decimal range.
fn value_cap(quantity: Decimal, price: f64, percent: Decimal) -> Option<Decimal> {
    let price = match Decimal::from_f64(price) {
        Some(p) => p,
        // below Decimal precision
        None if price < 1.0 => Decimal::ZERO,
        None => return None,
    };
    percent
        .checked_div(dec!(100))?
        .checked_mul(quantity)?
        .checked_mul(price)
}

/// Flat fee charged on every fill regardless of size.
#[derive(Debug, Clone)]
pub struct PerFillCommission {
    fee: Decimal,
}

impl PerFillCommission {
    pub fn new(fee: Decimal) -> Self {
        Self { fee }
    }
}

impl CommissionModel for PerFillCommission {
    fn cost(&self, quantity: u64, _price: f64) -> Result<f64, CommissionError> {
        if quantity == 0 {
            return Err(CommissionError::InvalidQuantity(quantity));
        }
        self.fee
            .to_f64()
            .ok_or_else(|| CommissionError::Unavailable(format!("fee {} not representable", self.fee)))
    }

    fn name(&self) -> &str {
        "per_fill"
    }
}
