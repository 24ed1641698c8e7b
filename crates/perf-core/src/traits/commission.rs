//! Commission model trait.

use crate::error::CommissionError;

/// Prices the commission charged on a single fill.
///
/// The accumulator queries the model once per update, before any of its
/// state changes, so a failing model leaves the aggregates untouched.
pub trait CommissionModel: Send + Sync {
    /// Commission charged for filling `quantity` units at `price`.
    ///
    /// # Arguments
    /// * `quantity` - Absolute quantity filled, always positive
    /// * `price` - Average fill price, always positive
    ///
    /// # Returns
    /// A nonnegative amount in account currency
    fn cost(&self, quantity: u64, price: f64) -> Result<f64, CommissionError>;

    /// Get the name of the model.
    fn name(&self) -> &str;
}

impl<T: CommissionModel + ?Sized> CommissionModel for Box<T> {
    fn cost(&self, quantity: u64, price: f64) -> Result<f64, CommissionError> {
        (**self).cost(quantity, price)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct PerUnit(f64);

    impl CommissionModel for PerUnit {
        fn cost(&self, quantity: u64, _price: f64) -> Result<f64, CommissionError> {
            if quantity == 0 {
                return Err(CommissionError::InvalidQuantity(quantity));
            }
            Ok(self.0 * quantity as f64)
        }

        fn name(&self) -> &str {
            "per_unit"
        }
    }

    #[test]
    fn test_boxed_model_delegates() {
        let model: Box<dyn CommissionModel> = Box::new(PerUnit(0.5));
        assert!((model.cost(10, 100.0).unwrap() - 5.0).abs() < 1e-12);
        assert_eq!(model.name(), "per_unit");
        assert!(model.cost(0, 100.0).is_err());
    }
}
