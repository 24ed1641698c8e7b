//! Trade updates and feed events.

use serde::{Deserialize, Serialize};

use crate::error::UpdateError;

/// A single fill applied to a strategy's position.
///
/// Produced by the execution side and consumed exactly once by the
/// accumulator. `quantity` is signed: positive for buys, negative for sells.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradeUpdate {
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
    /// Signed quantity filled
    pub quantity: i64,
    /// Average fill price
    pub price: f64,
    /// Net position after the fill
    pub position: i64,
}

impl TradeUpdate {
    /// Create a new trade update.
    pub fn new(timestamp: i64, quantity: i64, price: f64, position: i64) -> Self {
        Self {
            timestamp,
            quantity,
            price,
            position,
        }
    }

    /// Check the quantity and price contract.
    pub fn validate(&self) -> Result<(), UpdateError> {
        if self.quantity == 0 {
            return Err(UpdateError::ZeroQuantity);
        }
        if !self.price.is_finite() || self.price <= 0.0 {
            return Err(UpdateError::InvalidPrice(self.price));
        }
        Ok(())
    }

    #[inline]
    pub fn is_buy(&self) -> bool {
        self.quantity > 0
    }

    #[inline]
    pub fn abs_quantity(&self) -> u64 {
        self.quantity.unsigned_abs()
    }
}

/// An event on the update feed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeedEvent {
    /// A fill, optionally followed by a fresh mark price
    Fill {
        update: TradeUpdate,
        mark: Option<f64>,
    },
    /// A mark price tick between fills
    Mark { timestamp: i64, price: f64 },
}

impl FeedEvent {
    pub fn fill(update: TradeUpdate) -> Self {
        FeedEvent::Fill { update, mark: None }
    }

    pub fn timestamp(&self) -> i64 {
        match self {
            FeedEvent::Fill { update, .. } => update.timestamp,
            FeedEvent::Mark { timestamp, .. } => *timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_zero_quantity() {
        let update = TradeUpdate::new(0, 0, 100.0, 0);
        assert_eq!(update.validate(), Err(UpdateError::ZeroQuantity));
    }

    #[test]
    fn test_validate_rejects_bad_price() {
        assert!(TradeUpdate::new(0, 1, 0.0, 1).validate().is_err());
        assert!(TradeUpdate::new(0, 1, -5.0, 1).validate().is_err());
        assert!(TradeUpdate::new(0, 1, f64::NAN, 1).validate().is_err());
        assert!(TradeUpdate::new(0, 1, 5.0, 1).validate().is_ok());
    }

    #[test]
    fn test_abs_quantity() {
        let update = TradeUpdate::new(0, -7, 10.0, -7);
        assert!(!update.is_buy());
        assert_eq!(update.abs_quantity(), 7);
    }

    #[test]
    fn test_feed_event_serde() {
        let event = FeedEvent::Mark {
            timestamp: 42,
            price: 101.5,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"kind\":\"mark\""));
        let back: FeedEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
        assert_eq!(back.timestamp(), 42);
    }
}
