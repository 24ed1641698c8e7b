//! Commission models.
//!
//! Provides concrete `CommissionModel` implementations and the serializable
//! schedule used to pick one from configuration.

mod models;
mod schedule;

pub use models::{NoCommission, PerFillCommission, PerUnitCommission};
pub use schedule::CommissionSchedule;
