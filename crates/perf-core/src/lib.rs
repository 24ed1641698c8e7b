//! Core types and traits for strategy performance accounting.
//!
//! This crate provides the foundational building blocks including:
//! - Feed types (TradeUpdate, FeedEvent)
//! - Session modes and chart bar sizes
//! - The append-only chart series of net profit
//! - Traits for commission models and update sources

pub mod types;
pub mod traits;
pub mod error;

pub use error::{PerformanceError, PerformanceResult};
pub use types::*;
pub use traits::*;
