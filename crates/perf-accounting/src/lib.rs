//! Streaming performance accounting.
//!
//! Maintains trade-level and portfolio-level statistics for one strategy
//! from a sequential feed of fills, without re-scanning history.

mod accumulator;
mod metrics;
mod replay;
mod report;
mod statistics;

pub use accumulator::{AccumulatorConfig, PerformanceAccumulator};
pub use metrics::PerformanceSnapshot;
pub use replay::ReplayEngine;
pub use report::PerformanceReport;
pub use statistics::{AccountState, CompletedTrade, Direction, RunningStatistics, Transition};
