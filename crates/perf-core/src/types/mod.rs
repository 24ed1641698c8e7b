//! Core data types for performance accounting.

mod bar_size;
mod chart;
mod mode;
mod update;

pub use bar_size::BarSize;
pub use chart::{ChartSeries, ProfitBar, TimedValue};
pub use mode::Mode;
pub use update::{FeedEvent, TradeUpdate};
