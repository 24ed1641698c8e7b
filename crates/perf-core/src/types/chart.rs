//! Net profit chart series.

use serde::{Deserialize, Serialize};

use super::BarSize;

/// A net profit value observed at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimedValue {
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
    pub value: f64,
}

impl TimedValue {
    pub fn new(timestamp: i64, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// Net profit aggregated over one bar period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfitBar {
    /// Bar start, Unix milliseconds
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl ProfitBar {
    fn open_at(timestamp: i64, value: f64) -> Self {
        Self {
            timestamp,
            open: value,
            high: value,
            low: value,
            close: value,
        }
    }

    fn update(&mut self, value: f64) {
        self.high = self.high.max(value);
        self.low = self.low.min(value);
        self.close = value;
    }

    /// Bar's range (high - low).
    #[inline]
    pub fn range(&self) -> f64 {
        self.high - self.low
    }
}

/// Append-only sequence of net profit snapshots in arrival order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChartSeries {
    points: Vec<TimedValue>,
}

impl ChartSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a snapshot.
    pub fn record(&mut self, timestamp: i64, value: f64) {
        self.points.push(TimedValue::new(timestamp, value));
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last(&self) -> Option<&TimedValue> {
        self.points.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TimedValue> {
        self.points.iter()
    }

    /// Copy of the points as of now. Later appends are not visible in it.
    pub fn snapshot(&self) -> Vec<TimedValue> {
        self.points.clone()
    }

    /// Aggregate the series into OHLC bars of net profit.
    ///
    /// Points are bucketed by `bar_size`; empty periods produce no bar.
    pub fn to_bars(&self, bar_size: BarSize) -> Vec<ProfitBar> {
        let mut bars: Vec<ProfitBar> = Vec::new();

        for point in &self.points {
            let start = bar_size.bucket_start(point.timestamp);
            match bars.last_mut() {
                Some(bar) if bar.timestamp == start => bar.update(point.value),
                _ => bars.push(ProfitBar::open_at(start, point.value)),
            }
        }

        bars
    }
}
