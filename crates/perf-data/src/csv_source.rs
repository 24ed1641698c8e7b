//! CSV update feed.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use csv::{ReaderBuilder, Trim};
use perf_core::error::DataError;
use perf_core::traits::UpdateSource;
use perf_core::types::{FeedEvent, TradeUpdate};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// CSV record format.
///
/// A row with a quantity is a fill; a row without one is a mark price tick.
/// `position` may be omitted, in which case it is the running sum of
/// quantities.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(alias = "Timestamp", alias = "time", alias = "date")]
    timestamp: String,
    #[serde(alias = "Quantity", alias = "qty", default)]
    quantity: Option<i64>,
    #[serde(alias = "Price", alias = "avg_fill_price")]
    price: f64,
    #[serde(alias = "Position", default)]
    position: Option<i64>,
    #[serde(alias = "Mark", default)]
    mark: Option<f64>,
}

/// CSV source of historical fills and mark ticks.
pub struct CsvUpdateSource {
    path: String,
}

impl CsvUpdateSource {
    /// Create a new CSV update source.
    pub fn new(path: &str) -> Result<Self, DataError> {
        if !Path::new(path).exists() {
            return Err(DataError::NotFound(path.to_string()));
        }
        Ok(Self {
            path: path.to_string(),
        })
    }

    /// Read events in file order.
    fn load_from_path(&self, path: &str) -> Result<Vec<FeedEvent>, DataError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_path(path)
            .map_err(|e| DataError::Parse(e.to_string()))?;

        let mut events = Vec::new();
        let mut position = 0i64;

        for (row, result) in reader.deserialize().enumerate() {
            let record: CsvRecord = result.map_err(|e| DataError::Parse(e.to_string()))?;
            let timestamp = parse_timestamp(&record.timestamp)?;

            let event = match record.quantity {
                Some(quantity) => {
                    let resulting = match record.position {
                        Some(p) => p,
                        None => position.checked_add(quantity).ok_or_else(|| {
                            DataError::Parse(format!("row {}: position overflow", row + 1))
                        })?,
                    };
                    position = resulting;
                    FeedEvent::Fill {
                        update: TradeUpdate::new(timestamp, quantity, record.price, resulting),
                        mark: record.mark,
                    }
                }
                None => FeedEvent::Mark {
                    timestamp,
                    price: record.price,
                },
            };
            events.push(event);
        }

        debug!(path, events = events.len(), "Loaded update feed");
        Ok(events)
    }
}

#[async_trait]
impl UpdateSource for CsvUpdateSource {
    async fn load_all(&self) -> Result<Vec<FeedEvent>, DataError> {
        self.load_from_path(&self.path)
    }

    fn name(&self) -> &str {
        "csv"
    }
}

/// Parse Unix milliseconds, Unix seconds, or a datetime string into
/// Unix milliseconds.
fn parse_timestamp(value: &str) -> Result<i64, DataError> {
    if let Ok(ts) = value.parse::<i64>() {
        // Assume milliseconds if > 10 digits
        if ts.abs() > 10_000_000_000 {
            return Ok(ts);
        }
        return Ok(ts * 1000);
    }

    let formats = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"];
    for format in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(dt.and_utc().timestamp_millis());
        }
    }

    Err(DataError::Parse(format!("Could not parse timestamp: {}", value)))
}
