//! Update feeds for performance accounting.

mod csv_source;

pub use csv_source::CsvUpdateSource;

use perf_core::error::DataError;
use perf_core::traits::UpdateSource;
use perf_core::types::FeedEvent;

/// Load every event from a CSV file.
pub async fn load_csv(path: &str) -> Result<Vec<FeedEvent>, DataError> {
    let source = CsvUpdateSource::new(path)?;
    source.load_all().await
}
