//! Core traits for performance accounting.

mod commission;
mod update_source;

pub use commission::CommissionModel;
pub use update_source::UpdateSource;
