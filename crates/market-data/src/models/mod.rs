//! Market data models
//!
//! This module contains the provider-agnostic data types:
//! - `types` - Type aliases for common identifiers (ProviderId)
//! - `search` - Search result data (SearchResult)
//! - `time_series` - Raw monthly-adjusted series (MonthlyAdjustedSeries, MonthlyBar)

mod search;
mod time_series;
mod types;

pub use search::SearchResult;
pub use time_series::{MonthlyAdjustedSeries, MonthlyBar, SeriesMeta};
pub use types::ProviderId;
