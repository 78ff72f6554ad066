//! Market data provider trait definitions.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::{MonthlyAdjustedSeries, SearchResult};

use super::capabilities::RateLimit;

/// Trait for market data providers.
///
/// Implement this trait to add support for a new market data source.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use dca_market_data::{MarketDataProvider, MonthlyAdjustedSeries, RateLimit};
///
/// struct FixtureProvider {
///     series: MonthlyAdjustedSeries,
/// }
///
/// #[async_trait]
/// impl MarketDataProvider for FixtureProvider {
///     fn id(&self) -> &'static str {
///         "FIXTURE"
///     }
///
///     async fn monthly_adjusted(&self, _symbol: &str) -> Result<MonthlyAdjustedSeries, MarketDataError> {
///         Ok(self.series.clone())
///     }
/// }
/// ```
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "ALPHA_VANTAGE".
    /// Used for logging and rate limiter buckets.
    fn id(&self) -> &'static str;

    /// Rate limiting configuration.
    fn rate_limit(&self) -> RateLimit {
        RateLimit::default()
    }

    /// Search for symbols matching the query.
    ///
    /// Default implementation returns `NotSupported`.
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, MarketDataError> {
        let _ = query;
        Err(MarketDataError::NotSupported {
            operation: "search".to_string(),
            provider: self.id().to_string(),
        })
    }

    /// Fetch the complete monthly-adjusted series for a symbol.
    ///
    /// Bars are returned as raw decimal strings keyed by ISO date; no
    /// ordering is implied.
    async fn monthly_adjusted(&self, symbol: &str)
        -> Result<MonthlyAdjustedSeries, MarketDataError>;
}
