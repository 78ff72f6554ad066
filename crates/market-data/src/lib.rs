//! DCA Market Data Crate
//!
//! This crate fetches the two things the calculator needs from an external
//! market data provider: symbol search results and the monthly-adjusted
//! price series of a single symbol.
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +----------------------+
//! |   dca-core       | --> |  MarketDataProvider  |  (trait, injected)
//! +------------------+     +----------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |   RateLimiter    |  (token bucket per provider)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |  AlphaVantage    |  (SYMBOL_SEARCH,
//!                          +------------------+   TIME_SERIES_MONTHLY_ADJUSTED)
//!                                  |
//!                                  v
//!                        +-----------------------+
//!                        | MonthlyAdjustedSeries |  (raw decimal strings)
//!                        +-----------------------+
//! ```
//!
//! # Core Types
//!
//! - [`SearchResult`] - One symbol match from a search
//! - [`MonthlyAdjustedSeries`] - Date-keyed map of raw monthly bars
//! - [`MonthlyBar`] - Raw open/close/adjusted-close strings for one month
//! - [`MarketDataProvider`] - Provider abstraction used by the service layer

pub mod errors;
pub mod models;
pub mod provider;
pub mod registry;

pub use models::{MonthlyAdjustedSeries, MonthlyBar, ProviderId, SearchResult, SeriesMeta};

pub use provider::alpha_vantage::{AlphaVantageConfig, AlphaVantageProvider};
pub use provider::{MarketDataProvider, RateLimit};

pub use registry::{RateLimitConfig, RateLimiter};
