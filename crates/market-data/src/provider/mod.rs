//! Market data provider abstractions and implementations.
//!
//! This module contains:
//! - The `MarketDataProvider` trait that all providers implement
//! - Provider rate limiting configuration
//! - The Alpha Vantage implementation
//!
//! Providers are constructed explicitly with their configuration and handed
//! to the service layer as `Arc<dyn MarketDataProvider>`, so tests can swap
//! in a stub without touching the network.

mod capabilities;
mod traits;

pub mod alpha_vantage;

pub use capabilities::RateLimit;
pub use traits::MarketDataProvider;
