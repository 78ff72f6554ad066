//! Core error types for the DCA calculator.

use thiserror::Error;

use crate::calculator::CalculatorError;
use dca_market_data::errors::MarketDataError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the core crate.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Market data operation failed: {0}")]
    MarketData(#[from] MarketDataError),

    #[error("No usable monthly price data for {0}")]
    NoPriceData(String),

    #[error("Calculation failed: {0}")]
    Calculation(#[from] CalculatorError),

    #[error("Input validation failed: {0}")]
    Validation(String),
}
