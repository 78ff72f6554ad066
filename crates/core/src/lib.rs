//! DCA Core - Normalizer, calculator, presenter and service.
//!
//! The calculation path is pure: a raw monthly series is normalized into
//! [`MonthlyObservation`]s, and [`calculator::calculate`] turns those plus
//! [`InvestmentParameters`] into a [`DcaResult`]. Fetching data is delegated
//! to an injected `dca_market_data::MarketDataProvider` by [`DcaService`].

pub mod assets;
pub mod calculator;
pub mod errors;
pub mod presenter;
pub mod time_series;

pub use assets::{Asset, DcaService, DcaServiceTrait};
pub use calculator::{
    CalculatorController, CalculatorError, CalculatorForm, DcaResult, FormState,
    InvestmentParameters, StrategyComparison,
};
pub use presenter::{CalculatorPresentation, CalculatorPresenter, ResultTone};
pub use time_series::{MonthOption, MonthlyObservation, NormalizeError};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
