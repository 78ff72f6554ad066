//! Time series module - monthly observations and the normalizer that builds them.

mod normalizer;
mod time_series_model;

pub use normalizer::{normalize, try_normalize, NormalizeError, PriceField};
pub use time_series_model::{month_options, MonthOption, MonthlyObservation};
