//! Presenter module - display strings for calculator results.

mod calculator_presenter;
mod number_format;
mod presenter_model;

pub use calculator_presenter::CalculatorPresenter;
pub use number_format::{format_currency, format_grouped, format_percent};
pub use presenter_model::{CalculatorPresentation, ResultTone};
