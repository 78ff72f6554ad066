//! Calculator module - DCA arithmetic, parameters, and the form/controller
//! that feeds it from user input.

mod calculator_controller;
mod calculator_form;
mod calculator_model;
mod dca_calculator;


pub use calculator_controller::CalculatorController;
pub use calculator_form::{parse_amount, CalculatorForm, FormState};
pub use calculator_model::{CalculatorError, DcaResult, InvestmentParameters, StrategyComparison};
pub use dca_calculator::{annual_return, calculate, compare, current_value, investment_amount};
