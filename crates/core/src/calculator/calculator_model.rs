use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Inputs of one calculation.
///
/// `start_index` points into the descending observation sequence: 0 is the
/// most recent month, which is also the valuation month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentParameters {
    pub initial_amount: f64,
    pub monthly_contribution: f64,
    pub start_index: usize,
}

impl InvestmentParameters {
    pub fn new(initial_amount: f64, monthly_contribution: f64, start_index: usize) -> Self {
        Self {
            initial_amount,
            monthly_contribution,
            start_index,
        }
    }

    /// Same start and initial amount, no recurring contributions.
    pub fn lump_sum(&self) -> Self {
        Self {
            monthly_contribution: 0.0,
            ..*self
        }
    }
}

/// Outcome of one calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DcaResult {
    pub investment_amount: f64,
    pub current_value: f64,
    pub gain: f64,
    /// Fractional gain over principal, not annualized.
    #[serde(rename = "yield")]
    pub yield_rate: f64,
    pub annual_return: f64,
    pub is_profitable: bool,
}

/// DCA outcome next to the lump-sum-only outcome for the same start month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyComparison {
    pub dca: DcaResult,
    pub lump_sum: DcaResult,
}

/// Calculator preconditions the caller failed to uphold.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalculatorError {
    #[error("price series is empty")]
    EmptySeries,

    #[error("start index {index} is outside a series of {len} months")]
    StartIndexOutOfRange { index: usize, len: usize },

    #[error("{field} must be a non-negative amount, got {value}")]
    InvalidAmount { field: &'static str, value: f64 },
}
