//! Dollar-cost averaging arithmetic.
//!
//! Everything here is a pure function of the observation slice (newest
//! first) and the parameters. Index 0 is the valuation month: the initial
//! amount buys at the start month's adjusted open, one contribution buys at
//! the adjusted open of every later month up to and including index 0, and
//! all units are valued at index 0's adjusted close.

use log::debug;

use super::calculator_model::{
    CalculatorError, DcaResult, InvestmentParameters, StrategyComparison,
};
use crate::time_series::MonthlyObservation;

const MONTHS_PER_YEAR: f64 = 12.0;

/// Compute the DCA outcome.
///
/// Fails only on violated preconditions: an empty series, a start index
/// outside it, or a negative/non-finite amount.
pub fn calculate(
    observations: &[MonthlyObservation],
    params: &InvestmentParameters,
) -> Result<DcaResult, CalculatorError> {
    validate(observations, params)?;

    let start = params.start_index;
    let invested = investment_amount(params.initial_amount, params.monthly_contribution, start);
    let value = current_value(observations, params);
    let gain = value - invested;

    let yield_rate = if invested > 0.0 { gain / invested } else { 0.0 };

    let result = DcaResult {
        investment_amount: invested,
        current_value: value,
        gain,
        yield_rate,
        annual_return: annual_return(value, invested, start),
        is_profitable: gain > 0.0,
    };

    debug!(
        "DCA over {} months from index {}: invested {:.2}, value {:.2}",
        observations.len(),
        start,
        result.investment_amount,
        result.current_value
    );

    Ok(result)
}

/// DCA outcome alongside the lump-sum-only outcome for the same start month.
pub fn compare(
    observations: &[MonthlyObservation],
    params: &InvestmentParameters,
) -> Result<StrategyComparison, CalculatorError> {
    Ok(StrategyComparison {
        dca: calculate(observations, params)?,
        lump_sum: calculate(observations, &params.lump_sum())?,
    })
}

/// Principal contributed: the initial amount plus one contribution for each
/// of the `start_index` months after the start month.
pub fn investment_amount(
    initial_amount: f64,
    monthly_contribution: f64,
    start_index: usize,
) -> f64 {
    initial_amount + monthly_contribution * start_index as f64
}

/// Value of all contributions at the valuation month.
///
/// Expects a validated slice and index (see [`calculate`]). When the start
/// month is the valuation month nothing has grown yet.
pub fn current_value(observations: &[MonthlyObservation], params: &InvestmentParameters) -> f64 {
    let start = params.start_index;
    if start == 0 {
        return params.initial_amount;
    }

    let latest_close = observations[0].adjusted_close;

    let initial_units = params.initial_amount / observations[start].adjusted_open;
    let contribution_units: f64 = observations[..start]
        .iter()
        .rev()
        .map(|month| params.monthly_contribution / month.adjusted_open)
        .sum();

    (initial_units + contribution_units) * latest_close
}

/// Compound annual growth over `months` elapsed months.
///
/// Zero when no time elapsed or nothing was invested.
pub fn annual_return(current_value: f64, investment_amount: f64, months: usize) -> f64 {
    if months == 0 || investment_amount <= 0.0 {
        return 0.0;
    }

    let growth = current_value / investment_amount;
    growth.powf(MONTHS_PER_YEAR / months as f64) - 1.0
}

fn validate(
    observations: &[MonthlyObservation],
    params: &InvestmentParameters,
) -> Result<(), CalculatorError> {
    if observations.is_empty() {
        return Err(CalculatorError::EmptySeries);
    }

    if params.start_index >= observations.len() {
        return Err(CalculatorError::StartIndexOutOfRange {
            index: params.start_index,
            len: observations.len(),
        });
    }

    for (field, value) in [
        ("initial amount", params.initial_amount),
        ("monthly contribution", params.monthly_contribution),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(CalculatorError::InvalidAmount { field, value });
        }
    }

    Ok(())
}
