use super::number_format::{format_currency, format_grouped, format_percent};
use super::presenter_model::{CalculatorPresentation, ResultTone};
use crate::calculator::DcaResult;

const DEFAULT_CURRENCY_SYMBOL: &str = "$";

/// Turns a [`DcaResult`] into the strings shown on the calculator screen.
#[derive(Debug, Clone)]
pub struct CalculatorPresenter {
    currency_symbol: String,
}

impl Default for CalculatorPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorPresenter {
    pub fn new() -> Self {
        Self {
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }

    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    pub fn present(&self, result: &DcaResult) -> CalculatorPresentation {
        let (tone, sign) = if result.is_profitable {
            (ResultTone::Profitable, "+")
        } else {
            (ResultTone::Unprofitable, "")
        };

        CalculatorPresentation {
            current_value: format_currency(result.current_value, &self.currency_symbol, 2),
            investment_amount: format_currency(
                result.investment_amount,
                &self.currency_symbol,
                0,
            ),
            gain: format!("{}{}", sign, format_grouped(result.gain, 0)),
            yield_label: format!("({}{})", sign, format_percent(result.yield_rate)),
            annual_return: format_percent(result.annual_return),
            tone: Some(tone),
        }
    }
}
