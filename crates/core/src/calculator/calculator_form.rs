use super::calculator_model::InvestmentParameters;

/// Raw calculator inputs as the user enters them.
///
/// A field is `None` until the user touches it. Amount text that does not
/// parse still counts as entered and resolves to zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalculatorForm {
    pub initial_amount: Option<f64>,
    pub monthly_contribution: Option<f64>,
    pub start_index: Option<usize>,
}

/// Whether the form holds enough to run a calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormState {
    Incomplete,
    Ready(InvestmentParameters),
}

impl FormState {
    pub fn parameters(&self) -> Option<InvestmentParameters> {
        match self {
            FormState::Ready(params) => Some(*params),
            FormState::Incomplete => None,
        }
    }
}

impl CalculatorForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_initial_amount(&mut self, text: &str) {
        self.initial_amount = Some(parse_amount(text));
    }

    pub fn set_monthly_contribution(&mut self, text: &str) {
        self.monthly_contribution = Some(parse_amount(text));
    }

    pub fn set_start_index(&mut self, index: usize) {
        self.start_index = Some(index);
    }

    /// Resolve against a series of `observation_count` months.
    ///
    /// Stays incomplete while any field is missing or the start index does
    /// not point into the series.
    pub fn resolve(&self, observation_count: usize) -> FormState {
        match (self.initial_amount, self.monthly_contribution, self.start_index) {
            (Some(initial), Some(monthly), Some(index)) if index < observation_count => {
                FormState::Ready(InvestmentParameters::new(initial, monthly, index))
            }
            _ => FormState::Incomplete,
        }
    }
}

/// Parse amount text, falling back to zero.
///
/// Surrounding whitespace and thousands separators are ignored. Anything
/// else that is not a finite, non-negative number becomes 0.
pub fn parse_amount(text: &str) -> f64 {
    let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value >= 0.0)
        .unwrap_or(0.0)
}
