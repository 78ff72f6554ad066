use serde::{Deserialize, Serialize};

/// Colour class of a result: green when profitable, red otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResultTone {
    Profitable,
    Unprofitable,
}

/// Display strings for one calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorPresentation {
    pub current_value: String,
    pub investment_amount: String,
    pub gain: String,
    #[serde(rename = "yield")]
    pub yield_label: String,
    pub annual_return: String,
    /// Applies to the current value, yield and annual return labels.
    /// `None` before anything has been calculated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone: Option<ResultTone>,
}

impl CalculatorPresentation {
    /// Labels shown before the form is complete.
    pub fn placeholder() -> Self {
        Self {
            current_value: "0.00".to_string(),
            investment_amount: "0.00".to_string(),
            gain: "-".to_string(),
            yield_label: "-".to_string(),
            annual_return: "-".to_string(),
            tone: None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.tone.is_none()
    }
}
