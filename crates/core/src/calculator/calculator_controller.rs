use super::calculator_form::{CalculatorForm, FormState};
use super::calculator_model::DcaResult;
use super::dca_calculator::calculate;
use crate::assets::Asset;
use crate::presenter::{CalculatorPresentation, CalculatorPresenter};

/// Calculator screen state for one asset.
///
/// Each setter updates the form and returns the presentation for the new
/// inputs, so the caller never has to remember to recompute.
#[derive(Debug, Clone)]
pub struct CalculatorController {
    asset: Asset,
    form: CalculatorForm,
    presenter: CalculatorPresenter,
}

impl CalculatorController {
    pub fn new(asset: Asset) -> Self {
        Self::with_presenter(asset, CalculatorPresenter::new())
    }

    pub fn with_presenter(asset: Asset, presenter: CalculatorPresenter) -> Self {
        Self {
            asset,
            form: CalculatorForm::new(),
            presenter,
        }
    }

    pub fn asset(&self) -> &Asset {
        &self.asset
    }

    pub fn form(&self) -> &CalculatorForm {
        &self.form
    }

    pub fn set_initial_amount(&mut self, text: &str) -> CalculatorPresentation {
        self.form.set_initial_amount(text);
        self.presentation()
    }

    pub fn set_monthly_contribution(&mut self, text: &str) -> CalculatorPresentation {
        self.form.set_monthly_contribution(text);
        self.presentation()
    }

    pub fn set_start_index(&mut self, index: usize) -> CalculatorPresentation {
        self.form.set_start_index(index);
        self.presentation()
    }

    /// Highest selectable start index, for a slider over the series.
    pub fn slider_max(&self) -> usize {
        self.asset.month_count().saturating_sub(1)
    }

    /// Label of the selected start month, e.g. "January 2021".
    pub fn selected_month_label(&self) -> Option<String> {
        let index = self.form.start_index?;
        self.asset
            .observations
            .get(index)
            .map(|observation| observation.month_label())
    }

    /// Result for the current inputs, if they are complete.
    pub fn result(&self) -> Option<DcaResult> {
        match self.form.resolve(self.asset.month_count()) {
            FormState::Ready(params) => calculate(&self.asset.observations, &params).ok(),
            FormState::Incomplete => None,
        }
    }

    pub fn presentation(&self) -> CalculatorPresentation {
        match self.result() {
            Some(result) => self.presenter.present(&result),
            None => CalculatorPresentation::placeholder(),
        }
    }
}
