use serde::{Deserialize, Serialize};

use crate::time_series::{month_options, MonthOption, MonthlyObservation};
use dca_market_data::SearchResult;

/// A searched symbol together with its normalized monthly series.
///
/// `observations` is newest first and never empty for an asset produced by
/// the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub search_result: SearchResult,
    pub observations: Vec<MonthlyObservation>,
}

impl Asset {
    pub fn new(search_result: SearchResult, observations: Vec<MonthlyObservation>) -> Self {
        Self {
            search_result,
            observations,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.search_result.symbol
    }

    pub fn month_count(&self) -> usize {
        self.observations.len()
    }

    pub fn month_options(&self) -> Vec<MonthOption> {
        month_options(&self.observations)
    }
}
