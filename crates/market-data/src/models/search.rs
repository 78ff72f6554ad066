//! Search result models for symbol lookup.

use serde::{Deserialize, Serialize};

/// Result from a ticker/symbol search.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// Symbol/ticker (e.g., "AAPL", "SHOP.TRT")
    pub symbol: String,

    /// Display name (e.g., "Apple Inc")
    pub name: String,

    /// Asset type as reported by the provider (e.g., "Equity", "ETF")
    pub asset_type: String,

    /// Region/market (e.g., "United States")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Currency for the symbol (e.g., "USD", "CAD")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// Relevance score from provider (higher = better match)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl SearchResult {
    /// Create a new search result with required fields.
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        asset_type: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            asset_type: asset_type.into(),
            region: None,
            currency: None,
            score: None,
        }
    }

    /// Set the region.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Set the currency.
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    /// Set the relevance score.
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    /// Type and currency joined for a list row subtitle, e.g. "ETF USD".
    pub fn type_and_currency(&self) -> String {
        match &self.currency {
            Some(currency) => format!("{} {}", self.asset_type, currency),
            None => self.asset_type.clone(),
        }
    }
}
