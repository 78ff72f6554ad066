//! Raw monthly-adjusted price series as delivered by a provider.
//!
//! Prices stay as the provider's decimal strings here. Parsing, adjustment
//! and validation happen in the normalizer of `dca-core`, which needs to
//! reject a whole series when a single field is malformed.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Raw open/close/adjusted-close strings for one month.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBar {
    pub open: String,
    pub close: String,
    pub adjusted_close: String,
}

impl MonthlyBar {
    pub fn new(
        open: impl Into<String>,
        close: impl Into<String>,
        adjusted_close: impl Into<String>,
    ) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
            adjusted_close: adjusted_close.into(),
        }
    }
}

/// Series metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesMeta {
    pub symbol: String,
}

/// Monthly-adjusted series keyed by ISO date (`yyyy-MM-dd`).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyAdjustedSeries {
    pub meta: Option<SeriesMeta>,
    pub bars: HashMap<String, MonthlyBar>,
}

impl MonthlyAdjustedSeries {
    pub fn new(symbol: impl Into<String>, bars: HashMap<String, MonthlyBar>) -> Self {
        Self {
            meta: Some(SeriesMeta {
                symbol: symbol.into(),
            }),
            bars,
        }
    }

    pub fn symbol(&self) -> Option<&str> {
        self.meta.as_ref().map(|m| m.symbol.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }
}
