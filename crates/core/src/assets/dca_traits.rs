use super::asset_model::Asset;
use crate::calculator::{DcaResult, InvestmentParameters, StrategyComparison};
use crate::errors::Result;
use crate::time_series::MonthOption;
use dca_market_data::SearchResult;

/// Trait defining the contract for DCA service operations.
#[async_trait::async_trait]
pub trait DcaServiceTrait: Send + Sync {
    /// Symbol search. A blank query returns no results.
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>>;

    /// Fetches and normalizes the monthly series of a searched symbol.
    async fn load_asset(&self, search_result: SearchResult) -> Result<Asset>;

    /// Like [`load_asset`](Self::load_asset) when only the symbol is known.
    async fn load_symbol(&self, symbol: &str) -> Result<Asset>;

    fn month_options(&self, asset: &Asset) -> Vec<MonthOption>;

    fn calculate(&self, asset: &Asset, params: &InvestmentParameters) -> Result<DcaResult>;

    /// DCA result next to the lump-sum-only result.
    fn compare(&self, asset: &Asset, params: &InvestmentParameters) -> Result<StrategyComparison>;
}
