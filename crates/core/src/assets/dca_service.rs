use log::{debug, warn};
use std::sync::Arc;

use super::asset_model::Asset;
use super::dca_traits::DcaServiceTrait;
use crate::calculator::{self, DcaResult, InvestmentParameters, StrategyComparison};
use crate::errors::{Error, Result};
use crate::time_series::{normalize, MonthOption, MonthlyObservation};
use dca_market_data::{MarketDataProvider, SearchResult};

/// Service tying the market-data provider to the normalizer and calculator.
pub struct DcaService {
    provider: Arc<dyn MarketDataProvider>,
}

impl DcaService {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self { provider }
    }

    async fn fetch_observations(&self, symbol: &str) -> Result<Vec<MonthlyObservation>> {
        let series = self.provider.monthly_adjusted(symbol).await?;
        debug!(
            "{} returned {} monthly bars for {}",
            self.provider.id(),
            series.len(),
            symbol
        );

        let observations = normalize(&series.bars);
        if observations.is_empty() {
            warn!("No usable monthly data for {}", symbol);
            return Err(Error::NoPriceData(symbol.to_string()));
        }
        Ok(observations)
    }
}

#[async_trait::async_trait]
impl DcaServiceTrait for DcaService {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.provider.search(query).await?)
    }

    async fn load_asset(&self, search_result: SearchResult) -> Result<Asset> {
        let observations = self.fetch_observations(&search_result.symbol).await?;
        Ok(Asset::new(search_result, observations))
    }

    async fn load_symbol(&self, symbol: &str) -> Result<Asset> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(Error::Validation("symbol must not be empty".to_string()));
        }
        // Without a search hit the symbol doubles as the display name.
        let observations = self.fetch_observations(symbol).await?;
        Ok(Asset::new(
            SearchResult::new(symbol, symbol, String::new()),
            observations,
        ))
    }

    fn month_options(&self, asset: &Asset) -> Vec<MonthOption> {
        asset.month_options()
    }

    fn calculate(&self, asset: &Asset, params: &InvestmentParameters) -> Result<DcaResult> {
        Ok(calculator::calculate(&asset.observations, params)?)
    }

    fn compare(&self, asset: &Asset, params: &InvestmentParameters) -> Result<StrategyComparison> {
        Ok(calculator::compare(&asset.observations, params)?)
    }
}
