//! Alpha Vantage market data provider implementation.
//!
//! This module provides market data from the Alpha Vantage API:
//! - Symbol search via the SYMBOL_SEARCH endpoint
//! - Monthly adjusted prices via the TIME_SERIES_MONTHLY_ADJUSTED endpoint
//!
//! Note: Alpha Vantage free tier is limited to 5 API calls per minute.

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde::Deserialize;
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::errors::MarketDataError;
use crate::models::{MonthlyAdjustedSeries, MonthlyBar, ProviderId, SearchResult, SeriesMeta};
use crate::provider::{MarketDataProvider, RateLimit};
use crate::registry::RateLimiter;

pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";
const PROVIDER_ID: &str = "ALPHA_VANTAGE";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for [`AlphaVantageProvider`].
#[derive(Clone, Debug)]
pub struct AlphaVantageConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl AlphaVantageConfig {
    /// Settings for the public endpoint with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Alpha Vantage market data provider.
///
/// Free tier is limited to 5 API calls per minute; every request waits for
/// a token from the provider's [`RateLimiter`] before it is sent.
pub struct AlphaVantageProvider {
    client: Client,
    config: AlphaVantageConfig,
    limiter: Arc<RateLimiter>,
}

// ============================================================================
// Response structures for Alpha Vantage API
// ============================================================================

/// SYMBOL_SEARCH response
#[derive(Debug, Deserialize)]
struct SymbolSearchResponse {
    #[serde(rename = "bestMatches")]
    best_matches: Option<Vec<SymbolMatch>>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SymbolMatch {
    #[serde(rename = "1. symbol")]
    symbol: String,
    #[serde(rename = "2. name")]
    name: String,
    #[serde(rename = "3. type")]
    asset_type: String,
    #[serde(rename = "4. region")]
    region: Option<String>,
    #[serde(rename = "8. currency")]
    currency: Option<String>,
    #[serde(rename = "9. matchScore")]
    match_score: Option<String>,
}

impl From<SymbolMatch> for SearchResult {
    fn from(item: SymbolMatch) -> Self {
        SearchResult {
            symbol: item.symbol,
            name: item.name,
            asset_type: item.asset_type,
            region: item.region,
            currency: item.currency,
            score: item.match_score.and_then(|s| s.trim().parse::<f64>().ok()),
        }
    }
}

/// TIME_SERIES_MONTHLY_ADJUSTED response
#[derive(Debug, Deserialize)]
struct MonthlyAdjustedResponse {
    #[serde(rename = "Meta Data")]
    meta: Option<MetaData>,
    #[serde(rename = "Monthly Adjusted Time Series")]
    time_series: Option<HashMap<String, MonthlyAdjustedQuote>>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MetaData {
    #[serde(rename = "2. Symbol")]
    symbol: String,
}

/// One month of the adjusted series. High, low, volume and dividend
/// fields are present in the payload but not needed.
#[derive(Debug, Deserialize)]
struct MonthlyAdjustedQuote {
    #[serde(rename = "1. open")]
    open: String,
    #[serde(rename = "4. close")]
    close: String,
    #[serde(rename = "5. adjusted close")]
    adjusted_close: String,
}

impl From<MonthlyAdjustedQuote> for MonthlyBar {
    fn from(quote: MonthlyAdjustedQuote) -> Self {
        MonthlyBar {
            open: quote.open,
            close: quote.close,
            adjusted_close: quote.adjusted_close,
        }
    }
}

// ============================================================================
// AlphaVantageProvider implementation
// ============================================================================

impl AlphaVantageProvider {
    /// Create a provider with its own rate limiter.
    pub fn new(config: AlphaVantageConfig) -> Self {
        Self::with_rate_limiter(config, Arc::new(RateLimiter::new()))
    }

    /// Create a provider that shares an existing rate limiter.
    pub fn with_rate_limiter(config: AlphaVantageConfig, limiter: Arc<RateLimiter>) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        limiter.configure(&Self::provider_id(), Self::free_tier_limit().into());

        Self {
            client,
            config,
            limiter,
        }
    }

    fn provider_id() -> ProviderId {
        Cow::Borrowed(PROVIDER_ID)
    }

    fn free_tier_limit() -> RateLimit {
        RateLimit {
            requests_per_minute: 5,
            burst: 5,
        }
    }

    /// Make a request to the Alpha Vantage API.
    async fn fetch(&self, params: &[(&str, &str)]) -> Result<String, MarketDataError> {
        let mut all_params: Vec<(&str, &str)> = params.to_vec();
        all_params.push(("apikey", &self.config.api_key));

        let url = reqwest::Url::parse_with_params(&self.config.base_url, &all_params)
            .map_err(|e| MarketDataError::provider(PROVIDER_ID, format!("Failed to build URL: {}", e)))?;

        self.limiter.acquire(&Self::provider_id()).await;

        if self.config.api_key.is_empty() {
            debug!("Alpha Vantage request: {}", url);
        } else {
            debug!(
                "Alpha Vantage request: {}",
                url.as_str().replace(&self.config.api_key, "***")
            );
        }

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                MarketDataError::Timeout {
                    provider: PROVIDER_ID.to_string(),
                }
            } else {
                MarketDataError::Network(e)
            }
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }

        if !status.is_success() {
            return Err(MarketDataError::provider(PROVIDER_ID, format!("HTTP {}", status)));
        }

        response
            .text()
            .await
            .map_err(|e| MarketDataError::provider(PROVIDER_ID, e.to_string()))
    }

    /// Check for API-level errors in the response.
    ///
    /// Alpha Vantage answers HTTP 200 for most failures and reports them in
    /// one of three top-level string fields.
    fn check_api_error(
        error_message: &Option<String>,
        note: &Option<String>,
        information: &Option<String>,
    ) -> Result<(), MarketDataError> {
        if let Some(ref msg) = error_message {
            if msg.contains("Invalid API call") || msg.contains("not found") {
                return Err(MarketDataError::SymbolNotFound(msg.clone()));
            }
            return Err(MarketDataError::provider(PROVIDER_ID, msg.clone()));
        }

        for msg in [note, information].into_iter().flatten() {
            if Self::is_rate_limit_message(msg) {
                return Err(MarketDataError::RateLimited {
                    provider: PROVIDER_ID.to_string(),
                });
            }
            warn!("Alpha Vantage note: {}", msg);
        }

        Ok(())
    }

    fn is_rate_limit_message(msg: &str) -> bool {
        let lower = msg.to_lowercase();
        lower.contains("api call frequency")
            || lower.contains("rate limit")
            || lower.contains("requests per day")
    }

    fn decode<'a, T: Deserialize<'a>>(text: &'a str) -> Result<T, MarketDataError> {
        serde_json::from_str(text).map_err(|e| {
            MarketDataError::provider(PROVIDER_ID, format!("Failed to parse response: {}", e))
        })
    }

    async fn search_symbols(&self, keywords: &str) -> Result<Vec<SearchResult>, MarketDataError> {
        let params = [("function", "SYMBOL_SEARCH"), ("keywords", keywords)];

        let text = self.fetch(&params).await?;
        let response: SymbolSearchResponse = Self::decode(&text)?;

        Self::check_api_error(
            &response.error_message,
            &response.note,
            &response.information,
        )?;

        let results: Vec<SearchResult> = response
            .best_matches
            .unwrap_or_default()
            .into_iter()
            .map(SearchResult::from)
            .collect();

        debug!(
            "Alpha Vantage: found {} search results for '{}'",
            results.len(),
            keywords
        );

        Ok(results)
    }

    async fn fetch_monthly_adjusted(
        &self,
        symbol: &str,
    ) -> Result<MonthlyAdjustedSeries, MarketDataError> {
        let params = [("function", "TIME_SERIES_MONTHLY_ADJUSTED"), ("symbol", symbol)];

        let text = self.fetch(&params).await?;
        let response: MonthlyAdjustedResponse = Self::decode(&text)?;

        Self::check_api_error(
            &response.error_message,
            &response.note,
            &response.information,
        )?;

        let time_series = response.time_series.ok_or_else(|| {
            MarketDataError::SymbolNotFound(format!("No data for symbol: {}", symbol))
        })?;

        let bars: HashMap<String, MonthlyBar> = time_series
            .into_iter()
            .map(|(date, quote)| (date, MonthlyBar::from(quote)))
            .collect();

        debug!(
            "Alpha Vantage: fetched {} monthly bars for {}",
            bars.len(),
            symbol
        );

        Ok(MonthlyAdjustedSeries {
            meta: Some(SeriesMeta {
                symbol: response
                    .meta
                    .map(|m| m.symbol)
                    .unwrap_or_else(|| symbol.to_string()),
            }),
            bars,
        })
    }
}

// ============================================================================
// MarketDataProvider trait implementation
// ============================================================================

#[async_trait]
impl MarketDataProvider for AlphaVantageProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn rate_limit(&self) -> RateLimit {
        Self::free_tier_limit()
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, MarketDataError> {
        debug!("Searching Alpha Vantage for '{}'", query);
        self.search_symbols(query).await
    }

    async fn monthly_adjusted(
        &self,
        symbol: &str,
    ) -> Result<MonthlyAdjustedSeries, MarketDataError> {
        self.fetch_monthly_adjusted(symbol).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    const SEARCH_BODY: &str = r#"{
        "bestMatches": [
            {
                "1. symbol": "TSCO.LON",
                "2. name": "Tesco PLC",
                "3. type": "Equity",
                "4. region": "United Kingdom",
                "5. marketOpen": "08:00",
                "6. marketClose": "16:30",
                "7. timezone": "UTC+01",
                "8. currency": "GBX",
                "9. matchScore": "0.7273"
            },
            {
                "1. symbol": "TSCDF",
                "2. name": "Tesco plc",
                "3. type": "Equity",
                "4. region": "United States",
                "5. marketOpen": "09:30",
                "6. marketClose": "16:00",
                "7. timezone": "UTC-04",
                "8. currency": "USD",
                "9. matchScore": "0.7143"
            }
        ]
    }"#;

    const MONTHLY_BODY: &str = r#"{
        "Meta Data": {
            "1. Information": "Monthly Adjusted Prices and Volumes",
            "2. Symbol": "IBM",
            "3. Last Refreshed": "2021-06-30",
            "4. Time Zone": "US/Eastern"
        },
        "Monthly Adjusted Time Series": {
            "2021-06-30": {
                "1. open": "143.8100",
                "2. high": "152.8400",
                "3. low": "143.0400",
                "4. close": "146.5900",
                "5. adjusted close": "139.2251",
                "6. volume": "82088954",
                "7. dividend amount": "0.0000"
            },
            "2021-05-28": {
                "1. open": "143.8100",
                "2. high": "148.5150",
                "3. low": "140.9200",
                "4. close": "143.7400",
                "5. adjusted close": "136.5183",
                "6. volume": "90686631",
                "7. dividend amount": "1.6400"
            }
        }
    }"#;

    fn provider(server: &mockito::ServerGuard) -> AlphaVantageProvider {
        AlphaVantageProvider::new(
            AlphaVantageConfig::new("test_key").with_base_url(format!("{}/query", server.url())),
        )
    }

    #[test]
    fn test_config_defaults() {
        let config = AlphaVantageConfig::new("key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_provider_id_and_rate_limit() {
        let provider = AlphaVantageProvider::new(AlphaVantageConfig::new("test_key"));
        assert_eq!(provider.id(), "ALPHA_VANTAGE");
        assert_eq!(provider.rate_limit().requests_per_minute, 5);
    }

    #[test]
    fn test_check_api_error_classification() {
        let not_found = AlphaVantageProvider::check_api_error(
            &Some("Invalid API call. Please retry or visit the documentation".to_string()),
            &None,
            &None,
        );
        assert!(matches!(not_found, Err(MarketDataError::SymbolNotFound(_))));

        let throttled = AlphaVantageProvider::check_api_error(
            &None,
            &Some("Thank you for using Alpha Vantage! Our standard API call frequency is 5 calls per minute".to_string()),
            &None,
        );
        assert!(matches!(throttled, Err(MarketDataError::RateLimited { .. })));

        let daily_cap = AlphaVantageProvider::check_api_error(
            &None,
            &None,
            &Some("Our standard API rate limit is 25 requests per day.".to_string()),
        );
        assert!(matches!(daily_cap, Err(MarketDataError::RateLimited { .. })));

        assert!(AlphaVantageProvider::check_api_error(&None, &None, &None).is_ok());
    }

    #[test]
    fn test_symbol_match_conversion() {
        let item = SymbolMatch {
            symbol: "XYZ".to_string(),
            name: "XYZ Company".to_string(),
            asset_type: "ETF".to_string(),
            region: Some("United States".to_string()),
            currency: Some("USD".to_string()),
            match_score: Some("not-a-number".to_string()),
        };
        let result = SearchResult::from(item);
        assert_eq!(result.asset_type, "ETF");
        assert_eq!(result.currency.as_deref(), Some("USD"));
        assert!(result.score.is_none());
    }

    #[tokio::test]
    async fn test_search_decodes_best_matches() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/query")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("function".into(), "SYMBOL_SEARCH".into()),
                Matcher::UrlEncoded("keywords".into(), "tesco plc".into()),
                Matcher::UrlEncoded("apikey".into(), "test_key".into()),
            ]))
            .with_status(200)
            .with_body(SEARCH_BODY)
            .create_async()
            .await;

        let results = provider(&server).search("tesco plc").await.unwrap();

        mock.assert_async().await;
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].symbol, "TSCO.LON");
        assert_eq!(results[0].currency.as_deref(), Some("GBX"));
        assert_eq!(results[1].region.as_deref(), Some("United States"));
        assert!((results[1].score.unwrap() - 0.7143).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_search_without_matches_is_empty() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/query")
            .match_query(Matcher::Any)
            .with_body(r#"{"bestMatches": []}"#)
            .create_async()
            .await;

        let results = provider(&server).search("zzzzzz").await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_monthly_adjusted_decodes_bars() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/query")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("function".into(), "TIME_SERIES_MONTHLY_ADJUSTED".into()),
                Matcher::UrlEncoded("symbol".into(), "IBM".into()),
            ]))
            .with_body(MONTHLY_BODY)
            .create_async()
            .await;

        let series = provider(&server).monthly_adjusted("IBM").await.unwrap();

        assert_eq!(series.symbol(), Some("IBM"));
        assert_eq!(series.len(), 2);
        let june = &series.bars["2021-06-30"];
        assert_eq!(june.open, "143.8100");
        assert_eq!(june.close, "146.5900");
        assert_eq!(june.adjusted_close, "139.2251");
    }

    #[tokio::test]
    async fn test_monthly_adjusted_error_message_is_not_found() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/query")
            .match_query(Matcher::Any)
            .with_body(r#"{"Error Message": "Invalid API call. Please retry or visit the documentation (https://www.alphavantage.co/documentation/) for TIME_SERIES_MONTHLY_ADJUSTED."}"#)
            .create_async()
            .await;

        let err = provider(&server).monthly_adjusted("NOPE").await.unwrap_err();
        assert!(matches!(err, MarketDataError::SymbolNotFound(_)));
    }

    #[tokio::test]
    async fn test_missing_series_is_not_found() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/query")
            .match_query(Matcher::Any)
            .with_body("{}")
            .create_async()
            .await;

        let err = provider(&server).monthly_adjusted("NOPE").await.unwrap_err();
        assert!(matches!(err, MarketDataError::SymbolNotFound(_)));
    }

    #[tokio::test]
    async fn test_http_429_is_rate_limited() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/query")
            .match_query(Matcher::Any)
            .with_status(429)
            .create_async()
            .await;

        let err = provider(&server).search("ibm").await.unwrap_err();
        assert!(matches!(err, MarketDataError::RateLimited { .. }));
    }

    #[tokio::test]
    async fn test_server_error_is_provider_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/query")
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let err = provider(&server).monthly_adjusted("IBM").await.unwrap_err();
        match err {
            MarketDataError::ProviderError { provider, message } => {
                assert_eq!(provider, "ALPHA_VANTAGE");
                assert!(message.contains("503"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_provider_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/query")
            .match_query(Matcher::Any)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let err = provider(&server).search("ibm").await.unwrap_err();
        assert!(matches!(err, MarketDataError::ProviderError { .. }));
    }
}
