use std::sync::Arc;

use crate::config::Config;
use anyhow::Context;
use dca_core::{DcaService, DcaServiceTrait};
use dca_market_data::{AlphaVantageConfig, AlphaVantageProvider, MarketDataProvider};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub dca_service: Arc<dyn DcaServiceTrait>,
}

impl AppState {
    /// State around an already-built provider.
    pub fn with_provider(provider: Arc<dyn MarketDataProvider>) -> Arc<Self> {
        Arc::new(Self {
            dca_service: Arc::new(DcaService::new(provider)),
        })
    }
}

pub fn init_tracing() {
    let log_format = std::env::var("DCA_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    if config.alpha_vantage_api_key == "demo" {
        tracing::warn!("DCA_ALPHA_VANTAGE_API_KEY not set; using the shared demo key");
    }

    reqwest::Url::parse(&config.alpha_vantage_url)
        .with_context(|| format!("Invalid DCA_ALPHA_VANTAGE_URL '{}'", config.alpha_vantage_url))?;

    let provider_config = AlphaVantageConfig::new(config.alpha_vantage_api_key.clone())
        .with_base_url(config.alpha_vantage_url.clone())
        .with_timeout(config.request_timeout);
    let provider: Arc<dyn MarketDataProvider> = Arc::new(AlphaVantageProvider::new(provider_config));

    tracing::info!("Market data provider: {}", provider.id());
    Ok(AppState::with_provider(provider))
}
