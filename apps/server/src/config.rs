use std::{net::SocketAddr, time::Duration};

use dca_market_data::provider::alpha_vantage::DEFAULT_BASE_URL;
use thiserror::Error;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_API_KEY: &str = "demo";
const DEFAULT_TIMEOUT_MS: u64 = 30000;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid DCA_LISTEN_ADDR '{0}'")]
    InvalidListenAddr(String),
}

#[derive(Clone, Debug)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub alpha_vantage_api_key: String,
    pub alpha_vantage_url: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            alpha_vantage_api_key: DEFAULT_API_KEY.to_string(),
            alpha_vantage_url: DEFAULT_BASE_URL.to_string(),
            cors_allow: vec!["*".to_string()],
            request_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

impl Config {
    /// Read settings from the environment, loading `.env` first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let listen_raw =
            lookup("DCA_LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr: SocketAddr = listen_raw
            .parse()
            .map_err(|_| ConfigError::InvalidListenAddr(listen_raw.clone()))?;
        let alpha_vantage_api_key = lookup("DCA_ALPHA_VANTAGE_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_KEY.into());
        let alpha_vantage_url =
            lookup("DCA_ALPHA_VANTAGE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let cors_allow = lookup("DCA_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = lookup("DCA_REQUEST_TIMEOUT_MS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_MS);
        Ok(Self {
            listen_addr,
            alpha_vantage_api_key,
            alpha_vantage_url,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
        })
    }
}
