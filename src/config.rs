use std::env;
use std::time::Duration;

use url::Url;

use crate::etherscan::DEFAULT_API_URL;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub etherscan_api_key: String,
    pub etherscan_api_url: Url,
    pub etherscan_timeout: Duration,
    pub http_bind_addr: String,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("missing ETHERSCAN_API_KEY env var")]
    MissingApiKey,
    #[error("invalid ETHERSCAN_API_URL {0:?}: {1}")]
    InvalidApiUrl(String, url::ParseError),
    #[error("invalid ETHERSCAN_TIMEOUT_SECS {0:?}")]
    InvalidTimeout(String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process
    /// environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let etherscan_api_key = lookup("ETHERSCAN_API_KEY")
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let raw_url = lookup("ETHERSCAN_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let etherscan_api_url =
            Url::parse(&raw_url).map_err(|e| ConfigError::InvalidApiUrl(raw_url.clone(), e))?;

        let etherscan_timeout = match lookup("ETHERSCAN_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or(ConfigError::InvalidTimeout(raw))?,
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let http_bind_addr = lookup("HTTP_BIND").unwrap_or_else(|| "127.0.0.1:8080".to_string());

        Ok(Self {
            etherscan_api_key,
            etherscan_api_url,
            etherscan_timeout,
            http_bind_addr,
        })
    }
}
