use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use crate::models::RawTransaction;

pub const DEFAULT_API_URL: &str = "https://api.etherscan.io/api";

/// Where the job reads the latest block from.
#[async_trait]
pub trait BlockSource: Send + Sync {
    async fn latest_block_number(&self) -> Result<u64, FetchError>;

    async fn transactions(&self, block_number: u64) -> Result<Vec<RawTransaction>, FetchError>;
}

#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("request to etherscan failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("etherscan returned HTTP {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("unexpected etherscan response body: {0}")]
    Body(#[from] serde_json::Error),
    #[error("etherscan rpc error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error("etherscan rejected the request: {message} ({result})")]
    Api { message: String, result: String },
    #[error("invalid block number {0:?}")]
    BadBlockNumber(String),
    #[error("block {0} not found")]
    BlockNotFound(u64),
}

/// Client for the Etherscan `proxy` module, which wraps JSON-RPC results in
/// a GET API keyed by `apikey`.
#[derive(Clone)]
pub struct EtherscanClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct ProxyResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    result: serde_json::Value,
    #[serde(default)]
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct BlockWithTransactions {
    #[serde(default)]
    transactions: Vec<RawTransaction>,
}

impl EtherscanClient {
    pub fn new(
        base_url: Url,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url,
            api_key: api_key.into(),
        })
    }

    async fn proxy<T: DeserializeOwned>(
        &self,
        action: &str,
        params: &[(&str, &str)],
    ) -> Result<Option<T>, FetchError> {
        tracing::debug!("etherscan proxy call: {}", action);

        let response = self
            .http
            .get(self.base_url.clone())
            .query(&[("module", "proxy"), ("action", action)])
            .query(params)
            .query(&[("apikey", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(FetchError::Status { status, body });
        }

        decode_proxy_body(&body)
    }
}

fn decode_proxy_body<T: DeserializeOwned>(body: &str) -> Result<Option<T>, FetchError> {
    let envelope: ProxyResponse = serde_json::from_str(body)?;

    if let Some(err) = envelope.error {
        return Err(FetchError::Rpc {
            code: err.code,
            message: err.message,
        });
    }

    // Plain (non-proxy) Etherscan errors: {"status":"0","message":"NOTOK","result":"..."}
    if envelope.status.as_deref() == Some("0") {
        let result = match envelope.result {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        };
        return Err(FetchError::Api {
            message: envelope.message.unwrap_or_default(),
            result,
        });
    }

    if envelope.result.is_null() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_value(envelope.result)?))
}

fn parse_block_number(raw: &str) -> Result<u64, FetchError> {
    raw.strip_prefix("0x")
        .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_hexdigit()))
        .and_then(|digits| u64::from_str_radix(digits, 16).ok())
        .ok_or_else(|| FetchError::BadBlockNumber(raw.to_string()))
}

#[async_trait]
impl BlockSource for EtherscanClient {
    async fn latest_block_number(&self) -> Result<u64, FetchError> {
        let raw: Option<String> = self.proxy("eth_blockNumber", &[]).await?;
        let raw = raw.ok_or_else(|| FetchError::BadBlockNumber("null".to_string()))?;
        parse_block_number(&raw)
    }

    async fn transactions(&self, block_number: u64) -> Result<Vec<RawTransaction>, FetchError> {
        let tag = format!("0x{:x}", block_number);
        let block: Option<BlockWithTransactions> = self
            .proxy(
                "eth_getBlockByNumber",
                &[("tag", tag.as_str()), ("boolean", "true")],
            )
            .await?;

        block
            .map(|b| b.transactions)
            .ok_or(FetchError::BlockNotFound(block_number))
    }
}
