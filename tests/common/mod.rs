#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::task::JoinHandle;

pub const API_KEY: &str = "TESTKEY";
pub const LATEST_BLOCK: u64 = 0x10d4f;

/// How the fake Etherscan answers.
#[derive(Clone)]
pub enum Upstream {
    /// Serves `LATEST_BLOCK` with the given (hash, hex value) transactions.
    Block(Vec<(&'static str, &'static str)>),
    /// Answers every call with this HTTP status.
    HttpStatus(StatusCode),
    /// Answers like Etherscan does for a bad key.
    InvalidKey,
    /// Latest block exists but `eth_getBlockByNumber` returns null.
    MissingBlock,
}

async fn api(
    State(upstream): State<Arc<Upstream>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if let Upstream::HttpStatus(status) = upstream.as_ref() {
        return (*status, "upstream unavailable").into_response();
    }
    if params.get("apikey").map(String::as_str) != Some(API_KEY)
        || matches!(upstream.as_ref(), Upstream::InvalidKey)
    {
        return Json(json!({"status": "0", "message": "NOTOK", "result": "Invalid API Key"}))
            .into_response();
    }
    if params.get("module").map(String::as_str) != Some("proxy") {
        return (StatusCode::BAD_REQUEST, "unknown module").into_response();
    }

    let result: Value = match params.get("action").map(String::as_str) {
        Some("eth_blockNumber") => json!(format!("0x{:x}", LATEST_BLOCK)),
        Some("eth_getBlockByNumber") => {
            let expected_tag = format!("0x{:x}", LATEST_BLOCK);
            if params.get("tag") != Some(&expected_tag)
                || params.get("boolean").map(String::as_str) != Some("true")
            {
                Value::Null
            } else {
                match upstream.as_ref() {
                    Upstream::Block(txs) => {
                        let transactions: Vec<Value> = txs
                            .iter()
                            .map(|(hash, value)| {
                                json!({
                                    "hash": hash,
                                    "value": value,
                                    "from": "0x0000000000000000000000000000000000000001",
                                    "gas": "0x5208",
                                })
                            })
                            .collect();
                        json!({
                            "number": expected_tag,
                            "timestamp": "0x55ba467c",
                            "transactions": transactions,
                        })
                    }
                    _ => Value::Null,
                }
            }
        }
        _ => {
            return Json(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "error": {"code": -32601, "message": "method not found"}
            }))
            .into_response()
        }
    };

    Json(json!({"jsonrpc": "2.0", "id": 83, "result": result})).into_response()
}

/// Starts a fake Etherscan API and returns its `/api` URL.
pub async fn spawn_fake_etherscan(upstream: Upstream) -> (String, JoinHandle<()>) {
    let app = Router::new()
        .route("/api", get(api))
        .with_state(Arc::new(upstream));
    spawn(app, "/api").await
}

pub async fn spawn(app: Router, path: &str) -> (String, JoinHandle<()>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    let base_url = format!("http://{}{}", addr, path);
    let server = axum::serve(listener, app);
    let handle = tokio::spawn(async move {
        let _ = server.await;
    });
    (base_url, handle)
}
