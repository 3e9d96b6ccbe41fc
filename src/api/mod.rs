use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

use crate::etherscan::BlockSource;
use crate::job::{generate_report, JobError};
use crate::models::Report;

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn BlockSource>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn report(
    State(state): State<AppState>,
) -> Result<Json<Report>, (StatusCode, Json<ErrorResponse>)> {
    match generate_report(state.source.as_ref()).await {
        Ok(report) => Ok(Json(report)),
        Err(err) => {
            tracing::error!("report failed: {}", err);
            let status = match err {
                JobError::Fetch(_) => StatusCode::BAD_GATEWAY,
                JobError::Normalize(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            Err((
                status,
                Json(ErrorResponse {
                    error: err.to_string(),
                }),
            ))
        }
    }
}

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/report", get(report))
        .with_state(state)
}

pub async fn run_http_server(addr: &str, state: AppState) -> anyhow::Result<()> {
    let app = app_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("HTTP server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
