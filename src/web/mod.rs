// Web server — Axum-based HTTP front end for the analysis pipeline.
//
// POST /api/analyze takes a CSV body and returns the AnalysisResult JSON.
// Each request runs on a blocking worker with its own deadline; requests
// share nothing but the read-only AnalysisConfig.

use std::sync::Arc;

use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, ErrorEnvelope};

pub mod handlers;

/// Largest CSV upload accepted by /api/analyze.
const MAX_BODY_BYTES: usize = 32 * 1024 * 1024;

/// Shared application state threaded through all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub analysis: Arc<AnalysisConfig>,
}

/// Start the Axum web server and block until it exits.
pub async fn run_server(analysis: AnalysisConfig, port: u16, bind: &str) -> Result<()> {
    let state = AppState {
        analysis: Arc::new(analysis),
    };

    let app = build_router(state);

    let addr = format!("{bind}:{port}");
    info!("Murmur listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/analyze", post(handlers::analyze::analyze_csv))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check — always returns 200 OK.
async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({ "status": "ok" })),
    )
}

/// HTTP status for an analysis failure.
pub fn status_for(err: &AnalysisError) -> StatusCode {
    match err {
        AnalysisError::EmptyCorpus => StatusCode::UNPROCESSABLE_ENTITY,
        AnalysisError::DeadlineExceeded { .. } => StatusCode::GATEWAY_TIMEOUT,
        e if e.is_input_error() => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Error envelope response for an analysis failure.
pub fn analysis_error(err: &AnalysisError) -> Response {
    (status_for(err), axum::Json(ErrorEnvelope::from(err))).into_response()
}

/// Typed JSON error response helper.
pub fn api_error(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(serde_json::json!({ "error": message }))).into_response()
}
