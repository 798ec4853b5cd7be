// POST /api/analyze — run the full pipeline over a CSV request body.
//
// Returns 200 with the AnalysisResult JSON, or the error envelope with a
// status derived from the failure kind. The pipeline is CPU-bound, so it
// runs on tokio's blocking pool instead of the async workers.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{error, info, warn};

use crate::pipeline::analyze;
use crate::web::{analysis_error, api_error, AppState};

pub async fn analyze_csv(State(state): State<AppState>, body: Bytes) -> Response {
    let config = state.analysis.clone();
    let size = body.len();
    info!(bytes = size, "Analysis requested");

    let outcome = tokio::task::spawn_blocking(move || analyze(&body, &config)).await;

    match outcome {
        Ok(Ok(result)) => (StatusCode::OK, Json(result)).into_response(),
        Ok(Err(e)) => {
            warn!(kind = e.kind(), error = %e, "Analysis failed");
            analysis_error(&e)
        }
        Err(e) => {
            error!(error = %e, "Analysis worker panicked");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "analysis worker failed")
        }
    }
}
