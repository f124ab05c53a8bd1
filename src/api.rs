//! HTTP API for the itinerary service
//!
//! Thin projection of the orchestration core: one generation endpoint
//! and one connectivity-status endpoint for the UI's provider badge.

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::completion::CompletionBackend;
use crate::models::{ItineraryResult, TripRequest};
use crate::orchestrator::Orchestrator;
use crate::WanderplanError;

/// Shared state for the API handlers
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Orchestrator,
    pub backend: Arc<dyn CompletionBackend>,
}

/// JSON error envelope returned on failures
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Connectivity badge payload
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusBody {
    pub connected: bool,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/itinerary", post(generate_itinerary))
        .route("/status", get(get_status))
        .with_state(state)
}

async fn generate_itinerary(
    State(state): State<AppState>,
    Json(request): Json<TripRequest>,
) -> Result<Json<ItineraryResult>, (StatusCode, Json<ErrorBody>)> {
    match state.orchestrator.generate(&request).await {
        Ok(result) => Ok(Json(result)),
        Err(e) => Err(error_response(e)),
    }
}

async fn get_status(State(state): State<AppState>) -> Json<StatusBody> {
    let connected = state.backend.probe().await;
    Json(StatusBody { connected })
}

fn error_response(error: WanderplanError) -> (StatusCode, Json<ErrorBody>) {
    let status = match &error {
        WanderplanError::Validation { .. } => StatusCode::BAD_REQUEST,
        WanderplanError::Upstream { .. } => StatusCode::BAD_GATEWAY,
        WanderplanError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let detail = match &error {
        WanderplanError::Upstream { detail, .. } if !detail.is_empty() => Some(detail.clone()),
        _ => None,
    };

    (
        status,
        Json(ErrorBody {
            error: error.user_message(),
            detail,
        }),
    )
}
