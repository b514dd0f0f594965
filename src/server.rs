use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    response::Html,
    routing::{get, post},
};
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::warn;

use crate::{
    error::ServiceError,
    gateway::CompletionGateway,
    prompt::{DEFAULT_TONE, GenerationRequest, GenerationResponse, Mode, TONE_SUGGESTIONS},
};

const INDEX_HTML: &str = include_str!("../assets/index.html");

#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<CompletionGateway>,
}

#[derive(Serialize)]
struct ModesResponse {
    modes: [Mode; 4],
    default_mode: Mode,
    tones: [&'static str; 5],
    default_tone: &'static str,
}

pub fn build_router(gateway: Arc<CompletionGateway>) -> Router {
    let state = AppState { gateway };

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/modes", get(modes))
        .route("/api/optimize", post(optimize))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health() -> &'static str {
    "ok"
}

async fn modes() -> Json<ModesResponse> {
    Json(ModesResponse {
        modes: Mode::ALL,
        default_mode: Mode::default(),
        tones: TONE_SUGGESTIONS,
        default_tone: DEFAULT_TONE,
    })
}

async fn optimize(
    State(state): State<AppState>,
    payload: Result<Json<GenerationRequest>, JsonRejection>,
) -> Result<Json<GenerationResponse>, ServiceError> {
    // A missing credential outranks a malformed body.
    state.gateway.credential()?;

    let Json(request) = payload.map_err(|rejection| {
        warn!(%rejection, "rejected optimize payload");
        ServiceError::Validation(rejection.body_text())
    })?;

    let response = state.gateway.handle(request).await.inspect_err(|err| {
        warn!(error = %err, "optimization failed");
    })?;
    Ok(Json(response))
}
