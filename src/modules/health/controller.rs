use axum::{extract::State, Json};
use std::collections::BTreeMap;

use crate::modules::health::schema::{HealthReport, ServiceStatusResponse};
use crate::AppState;

pub async fn service_status() -> Json<ServiceStatusResponse> {
    let endpoints = BTreeMap::from([
        ("chat", "POST /chat"),
        ("chat_models", "GET /chat/models"),
        ("chat_session", "GET /chat/session/{id}"),
        ("vision", "POST /vision"),
        ("vision_upload", "POST /vision/upload"),
        ("image_generate", "POST /image/generate"),
        ("image_models", "GET /image/models"),
        ("health_ollama", "GET /health/ollama"),
        ("health_stable_diffusion", "GET /health/stable-diffusion"),
    ]);

    Json(ServiceStatusResponse {
        status: "healthy",
        message: "Nova AI backend is running",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().to_rfc3339(),
        endpoints,
    })
}

pub async fn ollama(State(state): State<AppState>) -> Json<HealthReport> {
    Json(state.ollama.health().await)
}

pub async fn stable_diffusion(State(state): State<AppState>) -> Json<HealthReport> {
    Json(state.stable_diffusion.health().await)
}
