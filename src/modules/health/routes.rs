use axum::{routing::get, Router};

use crate::modules::health::controller;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(controller::service_status))
        .route("/health/ollama", get(controller::ollama))
        .route("/health/stable-diffusion", get(controller::stable_diffusion))
}
