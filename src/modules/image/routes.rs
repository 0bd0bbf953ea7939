use axum::{
    routing::{get, post},
    Router,
};

use crate::modules::image::controller;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/image/generate", post(controller::generate))
        .route("/image/models", get(controller::list_models))
}
