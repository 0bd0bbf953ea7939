use axum::{
    routing::{get, post},
    Router,
};

use crate::modules::chat::controller;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/chat", post(controller::chat))
        .route("/chat/models", get(controller::list_models))
        .route("/chat/session/{id}", get(controller::get_session))
}
