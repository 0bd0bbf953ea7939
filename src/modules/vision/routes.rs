use axum::{routing::post, Router};

use crate::modules::vision::controller;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/vision", post(controller::analyze))
        .route("/vision/upload", post(controller::analyze_upload))
}
