use axum::{extract::State, Json};
use serde_json::Value;

use crate::error::AppError;
use crate::extract::ValidatedJson;
use crate::modules::image::{
    model::normalize_txt2img,
    schema::{GenerateImageRequest, GenerateImageResponse},
};
use crate::AppState;

pub async fn generate(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<GenerateImageRequest>,
) -> Result<Json<GenerateImageResponse>, AppError> {
    let raw = state
        .stable_diffusion
        .txt2img(&payload)
        .await
        .map_err(|e| {
            tracing::warn!("txt2img failed: {}", e);
            AppError::from(e)
        })?;

    let response = normalize_txt2img(raw)?;
    tracing::info!(images = response.images.len(), "image generated");

    Ok(Json(response))
}

pub async fn list_models(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    state.stable_diffusion.list_models().await.map(Json).map_err(|e| {
        tracing::warn!("could not list image models: {}", e);
        AppError::ServiceUnavailable(format!("Could not fetch image models: {}", e))
    })
}
