use axum::{
    extract::{Multipart, State},
    Json,
};
use serde_json::Value;

use crate::error::AppError;
use crate::extract::ValidatedJson;
use crate::modules::vision::{model::ImageInput, schema::VisionRequest};
use crate::services::ollama::SamplingOptions;
use crate::AppState;

async fn analyze_image(
    state: &AppState,
    prompt: &str,
    image: ImageInput,
    model: Option<String>,
) -> Result<Value, AppError> {
    let image_base64 = image.validate().await?;
    let model = model
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| state.config.default_vision_model.clone());

    let body = state
        .ollama
        .generate(&model, prompt, &image_base64, SamplingOptions::VISION)
        .await
        .map_err(|e| {
            tracing::warn!("vision upstream failed: {}", e);
            AppError::from(e)
        })?;

    Ok(body)
}

pub async fn analyze(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<VisionRequest>,
) -> Result<Json<Value>, AppError> {
    let body = analyze_image(
        &state,
        &payload.prompt,
        ImageInput::Base64(payload.image),
        payload.model,
    )
    .await?;

    Ok(Json(body))
}

pub async fn analyze_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    let mut prompt: Option<String> = None;
    let mut model: Option<String> = None;
    let mut image_data: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "prompt" => {
                prompt = Some(field.text().await.map_err(|e| {
                    AppError::InvalidInput(format!("Failed to read prompt: {}", e))
                })?);
            }
            "model" => {
                model = Some(field.text().await.map_err(|e| {
                    AppError::InvalidInput(format!("Failed to read model: {}", e))
                })?);
            }
            "file" | "image" => {
                let data = field.bytes().await.map_err(|e| {
                    AppError::InvalidInput(format!("Failed to read file: {}", e))
                })?;
                image_data = Some(data.to_vec());
            }
            _ => {}
        }
    }

    let prompt = prompt
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| AppError::InvalidInput("Prompt cannot be empty".to_string()))?;
    let image_data =
        image_data.ok_or_else(|| AppError::InvalidInput("No image file provided".to_string()))?;

    let body = analyze_image(&state, &prompt, ImageInput::Bytes(image_data), model).await?;

    Ok(Json(body))
}
