use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct VisionRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Prompt cannot be empty"))]
    pub prompt: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Image cannot be empty"))]
    pub image: String,
    pub model: Option<String>,
}
