use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

fn default_steps() -> u32 {
    20
}

fn default_cfg_scale() -> f32 {
    7.0
}

fn default_dimension() -> u32 {
    512
}

fn default_seed() -> i64 {
    -1
}

fn default_sampler() -> String {
    "Euler a".to_string()
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateImageRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Prompt cannot be empty"))]
    pub prompt: String,
    #[serde(default)]
    pub negative_prompt: String,
    #[serde(default = "default_steps")]
    #[validate(range(min = 1, max = 150))]
    pub steps: u32,
    #[serde(default = "default_cfg_scale")]
    #[validate(range(min = 1.0, max = 30.0))]
    pub cfg_scale: f32,
    #[serde(default = "default_dimension")]
    #[validate(range(min = 64, max = 2048))]
    pub width: u32,
    #[serde(default = "default_dimension")]
    #[validate(range(min = 64, max = 2048))]
    pub height: u32,
    /// `-1` lets the WebUI pick a random seed.
    #[serde(default = "default_seed")]
    pub seed: i64,
    #[serde(default = "default_sampler")]
    pub sampler_name: String,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct GenerateImageResponse {
    pub images: Vec<String>,
    pub parameters: Value,
    pub info: Value,
}
