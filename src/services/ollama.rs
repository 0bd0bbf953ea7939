use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::{Config, Timeouts};
use crate::modules::health::schema::HealthReport;
use crate::modules::session::model::ChatTurn;
use crate::services::upstream::{self, UpstreamError};

const SERVICE: &str = "Ollama";

#[derive(Debug, Clone, Copy, Serialize)]
pub struct SamplingOptions {
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
}

impl SamplingOptions {
    pub const CHAT: SamplingOptions = SamplingOptions {
        temperature: 0.7,
        top_p: Some(0.9),
        top_k: Some(40),
    };

    pub const VISION: SamplingOptions = SamplingOptions {
        temperature: 0.7,
        top_p: None,
        top_k: None,
    };
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatTurn],
    stream: bool,
    options: SamplingOptions,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    images: [&'a str; 1],
    stream: bool,
    options: SamplingOptions,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: String,
}

pub struct ChatCompletion {
    /// Upstream body, relayed to the caller untouched.
    pub raw: Value,
    pub reply: ChatTurn,
}

#[derive(Clone)]
pub struct OllamaClient {
    client: Client,
    base_url: String,
    timeouts: Timeouts,
}

impl OllamaClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            base_url: config.ollama_url.clone(),
            timeouts: config.timeouts.clone(),
        }
    }

    pub async fn chat(
        &self,
        model: &str,
        messages: &[ChatTurn],
        options: SamplingOptions,
    ) -> Result<ChatCompletion, UpstreamError> {
        let request = ChatRequest {
            model,
            messages,
            stream: false,
            options,
        };
        let timeout = self.timeouts.chat;

        tracing::info!(model, turns = messages.len(), "forwarding chat to {}", SERVICE);

        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .timeout(timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| UpstreamError::from_reqwest(SERVICE, timeout, e))?;

        let raw = upstream::read_json(SERVICE, timeout, response).await?;

        let parsed: ChatResponse =
            serde_json::from_value(raw.clone()).map_err(|e| UpstreamError::InvalidResponse {
                service: SERVICE,
                message: format!("missing assistant message: {}", e),
            })?;

        Ok(ChatCompletion {
            raw,
            reply: ChatTurn::assistant(parsed.message.content),
        })
    }

    /// Single-shot generation with one attached image (base64).
    pub async fn generate(
        &self,
        model: &str,
        prompt: &str,
        image_base64: &str,
        options: SamplingOptions,
    ) -> Result<Value, UpstreamError> {
        let request = GenerateRequest {
            model,
            prompt,
            images: [image_base64],
            stream: false,
            options,
        };
        let timeout = self.timeouts.vision;

        tracing::info!(model, image_len = image_base64.len(), "forwarding vision prompt to {}", SERVICE);

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .timeout(timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| UpstreamError::from_reqwest(SERVICE, timeout, e))?;

        upstream::read_json(SERVICE, timeout, response).await
    }

    pub async fn list_models(&self) -> Result<Value, UpstreamError> {
        let timeout = self.timeouts.models;

        let response = self
            .client
            .get(format!("{}/api/tags", self.base_url))
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| UpstreamError::from_reqwest(SERVICE, timeout, e))?;

        upstream::read_json(SERVICE, timeout, response).await
    }

    pub async fn health(&self) -> HealthReport {
        upstream::probe(&self.client, &self.base_url, "/api/tags", self.timeouts.health).await
    }
}
