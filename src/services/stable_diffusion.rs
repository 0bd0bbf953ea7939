use reqwest::Client;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::{Config, Timeouts};
use crate::modules::health::schema::HealthReport;
use crate::modules::image::schema::GenerateImageRequest;
use crate::services::upstream::{self, UpstreamError};

const SERVICE: &str = "Stable Diffusion WebUI";

/// txt2img body. Batch settings are pinned: one image per call, returned
/// inline and never written to the WebUI's output folder.
#[derive(Debug, Serialize)]
struct Txt2ImgRequest<'a> {
    prompt: &'a str,
    negative_prompt: &'a str,
    steps: u32,
    cfg_scale: f32,
    width: u32,
    height: u32,
    seed: i64,
    sampler_name: &'a str,
    batch_size: u32,
    n_iter: u32,
    save_images: bool,
    send_images: bool,
    alwayson_scripts: Map<String, Value>,
}

impl<'a> From<&'a GenerateImageRequest> for Txt2ImgRequest<'a> {
    fn from(request: &'a GenerateImageRequest) -> Self {
        Self {
            prompt: &request.prompt,
            negative_prompt: &request.negative_prompt,
            steps: request.steps,
            cfg_scale: request.cfg_scale,
            width: request.width,
            height: request.height,
            seed: request.seed,
            sampler_name: &request.sampler_name,
            batch_size: 1,
            n_iter: 1,
            save_images: false,
            send_images: true,
            alwayson_scripts: Map::new(),
        }
    }
}

#[derive(Clone)]
pub struct StableDiffusionClient {
    client: Client,
    base_url: String,
    timeouts: Timeouts,
}

impl StableDiffusionClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            base_url: config.stable_diffusion_url.clone(),
            timeouts: config.timeouts.clone(),
        }
    }

    pub async fn txt2img(&self, request: &GenerateImageRequest) -> Result<Value, UpstreamError> {
        let payload = Txt2ImgRequest::from(request);
        let timeout = self.timeouts.txt2img;

        tracing::info!(
            steps = payload.steps,
            width = payload.width,
            height = payload.height,
            "requesting txt2img from {}",
            SERVICE
        );

        let response = self
            .client
            .post(format!("{}/sdapi/v1/txt2img", self.base_url))
            .timeout(timeout)
            .json(&payload)
            .send()
            .await
            .map_err(|e| UpstreamError::from_reqwest(SERVICE, timeout, e))?;

        upstream::read_json(SERVICE, timeout, response).await
    }

    pub async fn list_models(&self) -> Result<Value, UpstreamError> {
        let timeout = self.timeouts.models;

        let response = self
            .client
            .get(format!("{}/sdapi/v1/sd-models", self.base_url))
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| UpstreamError::from_reqwest(SERVICE, timeout, e))?;

        upstream::read_json(SERVICE, timeout, response).await
    }

    pub async fn health(&self) -> HealthReport {
        upstream::probe(
            &self.client,
            &self.base_url,
            "/sdapi/v1/sd-models",
            self.timeouts.health,
        )
        .await
    }
}
