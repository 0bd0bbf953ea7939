use axum::{extract::DefaultBodyLimit, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod config;
pub mod error;
pub mod extract;
pub mod modules;
pub mod services;

use config::Config;
use modules::chat::orchestrator::ChatOrchestrator;
use modules::session::crud::{FileSessionRepository, SessionRepository};
use services::ollama::OllamaClient;
use services::stable_diffusion::StableDiffusionClient;

const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub ollama: OllamaClient,
    pub stable_diffusion: StableDiffusionClient,
    pub chat: Arc<ChatOrchestrator>,
}

impl AppState {
    /// State backed by one JSON file per session under `config.session_dir`.
    pub fn new(config: Config) -> Self {
        let sessions = Arc::new(FileSessionRepository::new(
            config.session_dir.clone(),
            config.context_window,
        ));
        Self::with_sessions(config, sessions)
    }

    pub fn with_sessions(config: Config, sessions: Arc<dyn SessionRepository>) -> Self {
        let ollama = OllamaClient::new(&config);
        let stable_diffusion = StableDiffusionClient::new(&config);
        let chat = Arc::new(ChatOrchestrator::new(sessions, ollama.clone()));

        Self {
            config: Arc::new(config),
            ollama,
            stable_diffusion,
            chat,
        }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(modules::health::routes::routes())
        .merge(modules::chat::routes::routes())
        .merge(modules::vision::routes::routes())
        .merge(modules::image::routes::routes())
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
