use anyhow::Context;
use nova_backend::{app, config::Config, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nova_backend=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env().context("invalid configuration")?;
    let addr = config.bind_addr();

    tracing::info!("Ollama at {}", config.ollama_url);
    tracing::info!("Stable Diffusion WebUI at {}", config.stable_diffusion_url);
    tracing::info!("Sessions stored in {}", config.session_dir.display());

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("listening on {}", addr);

    axum::serve(listener, app(AppState::new(config))).await?;

    Ok(())
}
