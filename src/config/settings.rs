use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// Per-operation deadlines for upstream calls.
#[derive(Debug, Clone)]
pub struct Timeouts {
    pub chat: Duration,
    pub vision: Duration,
    pub txt2img: Duration,
    pub models: Duration,
    pub health: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            chat: Duration::from_secs(120),
            vision: Duration::from_secs(60),
            txt2img: Duration::from_secs(180),
            models: Duration::from_secs(10),
            health: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub ollama_url: String,
    pub stable_diffusion_url: String,
    pub session_dir: PathBuf,
    /// Maximum number of turns kept per session and sent upstream.
    pub context_window: usize,
    pub default_chat_model: String,
    pub default_vision_model: String,
    pub timeouts: Timeouts,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            ollama_url: "http://localhost:11434".to_string(),
            stable_diffusion_url: "http://127.0.0.1:7860".to_string(),
            session_dir: PathBuf::from("sessions"),
            context_window: 20,
            default_chat_model: "mixtral:8x7b".to_string(),
            default_vision_model: "llava:latest".to_string(),
            timeouts: Timeouts::default(),
        }
    }
}

impl Config {
    /// Reads the configuration from the process environment, falling back to
    /// defaults for unset variables. Call `dotenvy::dotenv()` first to pick up
    /// a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let context_window = parse_var("CONTEXT_WINDOW", defaults.context_window)?;
        if context_window == 0 {
            return Err(ConfigError::InvalidValue {
                key: "CONTEXT_WINDOW",
                value: "0".to_string(),
            });
        }

        Ok(Self {
            host: env::var("NOVA_HOST").unwrap_or(defaults.host),
            port: parse_var("NOVA_PORT", defaults.port)?,
            ollama_url: env::var("OLLAMA_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.ollama_url),
            stable_diffusion_url: env::var("STABLE_DIFFUSION_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.stable_diffusion_url),
            session_dir: env::var("SESSION_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.session_dir),
            context_window,
            default_chat_model: env::var("DEFAULT_CHAT_MODEL")
                .unwrap_or(defaults.default_chat_model),
            default_vision_model: env::var("DEFAULT_VISION_MODEL")
                .unwrap_or(defaults.default_vision_model),
            timeouts: defaults.timeouts,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        Err(_) => Ok(default),
    }
}
