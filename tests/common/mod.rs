#![allow(dead_code)]

use axum::Router;
use axum_test::TestServer;
use nova_backend::{app, config::Config, AppState};
use serde_json::Value;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Nothing listens on port 1, so connections are refused immediately.
pub const UNREACHABLE_URL: &str = "http://127.0.0.1:1";

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn spawn_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

pub fn test_config(ollama_url: &str, stable_diffusion_url: &str, session_dir: &Path) -> Config {
    Config {
        ollama_url: ollama_url.to_string(),
        stable_diffusion_url: stable_diffusion_url.to_string(),
        session_dir: session_dir.to_path_buf(),
        ..Config::default()
    }
}

pub fn test_server(config: Config) -> TestServer {
    TestServer::new(app(AppState::new(config))).unwrap()
}

/// Request bodies received by a fake upstream, in arrival order.
#[derive(Clone, Default)]
pub struct Recorded(Arc<Mutex<Vec<Value>>>);

impl Recorded {
    pub fn push(&self, body: Value) {
        self.0.lock().unwrap().push(body);
    }

    pub fn all(&self) -> Vec<Value> {
        self.0.lock().unwrap().clone()
    }

    pub fn last(&self) -> Value {
        self.all().last().cloned().expect("upstream received no request")
    }
}
