use reqwest::{Response, StatusCode};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::modules::health::schema::{HealthReport, ProbeStatus};

#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("{service} is not reachable: {source}")]
    Unreachable {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{service} did not answer within {}s", .timeout.as_secs())]
    Timeout {
        service: &'static str,
        timeout: Duration,
    },
    #[error("{service} returned {status}: {body}")]
    Status {
        service: &'static str,
        status: StatusCode,
        body: String,
    },
    #[error("Request to {service} could not be built: {source}")]
    Misconfigured {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{service} returned an invalid response: {message}")]
    InvalidResponse {
        service: &'static str,
        message: String,
    },
}

impl UpstreamError {
    /// Classifies a reqwest failure. Anything not recognised as a bad URL,
    /// a timeout or an undecodable body counts as unreachable.
    pub fn from_reqwest(service: &'static str, timeout: Duration, err: reqwest::Error) -> Self {
        if err.is_builder() {
            UpstreamError::Misconfigured { service, source: err }
        } else if err.is_timeout() {
            UpstreamError::Timeout { service, timeout }
        } else if err.is_decode() {
            UpstreamError::InvalidResponse {
                service,
                message: err.to_string(),
            }
        } else {
            UpstreamError::Unreachable { service, source: err }
        }
    }
}

/// Checks the status of an upstream response and decodes its JSON body.
pub async fn read_json(
    service: &'static str,
    timeout: Duration,
    response: Response,
) -> Result<Value, UpstreamError> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(UpstreamError::Status {
            service,
            status,
            body,
        });
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| UpstreamError::from_reqwest(service, timeout, e))?;

    serde_json::from_slice(&bytes).map_err(|e| UpstreamError::InvalidResponse {
        service,
        message: e.to_string(),
    })
}

/// Shallow liveness probe. Never fails; the outcome is folded into the report.
pub async fn probe(
    client: &reqwest::Client,
    base_url: &str,
    path: &str,
    timeout: Duration,
) -> HealthReport {
    let url = format!("{}{}", base_url, path);

    let status = match client.get(&url).timeout(timeout).send().await {
        Ok(response) if response.status().is_success() => ProbeStatus::Healthy,
        Ok(response) => {
            tracing::warn!("health probe {} answered {}", url, response.status());
            ProbeStatus::Error
        }
        Err(e) => {
            tracing::warn!("health probe {} failed: {}", url, e);
            ProbeStatus::Unreachable
        }
    };

    HealthReport {
        status,
        url: base_url.to_string(),
    }
}
