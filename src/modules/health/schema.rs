use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProbeStatus {
    Healthy,
    Error,
    Unreachable,
}

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: ProbeStatus,
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct ServiceStatusResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub version: &'static str,
    pub timestamp: String,
    pub endpoints: BTreeMap<&'static str, &'static str>,
}
