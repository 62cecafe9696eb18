use serde::Serialize;

/// Successful expansion
#[derive(Debug, Serialize)]
pub struct ExpandResponse {
    pub expanded: String,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self { status: "ok", service: "netzero-expander" }
    }
}
