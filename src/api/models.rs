//! API request and response models

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Query parameters of the per-engine demo routes
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DemoParams {
    /// The markup to sanitize
    #[serde(default)]
    pub text: Option<String>,
}

/// Sanitize request (JSON API)
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct SanitizeRequest {
    /// The markup to sanitize
    pub text: String,

    /// Engine to run the input through
    #[serde(default = "default_engine")]
    pub engine: String,
}

fn default_engine() -> String {
    "default".to_string()
}

/// Sanitize response (JSON API)
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct SanitizeResponse {
    /// Engine that produced the output
    pub engine: String,

    /// Sanitized markup, returned byte-for-byte as the engine produced it
    pub sanitized: String,

    /// Unix timestamp of processing
    pub created: i64,
}

/// Engine information for discovery
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct EngineInfo {
    pub name: String,
    pub kind: String,
    pub description: String,
    pub enabled: bool,
}

/// Engine list response
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct EngineListResponse {
    pub engines: Vec<EngineInfo>,
}

/// Health check response
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub engines: EngineSummary,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct EngineSummary {
    pub registered: usize,
}
