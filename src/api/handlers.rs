//! HTTP request handlers

use crate::api::models::{
    DemoParams, EngineInfo, EngineListResponse, EngineSummary, HealthResponse, SanitizeRequest,
    SanitizeResponse,
};
use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{Html, IntoResponse, Response},
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

/// Body returned when the demo routes receive no input
const NO_TEXT_GIVEN: &str = "No text given";

/// Demo route: feed the `text` query parameter through one engine
///
/// Contract shared by all the original demo servers: missing or empty input
/// yields a plain-text placeholder with status 200, engine output comes back
/// verbatim as text/html, and an engine failure becomes a 500 whose body is
/// the failure message.
#[utoipa::path(
    get,
    path = "/{engine}",
    tag = "Sanitize",
    params(
        ("engine" = String, Path, description = "Registered engine name"),
        DemoParams,
    ),
    responses(
        (status = 200, description = "Sanitized markup, or the no-input placeholder"),
        (status = 404, description = "Unknown engine"),
        (status = 500, description = "Engine failure, body is the failure message"),
    )
)]
pub async fn sanitize_demo(
    State(state): State<Arc<AppState>>,
    Path(engine): Path<String>,
    Query(params): Query<DemoParams>,
) -> Result<Response, AppError> {
    if state.engines.get(&engine).is_none() {
        return Err(AppError::EngineNotFound(engine));
    }

    let text = match params.text {
        Some(text) if !text.is_empty() => text,
        _ => {
            return Ok((
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                NO_TEXT_GIVEN,
            )
                .into_response());
        }
    };

    info!(engine = %engine, received_bytes = text.len(), "Received sanitize request");

    let max_input_bytes = state.settings.read().await.limits.max_input_bytes;
    if text.len() > max_input_bytes {
        return Err(AppError::InvalidRequest(format!(
            "Input exceeds {} bytes",
            max_input_bytes
        )));
    }

    let sanitized = state.engines.sanitize(&engine, &text)?;
    Ok(Html(sanitized).into_response())
}

/// Sanitize via the JSON API
#[utoipa::path(
    post,
    path = "/v1/sanitize",
    tag = "Sanitize",
    request_body = SanitizeRequest,
    responses(
        (status = 200, description = "Sanitized markup", body = SanitizeResponse),
        (status = 400, description = "Input too large"),
        (status = 404, description = "Unknown engine"),
        (status = 500, description = "Engine failure, body is the failure message"),
    )
)]
pub async fn sanitize_json(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SanitizeRequest>,
) -> Result<Json<SanitizeResponse>, AppError> {
    info!(
        engine = %request.engine,
        received_bytes = request.text.len(),
        "Received sanitize request"
    );

    let max_input_bytes = state.settings.read().await.limits.max_input_bytes;
    if request.text.len() > max_input_bytes {
        return Err(AppError::InvalidRequest(format!(
            "Input exceeds {} bytes",
            max_input_bytes
        )));
    }

    let sanitized = state.engines.sanitize(&request.engine, &request.text)?;

    Ok(Json(SanitizeResponse {
        engine: request.engine,
        sanitized,
        created: Utc::now().timestamp(),
    }))
}

/// List all registered engines
#[utoipa::path(
    get,
    path = "/v1/engines",
    tag = "Engines",
    responses(
        (status = 200, description = "Registered engines", body = EngineListResponse),
    )
)]
pub async fn list_engines(
    State(state): State<Arc<AppState>>,
) -> Result<Json<EngineListResponse>, AppError> {
    let engines = state
        .engines
        .list_engines()
        .into_iter()
        .map(|status| EngineInfo {
            name: status.name,
            kind: status.kind.to_string(),
            description: status.description.to_string(),
            enabled: status.enabled,
        })
        .collect();

    Ok(Json(EngineListResponse { engines }))
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Gateway health", body = HealthResponse),
    )
)]
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HealthResponse>, AppError> {
    let registered = state.engines.len();

    Ok(Json(HealthResponse {
        status: if registered > 0 { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        engines: EngineSummary { registered },
    }))
}

/// Metrics endpoint (Prometheus format placeholder)
pub async fn metrics(State(state): State<Arc<AppState>>) -> String {
    format!(
        "# HELP sanitizer_gateway_engines_registered Number of registered engines\n\
         # TYPE sanitizer_gateway_engines_registered gauge\n\
         sanitizer_gateway_engines_registered {}\n",
        state.engines.len()
    )
}
