//! HTTP route definitions

use crate::api::handlers;
use crate::api::models::*;
use crate::middleware::rate_limit::{self, SharedRateLimiter};
use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Sanitizer Serving Gateway API",
        version = "0.3.1",
        description = "Unified gateway exposing multiple HTML sanitization engines. \
                       Each engine is also served on its own demo route: GET /{engine}?text=...",
        license(name = "MIT"),
    ),
    paths(
        handlers::sanitize_demo,
        handlers::sanitize_json,
        handlers::list_engines,
        handlers::health_check,
    ),
    components(schemas(
        SanitizeRequest,
        SanitizeResponse,
        EngineInfo,
        EngineListResponse,
        HealthResponse,
        EngineSummary,
    )),
    tags(
        (name = "Sanitize", description = "Sanitization endpoints"),
        (name = "Engines", description = "Engine discovery endpoints"),
        (name = "Health", description = "Health and monitoring endpoints"),
    )
)]
pub struct ApiDoc;

/// Create the main application router
pub async fn create_router(state: Arc<crate::AppState>) -> Router {
    // Get configuration for middleware
    let (rate_limit_enabled, rps, burst) = {
        let config = state.settings.read().await;
        (
            config.rate_limit.enabled,
            config.rate_limit.requests_per_second,
            config.rate_limit.burst_size,
        )
    };

    // JSON API routes, served under /v1
    let api_routes = Router::new()
        .route("/sanitize", post(handlers::sanitize_json))
        .route("/engines", get(handlers::list_engines));

    // One demo route per engine; static routes below take precedence
    let demo_routes = Router::new().route("/:engine", get(handlers::sanitize_demo));

    // Apply rate limiting conditionally; health and docs stay unthrottled
    let (api_routes, demo_routes) = if rate_limit_enabled {
        let limiter: SharedRateLimiter = rate_limit::build_limiter(rps, burst);
        (
            api_routes.layer(from_fn_with_state(limiter.clone(), rate_limit::rate_limit)),
            demo_routes.layer(from_fn_with_state(limiter, rate_limit::rate_limit)),
        )
    } else {
        (api_routes, demo_routes)
    };

    // Build the full router
    Router::new()
        // Health check endpoint (never throttled)
        .route("/health", get(handlers::health_check))
        // Metrics endpoint
        .route("/metrics", get(handlers::metrics))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // API routes under /v1 prefix
        .nest("/v1", api_routes)
        // Per-engine demo routes at the root, as the original servers laid them out
        .merge(demo_routes)
        // Add shared state
        .with_state(state)
        // Add tracing layer
        .layer(TraceLayer::new_for_http())
        // The demo routes are fetched cross-origin by fuzzing harnesses
        .layer(CorsLayer::permissive())
}
