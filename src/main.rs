//! Main entry point for the Sanitizer Serving Gateway

use sanitizer_serving_gateway::{
    api,
    config::Settings,
    sanitizer::EngineRegistry,
    AppState,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    // Load configuration
    let settings = Settings::load()?;
    settings.validate()?;

    // Initialize logging; RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));

    if settings.logging.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .init();
    }

    info!("Starting Sanitizer Serving Gateway");
    info!(
        "Loaded configuration: server={}:{}",
        settings.server.host, settings.server.port
    );

    // Initialize engine registry from configuration
    let engines = Arc::new(EngineRegistry::new());
    engines.initialize_from_config(&settings.engines)?;
    info!("Registered {} engines", engines.len());

    let settings = Arc::new(RwLock::new(settings));

    // Create application state
    let app_state = Arc::new(AppState {
        settings: settings.clone(),
        engines,
    });

    // Build the router
    let app = api::routes::create_router(app_state.clone()).await;

    // Get server address
    let addr = {
        let config = settings.read().await;
        format!("{}:{}", config.server.host, config.server.port)
    };

    info!("Server listening on {}", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
