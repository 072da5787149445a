//! Sanitizer Serving Gateway
//!
//! A Rust-based gateway serving multiple HTML sanitization engines (each a
//! named configuration of a sanitization library) through a unified API,
//! one demo route per engine.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod sanitizer;

pub use error::{AppError, Result};

use std::sync::Arc;
use tokio::sync::RwLock;

use sanitizer::registry::EngineRegistry;

/// Application state shared across all handlers
pub struct AppState {
    pub settings: Arc<RwLock<config::Settings>>,
    pub engines: Arc<EngineRegistry>,
}
