//! Sanitizer module - engine trait, builtin policies, and registry

pub mod mastodon;
pub mod policies;
pub mod registry;

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use crate::config::{EngineConfig, EngineKind};
use crate::error::{AppError, Result};

pub use registry::EngineRegistry;

/// A named configuration of an HTML sanitization library.
///
/// Engines are pure string transformers; all parsing and filtering happens
/// inside the wrapped library. The gateway returns engine output verbatim.
pub trait SanitizerEngine: Send + Sync {
    /// Builtin kind this engine instantiates
    fn kind(&self) -> EngineKind;

    /// Human-readable summary of the wrapped library configuration
    fn description(&self) -> &'static str;

    /// Sanitize one input fragment
    fn sanitize(&self, input: &str) -> Result<String>;
}

/// Create an engine instance for a configured kind
pub fn create_engine(config: &EngineConfig) -> Arc<dyn SanitizerEngine> {
    match config.kind {
        EngineKind::Default => Arc::new(policies::DefaultEngine),
        EngineKind::Restricted => Arc::new(policies::RestrictedEngine::new()),
        EngineKind::Ugc => Arc::new(policies::UgcEngine::new()),
        EngineKind::MastodonStrict => Arc::new(mastodon::StrictEngine::new()),
        EngineKind::MastodonOembed => Arc::new(mastodon::OembedEngine::new()),
        EngineKind::Escape => Arc::new(policies::EscapeEngine),
        EngineKind::Strip => Arc::new(policies::StripEngine::new()),
    }
}

/// Run an engine, converting a panic inside the wrapped library into an
/// error. The whole point of serving these engines is feeding them hostile
/// markup; a crashing library must surface as a 500, not kill the process.
pub fn run_engine(engine: &dyn SanitizerEngine, input: &str) -> Result<String> {
    match catch_unwind(AssertUnwindSafe(|| engine.sanitize(input))) {
        Ok(result) => result,
        Err(payload) => {
            let message = if let Some(s) = payload.downcast_ref::<&str>() {
                (*s).to_string()
            } else if let Some(s) = payload.downcast_ref::<String>() {
                s.clone()
            } else {
                "sanitizer panicked".to_string()
            };
            Err(AppError::Sanitize(message))
        }
    }
}
