//! Engine registry for managing the configured sanitization engines

use dashmap::DashMap;
use std::sync::Arc;
use tracing::info;

use crate::config::{EngineConfig, EngineKind};
use crate::error::{AppError, Result};
use crate::sanitizer::{create_engine, run_engine, SanitizerEngine};

/// Status entry for one configured engine
#[derive(Debug, Clone)]
pub struct EngineStatus {
    pub name: String,
    pub kind: EngineKind,
    pub description: &'static str,
    pub enabled: bool,
}

struct RegisteredEngine {
    engine: Arc<dyn SanitizerEngine>,
    enabled: bool,
}

/// Registry of sanitization engines keyed by route name.
///
/// Disabled engines stay listed for discovery but are never served.
pub struct EngineRegistry {
    engines: DashMap<String, RegisteredEngine>,
}

impl EngineRegistry {
    /// Create a new empty engine registry
    pub fn new() -> Self {
        Self {
            engines: DashMap::new(),
        }
    }

    /// Initialize the registry from configuration
    pub fn initialize_from_config(&self, configs: &[EngineConfig]) -> Result<()> {
        for config in configs {
            self.add_engine(config.clone())?;
        }

        Ok(())
    }

    /// Add an engine from configuration
    pub fn add_engine(&self, config: EngineConfig) -> Result<()> {
        if self.engines.contains_key(&config.name) {
            return Err(AppError::InvalidRequest(format!(
                "Engine '{}' already exists",
                config.name
            )));
        }

        let engine = create_engine(&config);
        self.engines.insert(
            config.name.clone(),
            RegisteredEngine {
                engine,
                enabled: config.enabled,
            },
        );
        info!(
            name = %config.name,
            kind = %config.kind,
            enabled = config.enabled,
            "Registered engine"
        );

        Ok(())
    }

    /// Get a servable engine by name; disabled engines are not served
    pub fn get(&self, name: &str) -> Option<Arc<dyn SanitizerEngine>> {
        self.engines
            .get(name)
            .filter(|r| r.value().enabled)
            .map(|r| r.value().engine.clone())
    }

    /// Sanitize input through a named engine, catching engine panics
    pub fn sanitize(&self, name: &str, input: &str) -> Result<String> {
        let engine = self
            .get(name)
            .ok_or_else(|| AppError::EngineNotFound(name.to_string()))?;
        run_engine(engine.as_ref(), input)
    }

    /// List all configured engines with their status, disabled ones included
    pub fn list_engines(&self) -> Vec<EngineStatus> {
        let mut statuses: Vec<EngineStatus> = self
            .engines
            .iter()
            .map(|r| EngineStatus {
                name: r.key().clone(),
                kind: r.value().engine.kind(),
                description: r.value().engine.description(),
                enabled: r.value().enabled,
            })
            .collect();
        statuses.sort_by(|a, b| a.name.cmp(&b.name));
        statuses
    }

    /// Number of engines available for serving
    pub fn len(&self) -> usize {
        self.engines.iter().filter(|r| r.value().enabled).count()
    }

    /// Whether no engine is available for serving
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for EngineRegistry {
    fn default() -> Self {
        Self::new()
    }
}
