//! Application settings and configuration management

use crate::error::{AppError, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub rate_limit: RateLimitConfig,
    pub limits: LimitsConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub engines: Vec<EngineConfig>,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_rps")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst_size: u32,
}

fn default_rps() -> u32 {
    100
}

fn default_burst() -> u32 {
    200
}

/// Request limits configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LimitsConfig {
    /// Maximum accepted length of the `text` parameter, in bytes
    #[serde(default = "default_max_input_bytes")]
    pub max_input_bytes: usize,
}

fn default_max_input_bytes() -> usize {
    1024 * 1024
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

/// Builtin engine kinds, each wrapping one sanitization library configuration
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum EngineKind {
    /// Stock ammonia allow-list (`ammonia::clean`)
    Default,
    /// Only `a[href]`, `img[src,alt]` and `strong`
    Restricted,
    /// User-generated-content policy: http/https/mailto links, forced nofollow
    Ugc,
    /// Port of Mastodon's strict status sanitizer configuration
    MastodonStrict,
    /// Port of Mastodon's oEmbed sanitizer configuration
    MastodonOembed,
    /// HTML-entity escape of the whole input
    Escape,
    /// Remove all markup, keep text content
    Strip,
}

impl std::fmt::Display for EngineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineKind::Default => write!(f, "default"),
            EngineKind::Restricted => write!(f, "restricted"),
            EngineKind::Ugc => write!(f, "ugc"),
            EngineKind::MastodonStrict => write!(f, "mastodon-strict"),
            EngineKind::MastodonOembed => write!(f, "mastodon-oembed"),
            EngineKind::Escape => write!(f, "escape"),
            EngineKind::Strip => write!(f, "strip"),
        }
    }
}

impl EngineKind {
    /// All builtin kinds, used when no engines file is provided
    pub fn all() -> &'static [EngineKind] {
        &[
            EngineKind::Default,
            EngineKind::Restricted,
            EngineKind::Ugc,
            EngineKind::MastodonStrict,
            EngineKind::MastodonOembed,
            EngineKind::Escape,
            EngineKind::Strip,
        ]
    }
}

/// Engine configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Route name the engine is served under (`GET /{name}`)
    pub name: String,

    pub kind: EngineKind,

    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

impl EngineConfig {
    /// Configuration serving a builtin kind under its canonical name
    pub fn builtin(kind: EngineKind) -> Self {
        Self {
            name: kind.to_string(),
            kind,
            enabled: true,
        }
    }
}

/// YAML engines configuration file structure
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct EnginesConfig {
    #[serde(default)]
    pub version: String,

    #[serde(default)]
    pub engines: Vec<EngineConfig>,
}

impl Settings {
    /// Load settings from configuration files and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_paths("config/gateway.yaml", Some("config/engines.yaml"))
    }

    /// Load settings from YAML configuration files
    pub fn load_from_paths<P: AsRef<Path>>(
        gateway_config: P,
        engines_config: Option<P>,
    ) -> Result<Self> {
        let gateway_path = gateway_config.as_ref();

        let format = if gateway_path
            .extension()
            .map_or(false, |ext| ext == "yaml" || ext == "yml")
        {
            FileFormat::Yaml
        } else {
            FileFormat::Toml
        };

        let mut config_builder = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("rate_limit.enabled", false)?
            .set_default("rate_limit.requests_per_second", 100)?
            .set_default("rate_limit.burst_size", 200)?
            .set_default("limits.max_input_bytes", 1024 * 1024)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "json")?;

        if gateway_path.exists() {
            config_builder = config_builder.add_source(File::from(gateway_path).format(format));
        }

        config_builder = config_builder.add_source(
            Environment::with_prefix("SANITIZER_GATEWAY")
                .separator("__")
                .try_parsing(true),
        );

        let config = config_builder.build()?;
        let mut settings: Settings = config.try_deserialize()?;

        // Load engines from separate file if provided
        if let Some(engines_path) = engines_config {
            let engines_path = engines_path.as_ref();
            if engines_path.exists() {
                let engines_config = Self::load_engines_config(engines_path)?;
                settings.engines = engines_config.engines;
            }
        }

        // No engines file means every builtin under its canonical name
        if settings.engines.is_empty() {
            settings.engines = EngineKind::all()
                .iter()
                .copied()
                .map(EngineConfig::builtin)
                .collect();
        }

        Ok(settings)
    }

    /// Load engines configuration from YAML file
    pub fn load_engines_config<P: AsRef<Path>>(path: P) -> Result<EnginesConfig> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            AppError::Config(config::ConfigError::Message(format!(
                "Failed to read engines config: {}",
                e
            )))
        })?;

        let config: EnginesConfig = serde_yaml::from_str(&content).map_err(|e| {
            AppError::Config(config::ConfigError::Message(format!(
                "Failed to parse engines config: {}",
                e
            )))
        })?;

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(AppError::Config(config::ConfigError::Message(
                "Server port cannot be 0".to_string(),
            )));
        }

        if self.limits.max_input_bytes == 0 {
            return Err(AppError::Config(config::ConfigError::Message(
                "limits.max_input_bytes cannot be 0".to_string(),
            )));
        }

        let mut seen = HashSet::new();
        for engine in &self.engines {
            if engine.name.is_empty() {
                return Err(AppError::Config(config::ConfigError::Message(
                    "Engine name cannot be empty".to_string(),
                )));
            }
            if !seen.insert(engine.name.as_str()) {
                return Err(AppError::Config(config::ConfigError::Message(format!(
                    "Duplicate engine name '{}'",
                    engine.name
                ))));
            }
        }

        Ok(())
    }

    /// Get enabled engines
    pub fn get_enabled_engines(&self) -> Vec<&EngineConfig> {
        self.engines.iter().filter(|e| e.enabled).collect()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: default_host(),
                port: default_port(),
            },
            rate_limit: RateLimitConfig {
                enabled: false,
                requests_per_second: default_rps(),
                burst_size: default_burst(),
            },
            limits: LimitsConfig {
                max_input_bytes: default_max_input_bytes(),
            },
            logging: LoggingConfig {
                level: default_log_level(),
                format: default_log_format(),
            },
            engines: EngineKind::all()
                .iter()
                .copied()
                .map(EngineConfig::builtin)
                .collect(),
        }
    }
}
