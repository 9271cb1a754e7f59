//! Configuration management for ImpactRank services
//!
//! Supports loading configuration from:
//! - Environment variables (prefixed with APP__)
//! - Configuration files (config.toml, config.yaml)
//! - Default values

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

use crate::errors::{AppError, Result};

/// Main application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Ranking defaults applied when a request omits a parameter
    #[serde(default)]
    pub ranking: RankingConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Maximum request body size in bytes
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// Maximum number of papers accepted in one ranking request
    #[serde(default = "default_max_papers")]
    pub max_papers: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RankingConfig {
    /// Citation resolution policy: max, mean
    #[serde(default = "default_citation_policy")]
    pub citation_policy: String,

    /// PageRank damping factor (clamped to [0.01, 0.99] by the engine)
    #[serde(default = "default_damping")]
    pub damping: f64,

    /// Power iteration budget
    #[serde(default = "default_iterations")]
    pub iterations: usize,

    /// L1 convergence tolerance
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// Base weight per influence edge kind
    #[serde(default = "default_edge_weights")]
    pub edge_weights: BTreeMap<String, f64>,

    /// Weight for edge kinds missing from `edge_weights` when the table
    /// has no `llm_inferred` entry
    #[serde(default = "default_fallback_edge_weight")]
    pub fallback_edge_weight: f64,

    /// Blend weights keyed by pagerank, evidence, novelty
    #[serde(default = "default_impact_weights")]
    pub impact_weights: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level (debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default = "default_json_logging")]
    pub json_logging: bool,

    /// Metrics port (0 to disable)
    #[serde(default = "default_metrics_port")]
    pub metrics_port: u16,

    /// Service name for tracing
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

// Default value functions
fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }
fn default_request_timeout() -> u64 { 30 }
fn default_max_body_bytes() -> usize { 2 * 1024 * 1024 }
fn default_max_papers() -> usize { 10_000 }
fn default_citation_policy() -> String { "max".to_string() }
fn default_damping() -> f64 { 0.85 }
fn default_iterations() -> usize { 80 }
fn default_tolerance() -> f64 { 1e-9 }
fn default_fallback_edge_weight() -> f64 { 0.3 }
fn default_log_level() -> String { "info".to_string() }
fn default_json_logging() -> bool { true }
fn default_metrics_port() -> u16 { 9090 }
fn default_service_name() -> String { "impactrank".to_string() }

fn default_edge_weights() -> BTreeMap<String, f64> {
    BTreeMap::from([
        ("citation".to_string(), 1.0),
        ("llm_inferred".to_string(), 0.5),
    ])
}

fn default_impact_weights() -> BTreeMap<String, f64> {
    BTreeMap::from([
        ("pagerank".to_string(), 0.7),
        ("evidence".to_string(), 0.2),
        ("novelty".to_string(), 0.1),
    ])
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout(),
            max_body_bytes: default_max_body_bytes(),
            max_papers: default_max_papers(),
        }
    }
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            citation_policy: default_citation_policy(),
            damping: default_damping(),
            iterations: default_iterations(),
            tolerance: default_tolerance(),
            edge_weights: default_edge_weights(),
            fallback_edge_weight: default_fallback_edge_weight(),
            impact_weights: default_impact_weights(),
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logging: default_json_logging(),
            metrics_port: default_metrics_port(),
            service_name: default_service_name(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment and files
    pub fn load() -> std::result::Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            // Start with defaults
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?

            // Load base config file
            .add_source(File::with_name("config/default").required(false))

            // Load environment-specific config
            .add_source(File::with_name(&format!("config/{}", env)).required(false))

            // Load local overrides
            .add_source(File::with_name("config/local").required(false))

            // Load from environment variables with APP__ prefix
            // e.g., APP__RANKING__DAMPING=0.9
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )

            .build()?;

        config.try_deserialize()
    }

    /// Check numeric settings that would make the service unusable.
    ///
    /// Ranking weights and the citation policy are checked by the ranking
    /// crate when the defaults are resolved.
    pub fn validate(&self) -> Result<()> {
        if self.server.max_papers == 0 {
            return Err(AppError::Configuration {
                message: "server.max_papers must be positive".to_string(),
            });
        }
        if self.ranking.iterations == 0 {
            return Err(AppError::Configuration {
                message: "ranking.iterations must be positive".to_string(),
            });
        }
        if !(self.ranking.tolerance.is_finite() && self.ranking.tolerance > 0.0) {
            return Err(AppError::Configuration {
                message: format!(
                    "ranking.tolerance must be a positive number, got {}",
                    self.ranking.tolerance
                ),
            });
        }
        if !self.ranking.damping.is_finite() {
            return Err(AppError::Configuration {
                message: "ranking.damping must be a finite number".to_string(),
            });
        }
        Ok(())
    }

    /// Get request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.request_timeout_secs)
    }
}
