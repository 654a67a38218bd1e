use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::core::GestureParams;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub session: SessionSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub gesture: GestureSettings,
    #[serde(default)]
    pub enrichment: EnrichmentSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    /// Selected operating region, or the global sentinel
    #[serde(default = "default_locality")]
    pub locality: String,
    #[serde(default = "default_global_sentinel")]
    pub global_sentinel: String,
    /// Company named as destination in transfer drafts
    #[serde(default = "default_buyer_company")]
    pub buyer_company: String,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            locality: default_locality(),
            global_sentinel: default_global_sentinel(),
            buyer_company: default_buyer_company(),
        }
    }
}

fn default_locality() -> String { "global".to_string() }
fn default_global_sentinel() -> String { "global".to_string() }
fn default_buyer_company() -> String { "EcoWater Solutions".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSettings {
    #[serde(default = "default_catalog_path")]
    pub path: String,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self { path: default_catalog_path() }
    }
}

fn default_catalog_path() -> String { "data/catalog.toml".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct GestureSettings {
    #[serde(default = "default_swipe_threshold")]
    pub swipe_threshold: f64,
    #[serde(default = "default_feedback_dead_zone")]
    pub feedback_dead_zone: f64,
    #[serde(default = "default_feedback_saturation")]
    pub feedback_saturation: f64,
    #[serde(default = "default_max_tilt_degrees")]
    pub max_tilt_degrees: f64,
    #[serde(default = "default_tilt_range")]
    pub tilt_range: f64,
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            swipe_threshold: default_swipe_threshold(),
            feedback_dead_zone: default_feedback_dead_zone(),
            feedback_saturation: default_feedback_saturation(),
            max_tilt_degrees: default_max_tilt_degrees(),
            tilt_range: default_tilt_range(),
        }
    }
}

impl From<&GestureSettings> for GestureParams {
    fn from(settings: &GestureSettings) -> Self {
        Self {
            swipe_threshold: settings.swipe_threshold,
            feedback_dead_zone: settings.feedback_dead_zone,
            feedback_saturation: settings.feedback_saturation,
            max_tilt_degrees: settings.max_tilt_degrees,
            tilt_range: settings.tilt_range,
        }
    }
}

fn default_swipe_threshold() -> f64 { 120.0 }
fn default_feedback_dead_zone() -> f64 { 20.0 }
fn default_feedback_saturation() -> f64 { 100.0 }
fn default_max_tilt_degrees() -> f64 { 10.0 }
fn default_tilt_range() -> f64 { 200.0 }

/// Which analyzer backs enrichment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalyzerKind {
    #[default]
    Simulated,
    Http,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnrichmentSettings {
    #[serde(default)]
    pub analyzer: AnalyzerKind,
    /// Artificial delay of the simulated analyzer
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
}

impl EnrichmentSettings {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for EnrichmentSettings {
    fn default() -> Self {
        Self {
            analyzer: AnalyzerKind::default(),
            latency_ms: default_latency_ms(),
            timeout_ms: default_timeout_ms(),
            endpoint: None,
            api_key: None,
        }
    }
}

fn default_latency_ms() -> u64 { 800 }
fn default_timeout_ms() -> u64 { 5_000 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with CHEMMATCH_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., CHEMMATCH__SESSION__LOCALITY -> session.locality
            .add_source(
                Environment::with_prefix("CHEMMATCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("CHEMMATCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply the un-prefixed analyzer variables commonly set by deployments
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let endpoint = env::var("ANALYZER_ENDPOINT").ok();
    let api_key = env::var("ANALYZER_API_KEY").ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(endpoint) = endpoint {
        builder = builder.set_override("enrichment.endpoint", endpoint)?;
    }
    if let Some(api_key) = api_key {
        builder = builder.set_override("enrichment.api_key", api_key)?;
    }

    builder.build()
}
