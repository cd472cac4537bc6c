use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use crate::models::ScoringWeights;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub cors: CorsSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub recommendation: RecommendationSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub embedding: EmbeddingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8000 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CorsSettings {
    /// Allowed origins; empty means any origin
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogSettings {
    /// JSON or TOML product file; the bundled catalog is used when unset
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationSettings {
    #[serde(default = "default_top_k")]
    pub default_top_k: usize,
    #[serde(default = "default_max_top_k")]
    pub max_top_k: usize,
    #[serde(default = "default_model_version")]
    pub model_version: String,
    #[serde(default = "default_confidence")]
    pub confidence: f64,
}

impl Default for RecommendationSettings {
    fn default() -> Self {
        Self {
            default_top_k: default_top_k(),
            max_top_k: default_max_top_k(),
            model_version: default_model_version(),
            confidence: default_confidence(),
        }
    }
}

fn default_top_k() -> usize { 5 }
fn default_max_top_k() -> usize { 50 }
fn default_model_version() -> String { "v1.0.0".to_string() }
fn default_confidence() -> f64 { 0.85 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_age_fit_weight")]
    pub age_fit: f64,
    #[serde(default = "default_age_miss_weight")]
    pub age_miss: f64,
    #[serde(default = "default_symptom_weight")]
    pub symptom_overlap: f64,
    #[serde(default = "default_scenario_weight")]
    pub scenario_fit: f64,
    #[serde(default = "default_price_weight")]
    pub price_fit: f64,
    #[serde(default = "default_screen_time_weight")]
    pub screen_time_bonus: f64,
    #[serde(default = "default_screen_time_threshold")]
    pub screen_time_threshold_hours: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            age_fit: default_age_fit_weight(),
            age_miss: default_age_miss_weight(),
            symptom_overlap: default_symptom_weight(),
            scenario_fit: default_scenario_weight(),
            price_fit: default_price_weight(),
            screen_time_bonus: default_screen_time_weight(),
            screen_time_threshold_hours: default_screen_time_threshold(),
        }
    }
}

impl From<&WeightsConfig> for ScoringWeights {
    fn from(config: &WeightsConfig) -> Self {
        Self {
            age_fit: config.age_fit,
            age_miss: config.age_miss,
            symptom_overlap: config.symptom_overlap,
            scenario_fit: config.scenario_fit,
            price_fit: config.price_fit,
            screen_time_bonus: config.screen_time_bonus,
            screen_time_threshold_hours: config.screen_time_threshold_hours,
        }
    }
}

fn default_age_fit_weight() -> f64 { 0.3 }
fn default_age_miss_weight() -> f64 { 0.1 }
fn default_symptom_weight() -> f64 { 0.4 }
fn default_scenario_weight() -> f64 { 0.2 }
fn default_price_weight() -> f64 { 0.1 }
fn default_screen_time_weight() -> f64 { 0.2 }
fn default_screen_time_threshold() -> f64 { 6.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingSettings {
    /// Capacity bound; unbounded when unset
    pub max_entries: Option<u64>,
    /// Entry time to live; entries never expire when unset
    pub ttl_secs: Option<u64>,
    /// Model id to vector dimension
    #[serde(default = "crate::services::default_model_dimensions")]
    pub models: BTreeMap<String, usize>,
}

impl EmbeddingSettings {
    pub fn ttl(&self) -> Option<Duration> {
        self.ttl_secs.map(Duration::from_secs)
    }
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            max_entries: None,
            ttl_secs: None,
            models: crate::services::default_model_dimensions(),
        }
    }
}

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
    /// 4. Environment variables (prefixed with EYECARE_)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., EYECARE__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    pub fn scoring_weights(&self) -> ScoringWeights {
        ScoringWeights::from(&self.scoring.weights)
    }
}

fn environment() -> Environment {
    Environment::with_prefix("EYECARE")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_match_scoring_defaults() {
        let weights = ScoringWeights::from(&WeightsConfig::default());
        assert_eq!(weights, ScoringWeights::default());
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let settings: Settings = Config::builder()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.server.port, 8000);
        assert_eq!(settings.recommendation.default_top_k, 5);
        assert_eq!(settings.embedding.models.get("text"), Some(&384));
        assert!(settings.catalog.path.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("eyecare-config-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(
            &path,
            "[recommendation]\nmax_top_k = 10\n\n[scoring.weights]\nprice_fit = 0.25\n",
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(settings.recommendation.max_top_k, 10);
        assert_eq!(settings.scoring_weights().price_fit, 0.25);
        assert_eq!(settings.scoring_weights().age_fit, 0.3);
    }
}
