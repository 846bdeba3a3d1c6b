//! Configuration for the Turf API.

use serde::{Deserialize, Serialize};

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
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

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Weights for the linear scoring model.
///
/// Non-negative floats, not required to sum to 1. They are injected into each
/// evaluation call rather than read from global state, so the engine stays
/// pure and testable. Tuned externally; the engine treats them as opaque.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationWeights {
    #[serde(default = "default_w_recent_form")]
    pub recent_form: f64,
    #[serde(default = "default_w_terrain_affinity")]
    pub terrain_affinity: f64,
    #[serde(default = "default_w_distance_affinity")]
    pub distance_affinity: f64,
    #[serde(default = "default_w_jockey_win_rate")]
    pub jockey_win_rate: f64,
    #[serde(default = "default_w_trainer_win_rate")]
    pub trainer_win_rate: f64,
    /// Weight of the market-implied probability (1/odds).
    #[serde(default = "default_w_market_prob")]
    pub market_prob: f64,
}

fn default_w_recent_form() -> f64 {
    0.25
}

fn default_w_terrain_affinity() -> f64 {
    0.15
}

fn default_w_distance_affinity() -> f64 {
    0.15
}

fn default_w_jockey_win_rate() -> f64 {
    0.10
}

fn default_w_trainer_win_rate() -> f64 {
    0.10
}

fn default_w_market_prob() -> f64 {
    0.30
}

impl Default for EvaluationWeights {
    fn default() -> Self {
        Self {
            recent_form: default_w_recent_form(),
            terrain_affinity: default_w_terrain_affinity(),
            distance_affinity: default_w_distance_affinity(),
            jockey_win_rate: default_w_jockey_win_rate(),
            trainer_win_rate: default_w_trainer_win_rate(),
            market_prob: default_w_market_prob(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub weights: EvaluationWeights,
}

impl AppConfig {
    /// Load configuration from environment and config file
    pub fn load() -> anyhow::Result<Self> {
        let config = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&AppConfig::default())?)
            // Add config file if exists
            .add_source(config::File::with_name("config").required(false))
            // Override with environment variables (TURF__SERVER__PORT,
            // TURF__WEIGHTS__RECENT_FORM, etc.). The separator must be a
            // double underscore so field names containing underscores
            // survive the key split.
            .add_source(
                config::Environment::with_prefix("TURF")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
