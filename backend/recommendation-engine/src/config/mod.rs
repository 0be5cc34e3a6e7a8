use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub engine: EngineConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub service_name: String,
    /// `json` switches log output to JSON lines
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Collaborative filtering knobs. Unset means every neighbor is consulted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EngineConfig {
    pub max_neighbors: Option<usize>,
    pub min_neighbor_similarity: Option<f64>,
}

impl Config {
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();

        Ok(Config {
            service: ServiceConfig {
                service_name: env::var("SERVICE_NAME")
                    .unwrap_or_else(|_| "recommendation-engine".to_string()),
                log_format: match env::var("LOG_FORMAT") {
                    Ok(value) if value.eq_ignore_ascii_case("json") => LogFormat::Json,
                    _ => LogFormat::Pretty,
                },
            },
            engine: EngineConfig::from_env()?,
        })
    }
}

impl EngineConfig {
    /// Reads `RECOMMENDATION_MAX_NEIGHBORS` and
    /// `RECOMMENDATION_MIN_NEIGHBOR_SIMILARITY`.
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::prefixed("RECOMMENDATION_").from_env::<EngineConfig>()
    }

    pub fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed("RECOMMENDATION_").from_iter(vars)
    }
}
