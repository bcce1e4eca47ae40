use std::env;
use std::str::FromStr;
use std::time::Duration;

use guess_persistence::connection::DEFAULT_DATABASE_URL;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub scoring_base_url: String,
    pub scoring_timeout: Duration,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup; unset keys take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "PORT", defaults.port)?,
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            scoring_base_url: lookup("SCORING_BASE_URL").unwrap_or(defaults.scoring_base_url),
            scoring_timeout: Duration::from_secs(parse_or(
                &lookup,
                "SCORING_TIMEOUT_SECONDS",
                defaults.scoring_timeout.as_secs(),
            )?),
        })
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8787,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            scoring_base_url: "https://xiaoce.fun".to_string(),
            scoring_timeout: Duration::from_secs(10),
        }
    }
}
