use anyhow::{Context, Result};

use crate::matching::aggregate::Weights;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub retention_days: u32,
    pub shortlist_max_results: usize,
    pub weights: Weights,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            retention_days: 365,
            shortlist_max_results: 20,
            weights: Weights::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        let weights = match std::env::var("MATCH_WEIGHTS") {
            Ok(table) => Weights::parse_table(&table).context("MATCH_WEIGHTS is invalid")?,
            Err(_) => defaults.weights,
        };

        Ok(Config {
            port: parse_env("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            retention_days: parse_env("RETENTION_DAYS", defaults.retention_days)?,
            shortlist_max_results: parse_env("SHORTLIST_MAX_RESULTS", defaults.shortlist_max_results)?,
            weights,
        })
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.retention_days, 365);
        assert_eq!(config.shortlist_max_results, 20);
        assert_eq!(config.weights, Weights::default());
    }

    #[test]
    fn test_parse_env_falls_back_when_unset() {
        let value: u32 = parse_env("CVBANK_TEST_SURELY_UNSET_VAR", 7).unwrap();
        assert_eq!(value, 7);
    }
}
