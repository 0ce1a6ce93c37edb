use std::env;

use thiserror::Error;

pub const PORT: u16 = 8080;

const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_BIND_HOST: &str = "0.0.0.0";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable is not set")]
    Missing(&'static str),

    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub bind_host: String,
    pub interpreter_url: Option<String>,
}

impl AppConfig {
    /// Loads `.env` when present, then reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        if dotenvy::dotenv().is_err() {
            tracing::debug!("no .env file found, assuming environment variables are set");
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "DATABASE_MAX_CONNECTIONS",
                        message: format!("expected a positive integer, got {:?}", raw),
                    });
                }
            },
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let bind_host = lookup("BIND_HOST")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_HOST.to_string());

        let interpreter_url = lookup("QUERY_INTERPRETER_URL").filter(|v| !v.trim().is_empty());

        Ok(Self {
            database_url,
            max_connections,
            bind_host,
            interpreter_url,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_host, PORT)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn missing_database_url_is_fatal() {
        let err = AppConfig::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("DATABASE_URL"));

        let err = AppConfig::from_lookup(lookup(&[("DATABASE_URL", "  ")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("DATABASE_URL"));
    }

    #[test]
    fn defaults_apply() {
        let config =
            AppConfig::from_lookup(lookup(&[("DATABASE_URL", "sqlite://tasks.db")])).unwrap();
        assert_eq!(config.database_url, "sqlite://tasks.db");
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert!(config.interpreter_url.is_none());
    }

    #[test]
    fn rejects_bad_pool_size() {
        for raw in ["0", "-1", "many"] {
            let err = AppConfig::from_lookup(lookup(&[
                ("DATABASE_URL", "sqlite://tasks.db"),
                ("DATABASE_MAX_CONNECTIONS", raw),
            ]))
            .unwrap_err();
            assert!(matches!(err, ConfigError::Invalid { key: "DATABASE_MAX_CONNECTIONS", .. }));
        }
    }

    #[test]
    fn reads_optional_values() {
        let config = AppConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
            ("BIND_HOST", "127.0.0.1"),
            ("QUERY_INTERPRETER_URL", "http://localhost:9000/interpret"),
        ]))
        .unwrap();
        assert_eq!(config.max_connections, 12);
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
        assert_eq!(
            config.interpreter_url.as_deref(),
            Some("http://localhost:9000/interpret")
        );
    }
}
