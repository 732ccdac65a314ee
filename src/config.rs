use std::env;
use std::str::FromStr;

use crate::error::AppError;

const DEFAULT_JWT_EXPIRATION_MS: i64 = 24 * 60 * 60 * 1000;

/// Runtime settings, read once at startup and passed down by value.
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection string. `None` selects the in-memory store.
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub server_port: u16,
    pub server_host: String,
    pub jwt_secret: String,
    /// Token lifetime in milliseconds.
    pub jwt_expiration_ms: i64,
    /// Origin allowed by the CORS layer.
    pub frontend_url: String,
    pub bcrypt_cost: u32,
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|secret| !secret.is_empty())
            .ok_or_else(|| AppError::Configuration("JWT_SECRET must be set".into()))?;
        let jwt_expiration_ms =
            parse_or(&lookup, "JWT_EXPIRATION_MS", DEFAULT_JWT_EXPIRATION_MS)?;
        if jwt_expiration_ms <= 0 {
            return Err(AppError::Configuration(
                "JWT_EXPIRATION_MS must be positive".into(),
            ));
        }

        Ok(Self {
            database_url: lookup("DATABASE_URL").filter(|url| !url.is_empty()),
            database_max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 5)?,
            server_port: parse_or(&lookup, "SERVER_PORT", 8080)?,
            server_host: lookup("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            jwt_secret,
            jwt_expiration_ms,
            frontend_url: lookup("FRONTEND_URL")
                .unwrap_or_else(|| "http://localhost:3000".to_string()),
            bcrypt_cost: parse_or(&lookup, "BCRYPT_COST", bcrypt::DEFAULT_COST)?,
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }

    pub fn token_lifetime(&self) -> chrono::Duration {
        chrono::Duration::milliseconds(self.jwt_expiration_ms)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Configuration(format!("{} must be a number, got {:?}", key, raw))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::from_lookup(lookup_from(&[("JWT_SECRET", "s3cr3t")])).unwrap();

        assert!(config.database_url.is_none());
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.server_host, "127.0.0.1");
        assert_eq!(config.jwt_expiration_ms, 86_400_000);
        assert_eq!(config.frontend_url, "http://localhost:3000");
        assert_eq!(config.bcrypt_cost, bcrypt::DEFAULT_COST);
        assert_eq!(config.server_url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_config_custom_values() {
        let config = Config::from_lookup(lookup_from(&[
            ("JWT_SECRET", "s3cr3t"),
            ("DATABASE_URL", "postgres://test"),
            ("SERVER_PORT", "3000"),
            ("SERVER_HOST", "0.0.0.0"),
            ("JWT_EXPIRATION_MS", "60000"),
            ("FRONTEND_URL", "https://todo.example.com"),
            ("BCRYPT_COST", "4"),
        ]))
        .unwrap();

        assert_eq!(config.database_url.as_deref(), Some("postgres://test"));
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.server_host, "0.0.0.0");
        assert_eq!(config.token_lifetime(), chrono::Duration::seconds(60));
        assert_eq!(config.frontend_url, "https://todo.example.com");
        assert_eq!(config.bcrypt_cost, 4);
    }

    #[test]
    fn test_config_requires_jwt_secret() {
        let result = Config::from_lookup(lookup_from(&[]));
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[test]
    fn test_config_rejects_non_positive_expiration() {
        for raw in ["0", "-1000", "-9223372036854775808"] {
            let result = Config::from_lookup(lookup_from(&[
                ("JWT_SECRET", "s3cr3t"),
                ("JWT_EXPIRATION_MS", raw),
            ]));
            assert!(
                matches!(result, Err(AppError::Configuration(_))),
                "JWT_EXPIRATION_MS={} should be rejected",
                raw
            );
        }
    }

    #[test]
    fn test_config_rejects_non_numeric_port() {
        let result = Config::from_lookup(lookup_from(&[
            ("JWT_SECRET", "s3cr3t"),
            ("SERVER_PORT", "eighty"),
        ]));
        match result {
            Err(AppError::Configuration(msg)) => assert!(msg.contains("SERVER_PORT")),
            other => panic!("expected configuration error, got {:?}", other),
        }
    }
}
