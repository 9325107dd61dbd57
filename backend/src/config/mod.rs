//! Central module for application-wide configuration settings.
//!
//! This module handles loading and managing configuration parameters such as
//! the database URL, server port, token signing secret and password hashing cost.
//! Values are read once at startup and handed to the components that need them.

use crate::utils::password::{MAX_COST, MIN_COST};
use anyhow::{Context, Result, bail};
use std::env;

/// Longest token lifetime accepted from the environment: one year.
pub const MAX_TOKEN_LIFETIME_SECONDS: u64 = 365 * 24 * 60 * 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
    pub jwt_secret: String,
    pub jwt_expires_in_seconds: u64,
    pub bcrypt_cost: u32,
    pub server_port: u16,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL not set")?;

        let max_connections = lookup("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|| "5".to_string())
            .parse::<u32>()
            .context("DB_MAX_CONNECTIONS must be a valid number")?;

        let acquire_timeout_seconds = lookup("DB_ACQUIRE_TIMEOUT_SECONDS")
            .unwrap_or_else(|| "3".to_string())
            .parse::<u64>()
            .context("DB_ACQUIRE_TIMEOUT_SECONDS must be a valid number")?;

        let jwt_secret = lookup("JWT_SECRET").context("JWT_SECRET not set")?;
        if jwt_secret.is_empty() {
            bail!("JWT_SECRET must not be empty");
        }

        let jwt_expires_in_seconds = lookup("JWT_EXPIRES_IN_SECONDS")
            .unwrap_or_else(|| "86400".to_string())
            .parse::<u64>()
            .context("JWT_EXPIRES_IN_SECONDS must be a valid number")?;
        if !(1..=MAX_TOKEN_LIFETIME_SECONDS).contains(&jwt_expires_in_seconds) {
            bail!(
                "JWT_EXPIRES_IN_SECONDS must be between 1 and {}",
                MAX_TOKEN_LIFETIME_SECONDS
            );
        }

        let bcrypt_cost = lookup("BCRYPT_COST")
            .unwrap_or_else(|| bcrypt::DEFAULT_COST.to_string())
            .parse::<u32>()
            .context("BCRYPT_COST must be a valid number")?;
        if !(MIN_COST..=MAX_COST).contains(&bcrypt_cost) {
            bail!("BCRYPT_COST must be between {} and {}", MIN_COST, MAX_COST);
        }

        let server_port = lookup("SERVER_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse::<u16>()
            .context("SERVER_PORT must be a valid number")?;

        Ok(Config {
            database_url,
            max_connections,
            acquire_timeout_seconds,
            jwt_secret,
            jwt_expires_in_seconds,
            bcrypt_cost,
            server_port,
        })
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
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_applied() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("JWT_SECRET", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.max_connections, 5);
        assert_eq!(config.acquire_timeout_seconds, 3);
        assert_eq!(config.jwt_expires_in_seconds, 86_400);
        assert_eq!(config.bcrypt_cost, bcrypt::DEFAULT_COST);
        assert_eq!(config.server_port, 3000);
    }

    #[test]
    fn test_missing_secret_rejected() {
        let result = Config::from_lookup(lookup_from(&[("DATABASE_URL", "sqlite::memory:")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_secret_rejected() {
        let result = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("JWT_SECRET", ""),
        ]));
        let message = result.unwrap_err().to_string();
        assert!(message.contains("JWT_SECRET"));
    }

    #[test]
    fn test_invalid_numbers_rejected() {
        let result = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("JWT_SECRET", "secret"),
            ("SERVER_PORT", "not-a-port"),
        ]));
        assert!(result.is_err());

        let result = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("JWT_SECRET", "secret"),
            ("BCRYPT_COST", "2"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_token_lifetime_out_of_range_rejected() {
        for value in ["0", "31536001", "18446744073709551615"] {
            let result = Config::from_lookup(lookup_from(&[
                ("DATABASE_URL", "sqlite::memory:"),
                ("JWT_SECRET", "secret"),
                ("JWT_EXPIRES_IN_SECONDS", value),
            ]));
            let message = result.unwrap_err().to_string();
            assert!(message.contains("JWT_EXPIRES_IN_SECONDS"), "{value}: {message}");
        }

        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("JWT_SECRET", "secret"),
            ("JWT_EXPIRES_IN_SECONDS", "31536000"),
        ]))
        .unwrap();
        assert_eq!(config.jwt_expires_in_seconds, MAX_TOKEN_LIFETIME_SECONDS);
    }
}
