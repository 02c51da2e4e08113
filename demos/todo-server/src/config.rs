//! Server configuration loaded from the environment.

use dashmap::DashMap;
use std::env;
use std::fmt::Display;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DATABASE_URL: &str = "sqlite::memory:";

#[derive(Debug, Error)]
#[error("invalid value {value:?} for {key}: {message}")]
pub struct ConfigError {
    pub key: String,
    pub value: String,
    pub message: String,
}

/// Key/value configuration backed by the process environment.
#[derive(Clone, Default)]
pub struct ConfigService {
    config: Arc<DashMap<String, String>>,
}

impl ConfigService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `.env` (if present) and then every environment variable.
    pub fn from_env() -> Self {
        if let Err(err) = dotenvy::dotenv() {
            tracing::debug!(error = %err, "no .env file loaded");
        }
        let service = Self::new();
        for (key, value) in env::vars() {
            service.set(&key, &value);
        }
        service
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.config.get(key).map(|v| v.clone())
    }

    pub fn set(&self, key: &str, value: &str) {
        self.config.insert(key.to_string(), value.to_string());
    }

    pub fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    /// Parse a value, falling back to `default` when the key is unset.
    pub fn parse_or<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: Display,
    {
        match self.get(key) {
            None => Ok(default),
            Some(value) => value.parse().map_err(|err: T::Err| ConfigError {
                key: key.to_string(),
                message: err.to_string(),
                value,
            }),
        }
    }
}

/// Typed settings of the to-do server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub host: IpAddr,
    pub port: u16,
    pub database_url: String,
}

impl Settings {
    pub fn load(config: &ConfigService) -> Result<Self, ConfigError> {
        let default_host: IpAddr = [127, 0, 0, 1].into();
        Ok(Self {
            host: config.parse_or("HOST", default_host)?,
            port: config.parse_or("PORT", DEFAULT_PORT)?,
            database_url: config.get_or("DATABASE_URL", DEFAULT_DATABASE_URL),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
