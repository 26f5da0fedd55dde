//! Environment configuration for the API server.

use std::net::SocketAddr;
use thiserror::Error;

const DEFAULT_BIND: &str = "0.0.0.0:8000";
const DEFAULT_POOL_SIZE: u32 = 10;

/// Backing store selected for records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    /// `PostgreSQL` through Diesel.
    Postgres,
    /// Process-local memory; records vanish on exit.
    Memory,
}

/// Errors returned while loading configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required variable is unset or blank.
    #[error("{0} must be set")]
    Missing(&'static str),

    /// A variable holds a value that cannot be used.
    #[error("{name} has invalid value {value:?}: {reason}")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// Rejected value.
        value: String,
        /// Why the value was rejected.
        reason: &'static str,
    },
}

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// `PostgreSQL` connection string; absent for the memory store.
    pub database_url: Option<String>,
    /// Listen address.
    pub bind: SocketAddr,
    /// Maximum pooled database connections.
    pub pool_size: u32,
    /// Emit JSON log lines instead of plain text.
    pub log_json: bool,
    /// Selected record store.
    pub store: StoreKind,
}

impl AppConfig {
    /// Loads configuration from the process environment, after reading an
    /// optional `.env` file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] naming the first unusable variable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is normal outside local development.
        let _env_file = dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] naming the first unusable variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let value = |name: &str| lookup(name).filter(|raw| !raw.trim().is_empty());

        let store = match value("NVX29_STORE") {
            None => StoreKind::Postgres,
            Some(raw) => parse_store(&raw)?,
        };
        let database_url = value("DATABASE_URL");
        if store == StoreKind::Postgres && database_url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }

        let bind_raw = value("NVX29_BIND").unwrap_or_else(|| DEFAULT_BIND.to_owned());
        let bind = bind_raw
            .trim()
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::Invalid {
                name: "NVX29_BIND",
                value: bind_raw.clone(),
                reason: "expected host:port",
            })?;

        let pool_size = match value("NVX29_DB_POOL_SIZE") {
            None => DEFAULT_POOL_SIZE,
            Some(raw) => parse_pool_size(&raw)?,
        };

        let log_json = match value("NVX29_LOG_JSON") {
            None => false,
            Some(raw) => parse_bool("NVX29_LOG_JSON", &raw)?,
        };

        Ok(Self {
            database_url,
            bind,
            pool_size,
            log_json,
            store,
        })
    }
}

fn parse_store(raw: &str) -> Result<StoreKind, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "postgres" | "postgresql" => Ok(StoreKind::Postgres),
        "memory" => Ok(StoreKind::Memory),
        _ => Err(ConfigError::Invalid {
            name: "NVX29_STORE",
            value: raw.to_owned(),
            reason: "expected postgres or memory",
        }),
    }
}

fn parse_pool_size(raw: &str) -> Result<u32, ConfigError> {
    match raw.trim().parse::<u32>() {
        Ok(size) if size >= 1 => Ok(size),
        _ => Err(ConfigError::Invalid {
            name: "NVX29_DB_POOL_SIZE",
            value: raw.to_owned(),
            reason: "expected a positive integer",
        }),
    }
}

fn parse_bool(name: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim() {
        "1" | "true" | "TRUE" | "yes" | "YES" => Ok(true),
        "0" | "false" | "FALSE" | "no" | "NO" => Ok(false),
        _ => Err(ConfigError::Invalid {
            name,
            value: raw.to_owned(),
            reason: "expected a boolean",
        }),
    }
}
