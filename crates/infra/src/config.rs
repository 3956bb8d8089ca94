//! Configuration loading and representation.
//!
//! Everything comes from the process environment:
//!
//! - `DATABASE_URI`: Postgres connection string. Unset or empty selects the
//!   in-memory store.
//! - `PORT`: listen port (default `8080`).
//! - `BIND_ADDRESS`: listen address (default `0.0.0.0`).

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid PORT value '{0}'")]
    InvalidPort(String),
}

/// Which `ProductStore` adapter the service runs on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    InMemory,
    Postgres { database_uri: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_uri: Option<String>,
    pub bind_address: String,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_uri: None,
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (tests pass a map here).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = match non_empty("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            database_uri: non_empty("DATABASE_URI"),
            bind_address: non_empty("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            port,
        })
    }

    pub fn backend(&self) -> StoreBackend {
        match &self.database_uri {
            Some(uri) => StoreBackend::Postgres {
                database_uri: uri.clone(),
            },
            None => StoreBackend::InMemory,
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}
