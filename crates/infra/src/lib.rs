//! Infrastructure layer: product store adapters and configuration.

pub mod config;
pub mod store;

pub use config::{Config, ConfigError, StoreBackend};
pub use store::{InMemoryProductStore, PostgresProductStore};
