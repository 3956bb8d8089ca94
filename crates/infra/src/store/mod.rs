//! `ProductStore` adapters.
//!
//! - `InMemoryProductStore`: dev/test, process-local.
//! - `PostgresProductStore`: durable, backed by `sqlx::PgPool`.

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryProductStore;
pub use postgres::PostgresProductStore;
