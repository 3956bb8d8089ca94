//! Infrastructure wiring: pick and prepare the product store.

use std::sync::Arc;

use catalog_infra::{Config, InMemoryProductStore, PostgresProductStore, StoreBackend};
use catalog_products::{ProductStore, StoreResult};

/// Build the store selected by `config`.
///
/// With a `DATABASE_URI` this connects to Postgres and makes sure the
/// `products` table exists; otherwise the in-memory store is used.
pub async fn build_store(config: &Config) -> StoreResult<Arc<dyn ProductStore>> {
    match config.backend() {
        StoreBackend::InMemory => {
            tracing::warn!("DATABASE_URI not set; using in-memory product store");
            Ok(Arc::new(InMemoryProductStore::new()))
        }
        StoreBackend::Postgres { database_uri } => {
            let store = PostgresProductStore::connect(&database_uri).await?;
            store.init_schema().await?;
            tracing::info!("connected to postgres product store");
            Ok(Arc::new(store))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_products::ProductQuery;

    #[tokio::test]
    async fn default_config_runs_in_memory() {
        let store = build_store(&Config::default()).await.unwrap();
        assert_eq!(store.count(&ProductQuery::new()).await.unwrap(), 0);
    }
}
