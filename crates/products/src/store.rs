//! Persistence port for products.
//!
//! The entity operations on [`Product`] take the store explicitly; adapters
//! (in-memory, Postgres) live in `catalog-infra`.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use catalog_core::DomainError;

use crate::product::{Product, ProductId};
use crate::query::ProductQuery;

/// Infrastructure failure raised by a store adapter.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("store lock poisoned")]
    Poisoned,
}

impl StoreError {
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Error returned by the product entity operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProductError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Durable product storage.
///
/// Every method is a single unit of work; atomicity is the adapter's concern.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Insert a new row and return the assigned identity. Any `id` already on
    /// `product` is ignored.
    async fn insert(&self, product: &Product) -> StoreResult<ProductId>;

    /// Overwrite the row keyed by `id`. Returns `false` when no row matched.
    async fn update(&self, id: ProductId, product: &Product) -> StoreResult<bool>;

    /// Remove the row keyed by `id`. Missing rows are not an error.
    async fn delete(&self, id: ProductId) -> StoreResult<()>;

    async fn get(&self, id: ProductId) -> StoreResult<Option<Product>>;

    /// All rows, ordered by id.
    async fn list(&self) -> StoreResult<Vec<Product>>;

    /// Rows matching every filter in `query`, ordered by id.
    async fn fetch(&self, query: &ProductQuery) -> StoreResult<Vec<Product>>;

    async fn count(&self, query: &ProductQuery) -> StoreResult<u64>;

    /// Remove every row.
    async fn clear(&self) -> StoreResult<()>;
}

#[async_trait]
impl<S> ProductStore for Arc<S>
where
    S: ProductStore + ?Sized,
{
    async fn insert(&self, product: &Product) -> StoreResult<ProductId> {
        (**self).insert(product).await
    }

    async fn update(&self, id: ProductId, product: &Product) -> StoreResult<bool> {
        (**self).update(id, product).await
    }

    async fn delete(&self, id: ProductId) -> StoreResult<()> {
        (**self).delete(id).await
    }

    async fn get(&self, id: ProductId) -> StoreResult<Option<Product>> {
        (**self).get(id).await
    }

    async fn list(&self) -> StoreResult<Vec<Product>> {
        (**self).list().await
    }

    async fn fetch(&self, query: &ProductQuery) -> StoreResult<Vec<Product>> {
        (**self).fetch(query).await
    }

    async fn count(&self, query: &ProductQuery) -> StoreResult<u64> {
        (**self).count(query).await
    }

    async fn clear(&self) -> StoreResult<()> {
        (**self).clear().await
    }
}
