//! Lazy, composable product queries.
//!
//! A [`ProductQuery`] is only a description of filters. Nothing is read from
//! the store until [`ProductQuery::fetch`] or [`ProductQuery::count`] runs.

use rust_decimal::Decimal;

use crate::category::Category;
use crate::product::Product;
use crate::store::{ProductStore, StoreResult};

/// A single equality predicate on a product column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductFilter {
    Name(String),
    Available(bool),
    Category(Category),
    Price(Decimal),
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            ProductFilter::Name(name) => product.name == *name,
            ProductFilter::Available(flag) => product.available == *flag,
            ProductFilter::Category(category) => product.category == *category,
            ProductFilter::Price(price) => product.price == *price,
        }
    }
}

/// Conjunction of [`ProductFilter`]s. An empty query matches every product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    filters: Vec<ProductFilter>,
}

impl ProductQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter (logical AND with the existing ones).
    pub fn and(mut self, filter: ProductFilter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn name(self, name: impl Into<String>) -> Self {
        self.and(ProductFilter::Name(name.into()))
    }

    pub fn available(self, flag: bool) -> Self {
        self.and(ProductFilter::Available(flag))
    }

    pub fn category(self, category: Category) -> Self {
        self.and(ProductFilter::Category(category))
    }

    pub fn price(self, price: Decimal) -> Self {
        self.and(ProductFilter::Price(price))
    }

    pub fn filters(&self) -> &[ProductFilter] {
        &self.filters
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn matches(&self, product: &Product) -> bool {
        self.filters.iter().all(|f| f.matches(product))
    }

    /// Evaluate the query against `store`.
    pub async fn fetch<S>(&self, store: &S) -> StoreResult<Vec<Product>>
    where
        S: ProductStore + ?Sized,
    {
        store.fetch(self).await
    }

    /// Number of products the query matches in `store`.
    pub async fn count<S>(&self, store: &S) -> StoreResult<u64>
    where
        S: ProductStore + ?Sized,
    {
        store.count(self).await
    }
}
