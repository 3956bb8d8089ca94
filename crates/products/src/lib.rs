//! Products domain module.
//!
//! The `Product` entity, its validation rules, the lazy `ProductQuery` handle
//! and the `ProductStore` persistence port. Store adapters live in
//! `catalog-infra`.

pub mod category;
pub mod price;
pub mod product;
pub mod query;
pub mod store;

#[cfg(feature = "fixtures")]
pub mod fixtures;

pub use category::Category;
pub use price::{ToPrice, parse_price};
pub use product::{Product, ProductDocument, ProductId};
pub use query::{ProductFilter, ProductQuery};
pub use store::{ProductError, ProductResult, ProductStore, StoreError, StoreResult};

#[cfg(feature = "fixtures")]
pub use fixtures::ProductFactory;
