//! The `Product` entity.
//!
//! Validation lives in [`Product::deserialize`]: a JSON document either
//! becomes a well-formed, unpersisted product or a `DomainError::Validation`.
//! Persistence goes through any [`ProductStore`].

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Value, json};

use catalog_core::{DomainError, DomainResult, Entity};

use crate::category::Category;
use crate::price::{ToPrice, deserialize_price};
use crate::query::ProductQuery;
use crate::store::{ProductResult, ProductStore};

/// Product identifier, assigned by the store on create.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

impl ProductId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<i64> for ProductId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl FromStr for ProductId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>()
            .map(Self)
            .map_err(|e| DomainError::invalid_id(format!("ProductId: {e}")))
    }
}

/// A catalog item.
///
/// Fields are public: callers mutate them directly and then persist with
/// [`Product::update`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub id: Option<ProductId>,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub available: bool,
    pub category: Category,
}

/// Wire schema accepted by [`Product::deserialize`].
///
/// Every key is required; `description` may be `null`. Unknown keys are
/// ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductDocument {
    pub name: String,
    #[serde(deserialize_with = "present_or_null")]
    pub description: Option<String>,
    #[serde(deserialize_with = "deserialize_price")]
    pub price: Decimal,
    pub available: bool,
    pub category: Category,
}

// With `deserialize_with` serde reports a missing key instead of defaulting
// the `Option` to `None`.
fn present_or_null<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)
}

impl ProductDocument {
    fn into_product(self) -> DomainResult<Product> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("Invalid product: name cannot be empty"));
        }
        Ok(Product::new(
            self.name,
            self.description,
            self.price,
            self.available,
            self.category,
        ))
    }
}

impl Product {
    /// Build an unpersisted product.
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        price: Decimal,
        available: bool,
        category: Category,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            description,
            price,
            available,
            category,
        }
    }

    /// Validate a JSON document and build an unpersisted product from it.
    pub fn deserialize(data: Option<&Value>) -> DomainResult<Self> {
        let data = data
            .filter(|v| !v.is_null())
            .ok_or_else(|| DomainError::validation("Invalid product: body of request contained no data"))?;

        if !data.is_object() {
            return Err(DomainError::validation(
                "Invalid product: body of request contained bad or no data",
            ));
        }

        let document = ProductDocument::deserialize(data)
            .map_err(|e| DomainError::validation(format!("Invalid product: {e}")))?;
        document.into_product()
    }

    /// JSON representation (price as a decimal string, category as its tag).
    pub fn serialize(&self) -> Value {
        json!({
            "id": self.id.map(ProductId::get),
            "name": self.name,
            "description": self.description,
            "price": self.price.to_string(),
            "available": self.available,
            "category": self.category.as_str(),
        })
    }

    /// Persist as a new row. The store assigns `id`, replacing any previous
    /// one; the new identity is also returned.
    pub async fn create<S>(&mut self, store: &S) -> ProductResult<ProductId>
    where
        S: ProductStore + ?Sized,
    {
        tracing::info!(name = %self.name, "creating product");
        self.id = None;
        let id = store.insert(self).await?;
        self.id = Some(id);
        Ok(id)
    }

    /// Write the current field values to the row keyed by `id`.
    ///
    /// An unpersisted product is rejected before the store is touched.
    pub async fn update<S>(&self, store: &S) -> ProductResult<()>
    where
        S: ProductStore + ?Sized,
    {
        let id = self.require_id("Update")?;
        tracing::info!(%id, name = %self.name, "updating product");
        if !store.update(id, self).await? {
            return Err(DomainError::not_found().into());
        }
        Ok(())
    }

    pub async fn delete<S>(&self, store: &S) -> ProductResult<()>
    where
        S: ProductStore + ?Sized,
    {
        let id = self.require_id("Delete")?;
        tracing::info!(%id, name = %self.name, "deleting product");
        store.delete(id).await?;
        Ok(())
    }

    /// Every persisted product.
    pub async fn all<S>(store: &S) -> ProductResult<Vec<Product>>
    where
        S: ProductStore + ?Sized,
    {
        tracing::info!("listing all products");
        Ok(store.list().await?)
    }

    pub async fn find<S>(store: &S, id: ProductId) -> ProductResult<Option<Product>>
    where
        S: ProductStore + ?Sized,
    {
        tracing::info!(%id, "looking up product");
        Ok(store.get(id).await?)
    }

    pub fn find_by_name(name: impl Into<String>) -> ProductQuery {
        ProductQuery::new().name(name)
    }

    pub fn find_by_availability(available: bool) -> ProductQuery {
        ProductQuery::new().available(available)
    }

    pub fn find_by_category(category: Category) -> ProductQuery {
        ProductQuery::new().category(category)
    }

    /// Exact-price query. Text input is stripped of whitespace and quotes and
    /// then parsed as a decimal.
    pub fn find_by_price(price: impl ToPrice) -> DomainResult<ProductQuery> {
        Ok(ProductQuery::new().price(price.to_price()?))
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> Option<Self::Id> {
        self.id
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "<Product {} id=[{}]>", self.name, id),
            None => write!(f, "<Product {} id=[None]>", self.name),
        }
    }
}
