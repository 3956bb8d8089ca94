//! Request DTOs and mapping to domain types.

use serde::Deserialize;

use catalog_core::{DomainError, DomainResult};
use catalog_products::{Category, ProductQuery, parse_price};

/// Query string accepted by `GET /products`. Every parameter is optional and
/// they combine with AND.
#[derive(Debug, Default, Deserialize)]
pub struct ListProductsParams {
    pub name: Option<String>,
    pub category: Option<String>,
    pub available: Option<String>,
    pub price: Option<String>,
}

impl ListProductsParams {
    pub fn into_query(self) -> DomainResult<ProductQuery> {
        let mut query = ProductQuery::new();
        if let Some(name) = self.name {
            query = query.name(name);
        }
        if let Some(category) = self.category {
            query = query.category(category.parse::<Category>()?);
        }
        if let Some(available) = self.available {
            query = query.available(parse_flag(&available)?);
        }
        if let Some(price) = self.price {
            query = query.price(parse_price(&price)?);
        }
        Ok(query)
    }
}

fn parse_flag(raw: &str) -> DomainResult<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(DomainError::validation(format!(
            "Invalid attribute: available must be true or false, got '{raw}'"
        ))),
    }
}
