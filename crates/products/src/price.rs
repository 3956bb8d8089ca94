//! Monetary amounts.
//!
//! Prices are always [`Decimal`]; text input goes through [`parse_price`] so
//! that accidental quoting (`' "19.99" '`) normalizes to the same value as
//! `"19.99"`.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

use catalog_core::{DomainError, DomainResult};

fn is_padding(c: char) -> bool {
    c.is_whitespace() || c == '"' || c == '\''
}

/// Strip surrounding whitespace and quote characters, then parse an exact
/// decimal.
pub fn parse_price(raw: &str) -> DomainResult<Decimal> {
    let cleaned = raw.trim_matches(is_padding);
    if cleaned.is_empty() {
        return Err(DomainError::validation("Invalid attribute: price is empty"));
    }
    Decimal::from_str_exact(cleaned)
        .map_err(|e| DomainError::validation(format!("Invalid attribute: price '{cleaned}': {e}")))
}

/// Anything a price filter can be built from.
pub trait ToPrice {
    fn to_price(self) -> DomainResult<Decimal>;
}

impl ToPrice for Decimal {
    fn to_price(self) -> DomainResult<Decimal> {
        Ok(self)
    }
}

impl ToPrice for &str {
    fn to_price(self) -> DomainResult<Decimal> {
        parse_price(self)
    }
}

impl ToPrice for String {
    fn to_price(self) -> DomainResult<Decimal> {
        parse_price(&self)
    }
}

impl ToPrice for &String {
    fn to_price(self) -> DomainResult<Decimal> {
        parse_price(self)
    }
}

/// Serde adapter: accepts a (possibly quoted/padded) decimal string. JSON
/// numbers are rejected.
pub(crate) fn deserialize_price<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)
        .map_err(|_| serde::de::Error::custom("price must be a decimal string"))?;
    parse_price(&text).map_err(serde::de::Error::custom)
}
