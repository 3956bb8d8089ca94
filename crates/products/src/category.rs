//! Product categories.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use catalog_core::DomainError;

/// Closed set of catalog categories.
///
/// The wire tag of each variant is defined once in [`Category::TAGS`]; parsing
/// and rendering both go through that table.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Category {
    #[default]
    Unknown,
    Cloths,
    Food,
    Housewares,
    Automotive,
    Tools,
    Electronics,
}

impl Category {
    /// Canonical variant/tag table.
    pub const TAGS: [(Category, &'static str); 7] = [
        (Category::Unknown, "UNKNOWN"),
        (Category::Cloths, "CLOTHS"),
        (Category::Food, "FOOD"),
        (Category::Housewares, "HOUSEWARES"),
        (Category::Automotive, "AUTOMOTIVE"),
        (Category::Tools, "TOOLS"),
        (Category::Electronics, "ELECTRONICS"),
    ];

    pub fn all() -> impl Iterator<Item = Category> {
        Self::TAGS.iter().map(|(c, _)| *c)
    }

    pub fn as_str(self) -> &'static str {
        Self::TAGS
            .iter()
            .find(|(c, _)| *c == self)
            .map(|(_, tag)| *tag)
            .unwrap_or("UNKNOWN")
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    /// Case-sensitive tag lookup.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::TAGS
            .iter()
            .find(|(_, tag)| *tag == s)
            .map(|(c, _)| *c)
            .ok_or_else(|| DomainError::validation(format!("Invalid attribute: unknown category '{s}'")))
    }
}

impl TryFrom<String> for Category {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Category> for &'static str {
    fn from(value: Category) -> Self {
        value.as_str()
    }
}
