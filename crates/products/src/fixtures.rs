//! Random product builders for tests.
//!
//! Gated behind the `fixtures` feature; the factory is exercised by
//! `catalog-infra`'s product model tests, which enable it.

use rand::Rng;
use rand::seq::SliceRandom;
use rust_decimal::Decimal;

use crate::category::Category;
use crate::product::Product;

const NAMES: [&str; 11] = [
    "Hat", "Pants", "Shirt", "Apple", "Banana", "Pots", "Towels", "Ford", "Chevy", "Hammer",
    "Wrench",
];

const DESCRIPTIONS: [&str; 6] = [
    "A red hat",
    "Comfortable everyday wear",
    "Fresh from the farm",
    "Non-stick and dishwasher safe",
    "Low mileage, one owner",
    "Drop forged steel",
];

/// Builds unpersisted products with random but valid field values.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProductFactory;

impl ProductFactory {
    pub fn build() -> Product {
        let mut rng = rand::thread_rng();
        let categories: Vec<Category> = Category::all().collect();

        Product::new(
            *NAMES.choose(&mut rng).unwrap_or(&"Hat"),
            DESCRIPTIONS.choose(&mut rng).map(|d| d.to_string()),
            Decimal::new(rng.gen_range(50..=200_000), 2),
            rng.gen_bool(0.5),
            *categories.choose(&mut rng).unwrap_or(&Category::Unknown),
        )
    }

    pub fn build_batch(count: usize) -> Vec<Product> {
        (0..count).map(|_| Self::build()).collect()
    }
}
