use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use catalog_products::{Product, ProductId, ProductQuery, ProductStore, StoreError, StoreResult};

#[derive(Debug, Default)]
struct Table {
    last_id: i64,
    rows: BTreeMap<ProductId, Product>,
}

/// In-memory product table.
///
/// Intended for tests/dev. Identities are assigned from a monotonically
/// increasing counter and never reused, even after `clear`.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    table: RwLock<Table>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read<T>(&self, f: impl FnOnce(&Table) -> T) -> StoreResult<T> {
        let table = self.table.read().map_err(|_| StoreError::Poisoned)?;
        Ok(f(&table))
    }

    fn write<T>(&self, f: impl FnOnce(&mut Table) -> T) -> StoreResult<T> {
        let mut table = self.table.write().map_err(|_| StoreError::Poisoned)?;
        Ok(f(&mut table))
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn insert(&self, product: &Product) -> StoreResult<ProductId> {
        self.write(|table| {
            table.last_id += 1;
            let id = ProductId::new(table.last_id);
            let mut row = product.clone();
            row.id = Some(id);
            table.rows.insert(id, row);
            id
        })
    }

    async fn update(&self, id: ProductId, product: &Product) -> StoreResult<bool> {
        self.write(|table| match table.rows.get_mut(&id) {
            Some(row) => {
                *row = product.clone();
                row.id = Some(id);
                true
            }
            None => false,
        })
    }

    async fn delete(&self, id: ProductId) -> StoreResult<()> {
        self.write(|table| {
            table.rows.remove(&id);
        })
    }

    async fn get(&self, id: ProductId) -> StoreResult<Option<Product>> {
        self.read(|table| table.rows.get(&id).cloned())
    }

    async fn list(&self) -> StoreResult<Vec<Product>> {
        self.read(|table| table.rows.values().cloned().collect())
    }

    async fn fetch(&self, query: &ProductQuery) -> StoreResult<Vec<Product>> {
        self.read(|table| {
            table
                .rows
                .values()
                .filter(|p| query.matches(p))
                .cloned()
                .collect()
        })
    }

    async fn count(&self, query: &ProductQuery) -> StoreResult<u64> {
        self.read(|table| table.rows.values().filter(|p| query.matches(p)).count() as u64)
    }

    async fn clear(&self) -> StoreResult<()> {
        self.write(|table| table.rows.clear())
    }
}
