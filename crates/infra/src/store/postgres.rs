//! Postgres-backed product store.
//!
//! ## Schema
//!
//! A single `products` table. `init_schema` creates it if missing; there is
//! no migration history.
//!
//! | Column | Type |
//! |---|---|
//! | `id` | `BIGSERIAL PRIMARY KEY` |
//! | `name` | `TEXT NOT NULL` |
//! | `description` | `TEXT` |
//! | `price` | `NUMERIC NOT NULL` |
//! | `available` | `BOOLEAN NOT NULL` |
//! | `category` | `TEXT NOT NULL`, one of the `Category` tags |
//!
//! Columns carry no precision or length limits: whatever `Product` accepts is
//! stored and read back unchanged. Prices are bound and read as
//! `rust_decimal::Decimal`, so no value ever passes through a float.
//!
//! ## Error Mapping
//!
//! Every `sqlx::Error` becomes `StoreError::Backend` with the operation name
//! prefixed. A `category` value that is not a known tag is reported the same
//! way.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use tracing::instrument;

use catalog_products::{
    Category, Product, ProductFilter, ProductId, ProductQuery, ProductStore, StoreError, StoreResult,
};

const SELECT_COLUMNS: &str = "SELECT id, name, description, price, available, category FROM products";

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    id          BIGSERIAL PRIMARY KEY,
    name        TEXT NOT NULL,
    description TEXT,
    price       NUMERIC NOT NULL,
    available   BOOLEAN NOT NULL DEFAULT TRUE,
    category    TEXT NOT NULL DEFAULT 'UNKNOWN'
)
"#;

/// Postgres-backed `ProductStore`.
///
/// Uses the SQLx connection pool, which is thread-safe; each method runs a
/// single statement.
#[derive(Debug, Clone)]
pub struct PostgresProductStore {
    pool: Arc<PgPool>,
}

impl PostgresProductStore {
    /// Create a store over an existing connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Connect to `database_uri` and build a store.
    #[instrument(skip(database_uri), err)]
    pub async fn connect(database_uri: &str) -> StoreResult<Self> {
        let pool = PgPool::connect(database_uri)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        Ok(Self::new(pool))
    }

    /// Create the `products` table if it does not exist.
    #[instrument(skip(self), err)]
    pub async fn init_schema(&self) -> StoreResult<()> {
        sqlx::query(CREATE_TABLE)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("init_schema", e))?;
        tracing::info!("products schema ready");
        Ok(())
    }
}

#[async_trait]
impl ProductStore for PostgresProductStore {
    #[instrument(skip(self, product), fields(name = %product.name), err)]
    async fn insert(&self, product: &Product) -> StoreResult<ProductId> {
        let row = sqlx::query(
            r#"
            INSERT INTO products (name, description, price, available, category)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.available)
        .bind(product.category.as_str())
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert", e))?;

        let id: i64 = row.try_get("id").map_err(|e| map_sqlx_error("insert", e))?;
        Ok(ProductId::new(id))
    }

    #[instrument(skip(self, product), err)]
    async fn update(&self, id: ProductId, product: &Product) -> StoreResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = $1, description = $2, price = $3, available = $4, category = $5
            WHERE id = $6
            "#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.available)
        .bind(product.category.as_str())
        .bind(id.get())
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("update", e))?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self), err)]
    async fn delete(&self, id: ProductId) -> StoreResult<()> {
        sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.get())
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete", e))?;
        Ok(())
    }

    #[instrument(skip(self), err)]
    async fn get(&self, id: ProductId) -> StoreResult<Option<Product>> {
        let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE id = $1"))
            .bind(id.get())
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("get", e))?;

        row.as_ref().map(row_to_product).transpose()
    }

    #[instrument(skip(self), err)]
    async fn list(&self) -> StoreResult<Vec<Product>> {
        self.fetch(&ProductQuery::new()).await
    }

    #[instrument(skip(self), err)]
    async fn fetch(&self, query: &ProductQuery) -> StoreResult<Vec<Product>> {
        let mut builder = QueryBuilder::<Postgres>::new(SELECT_COLUMNS);
        push_filters(&mut builder, query);
        builder.push(" ORDER BY id ASC");

        let rows = builder
            .build()
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("fetch", e))?;

        rows.iter().map(row_to_product).collect()
    }

    #[instrument(skip(self), err)]
    async fn count(&self, query: &ProductQuery) -> StoreResult<u64> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) AS n FROM products");
        push_filters(&mut builder, query);

        let row = builder
            .build()
            .fetch_one(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("count", e))?;
        let n: i64 = row.try_get("n").map_err(|e| map_sqlx_error("count", e))?;
        Ok(u64::try_from(n).unwrap_or_default())
    }

    #[instrument(skip(self), err)]
    async fn clear(&self) -> StoreResult<()> {
        sqlx::query("DELETE FROM products")
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("clear", e))?;
        Ok(())
    }
}

fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, query: &ProductQuery) {
    for (idx, filter) in query.filters().iter().enumerate() {
        builder.push(if idx == 0 { " WHERE " } else { " AND " });
        match filter {
            ProductFilter::Name(name) => {
                builder.push("name = ").push_bind(name.clone());
            }
            ProductFilter::Available(flag) => {
                builder.push("available = ").push_bind(*flag);
            }
            ProductFilter::Category(category) => {
                builder.push("category = ").push_bind(category.as_str());
            }
            ProductFilter::Price(price) => {
                builder.push("price = ").push_bind(*price);
            }
        }
    }
}

fn row_to_product(row: &PgRow) -> StoreResult<Product> {
    let id: i64 = row.try_get("id").map_err(|e| map_sqlx_error("decode", e))?;
    let name: String = row.try_get("name").map_err(|e| map_sqlx_error("decode", e))?;
    let description: Option<String> = row
        .try_get("description")
        .map_err(|e| map_sqlx_error("decode", e))?;
    let price: Decimal = row.try_get("price").map_err(|e| map_sqlx_error("decode", e))?;
    let available: bool = row
        .try_get("available")
        .map_err(|e| map_sqlx_error("decode", e))?;
    let category: String = row
        .try_get("category")
        .map_err(|e| map_sqlx_error("decode", e))?;
    let category: Category = category
        .parse()
        .map_err(|e| StoreError::backend(format!("decode: row {id}: {e}")))?;

    let mut product = Product::new(name, description, price, available, category);
    product.id = Some(ProductId::new(id));
    Ok(product)
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => StoreError::backend(format!(
            "database error in {operation}: {} (code {})",
            db_err.message(),
            db_err.code().as_deref().unwrap_or("none"),
        )),
        sqlx::Error::PoolClosed => {
            StoreError::backend(format!("connection pool closed in {operation}"))
        }
        sqlx::Error::RowNotFound => {
            StoreError::backend(format!("unexpected row not found in {operation}"))
        }
        _ => StoreError::backend(format!("sqlx error in {operation}: {err}")),
    }
}
