use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Extension, Path, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use serde_json::Value;

use catalog_products::{Product, ProductId, ProductStore};

use crate::app::dto::ListProductsParams;
use crate::app::errors::{self, ApiError};

type Store = Arc<dyn ProductStore>;

pub fn router() -> Router {
    Router::new()
        .route(
            "/products",
            get(list_products)
                .post(create_product)
                .fallback(errors::method_not_allowed),
        )
        .route(
            "/products/:id",
            get(get_product)
                .put(update_product)
                .delete(delete_product)
                .fallback(errors::method_not_allowed),
        )
}

// Non-numeric ids cannot name a product, so they are reported as missing.
fn parse_id(raw: &str) -> Result<ProductId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::not_found(format!("Product with id '{raw}' was not found.")))
}

async fn load(store: &Store, id: ProductId) -> Result<Product, ApiError> {
    Product::find(&**store, id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Product with id '{id}' was not found.")))
}

pub async fn create_product(
    Extension(store): Extension<Store>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    tracing::info!("request to create a product");
    let Json(body) = payload?;

    let mut product = Product::deserialize(Some(&body))?;
    let id = product.create(&*store).await?;
    tracing::info!(%id, "product created");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/products/{id}"))],
        Json(product.serialize()),
    ))
}

pub async fn list_products(
    Extension(store): Extension<Store>,
    params: Result<Query<ListProductsParams>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    tracing::info!("request to list products");
    let Query(params) = params?;
    let query = params.into_query()?;

    let items = query
        .fetch(&*store)
        .await?
        .iter()
        .map(Product::serialize)
        .collect::<Vec<_>>();
    tracing::info!(count = items.len(), "returning products");
    Ok((StatusCode::OK, Json(items)))
}

pub async fn get_product(
    Extension(store): Extension<Store>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    tracing::info!(%id, "request to read a product");
    let id = parse_id(&id)?;
    let product = load(&store, id).await?;
    Ok((StatusCode::OK, Json(product.serialize())))
}

pub async fn update_product(
    Extension(store): Extension<Store>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    tracing::info!(%id, "request to update a product");
    let id = parse_id(&id)?;
    let Json(body) = payload?;

    load(&store, id).await?;
    let mut product = Product::deserialize(Some(&body))?;
    product.id = Some(id);
    product.update(&*store).await?;

    Ok((StatusCode::OK, Json(product.serialize())))
}

pub async fn delete_product(
    Extension(store): Extension<Store>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    tracing::info!(%id, "request to delete a product");
    let id = parse_id(&id)?;
    if let Some(product) = Product::find(&*store, id).await? {
        product.delete(&*store).await?;
    }
    Ok(StatusCode::NO_CONTENT)
}
