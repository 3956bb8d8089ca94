use axum::{Json, Router, http::StatusCode, response::IntoResponse, routing::get};
use serde_json::json;

use crate::app::errors;

pub fn router() -> Router {
    Router::new()
        .route("/", get(index).fallback(errors::method_not_allowed))
        .route("/health", get(health).fallback(errors::method_not_allowed))
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "OK" })))
}

pub async fn index() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "name": "Product Catalog Administration",
            "version": env!("CARGO_PKG_VERSION"),
            "paths": "/products",
        })),
    )
}
