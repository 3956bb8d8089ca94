use axum::Router;

pub mod products;
pub mod system;

/// Router for every endpoint the service exposes.
pub fn router() -> Router {
    Router::new()
        .merge(system::router())
        .merge(products::router())
}
