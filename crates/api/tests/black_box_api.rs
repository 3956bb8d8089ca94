use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::json;

use catalog_infra::InMemoryProductStore;
use catalog_products::{
    Product, ProductFactory, ProductId, ProductQuery, ProductStore, StoreError, StoreResult,
};

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(store: Arc<dyn ProductStore>) -> Self {
        // Same router as prod, bound to an ephemeral port.
        let app = catalog_api::app::build_app(store);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    async fn in_memory() -> Self {
        Self::spawn(Arc::new(InMemoryProductStore::new())).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Store whose reads fail (or panic) deep inside the lookup path.
struct FaultyStore {
    panic: bool,
}

#[async_trait]
impl ProductStore for FaultyStore {
    async fn insert(&self, _product: &Product) -> StoreResult<ProductId> {
        Err(StoreError::backend("boom"))
    }

    async fn update(&self, _id: ProductId, _product: &Product) -> StoreResult<bool> {
        Err(StoreError::backend("boom"))
    }

    async fn delete(&self, _id: ProductId) -> StoreResult<()> {
        Err(StoreError::backend("boom"))
    }

    async fn get(&self, _id: ProductId) -> StoreResult<Option<Product>> {
        if self.panic {
            panic!("boom");
        }
        Err(StoreError::backend("boom"))
    }

    async fn list(&self) -> StoreResult<Vec<Product>> {
        Err(StoreError::backend("boom"))
    }

    async fn fetch(&self, _query: &ProductQuery) -> StoreResult<Vec<Product>> {
        Err(StoreError::backend("boom"))
    }

    async fn count(&self, _query: &ProductQuery) -> StoreResult<u64> {
        Err(StoreError::backend("boom"))
    }

    async fn clear(&self) -> StoreResult<()> {
        Err(StoreError::backend("boom"))
    }
}

async fn error_phrase(res: reqwest::Response) -> String {
    let body: serde_json::Value = res.json().await.unwrap();
    body["error"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let srv = TestServer::in_memory().await;
    let res = reqwest::Client::new()
        .post(srv.url("/products"))
        .header("content-type", "application/json")
        .body("not-json")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_phrase(res).await, "Bad Request");
}

#[tokio::test]
async fn invalid_product_is_bad_request() {
    let srv = TestServer::in_memory().await;
    let res = reqwest::Client::new()
        .post(srv.url("/products"))
        .json(&json!({
            "name": "Laptop",
            "description": "Gaming laptop",
            "price": "1200.50",
            "available": "True",
            "category": "ELECTRONICS"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_phrase(res).await, "Bad Request");
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let srv = TestServer::in_memory().await;
    let res = reqwest::get(srv.url("/non-existent-endpoint")).await.unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(error_phrase(res).await, "Not Found");
}

#[tokio::test]
async fn put_on_collection_is_method_not_allowed() {
    let srv = TestServer::in_memory().await;
    let res = reqwest::Client::new()
        .put(srv.url("/products"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(error_phrase(res).await, "Method not Allowed");
}

#[tokio::test]
async fn non_json_content_type_is_unsupported() {
    let srv = TestServer::in_memory().await;
    let res = reqwest::Client::new()
        .post(srv.url("/products"))
        .header("content-type", "text/plain")
        .body("bad data")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(error_phrase(res).await, "Unsupported media type");
}

#[tokio::test]
async fn lookup_fault_is_internal_server_error() {
    let srv = TestServer::spawn(Arc::new(FaultyStore { panic: false })).await;
    let res = reqwest::get(srv.url("/products/1")).await.unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = res.text().await.unwrap();
    assert!(!body.contains("boom"), "fault leaked to client: {body}");
}

#[tokio::test]
async fn lookup_panic_is_internal_server_error() {
    let srv = TestServer::spawn(Arc::new(FaultyStore { panic: true })).await;
    let client = reqwest::Client::new();

    let res = client.get(srv.url("/products/1")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = res.text().await.unwrap();
    assert!(!body.contains("boom"), "panic leaked to client: {body}");

    // The server keeps serving after the panic.
    let res = client.get(srv.url("/health")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn product_lifecycle_create_read_update_delete() {
    let srv = TestServer::in_memory().await;
    let client = reqwest::Client::new();
    let product = ProductFactory::build();

    // Create
    let res = client
        .post(srv.url("/products"))
        .json(&product.serialize())
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let location = res.headers()["location"].to_str().unwrap().to_string();
    let created: serde_json::Value = res.json().await.unwrap();
    let id = created["id"].as_i64().unwrap();
    assert_eq!(location, format!("/products/{id}"));
    assert_eq!(created["name"], product.name.as_str());
    assert_eq!(created["price"], product.price.to_string());

    // Read
    let res = client.get(srv.url(&location)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let fetched: serde_json::Value = res.json().await.unwrap();
    assert_eq!(fetched, created);

    // Update
    let mut changed = created.clone();
    changed["description"] = json!("unknown");
    let res = client
        .put(srv.url(&location))
        .json(&changed)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated: serde_json::Value = res.json().await.unwrap();
    assert_eq!(updated["id"], id);
    assert_eq!(updated["description"], "unknown");

    // Delete
    let res = client.delete(srv.url(&location)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert!(res.text().await.unwrap().is_empty());

    let res = client.get(srv.url(&location)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(error_phrase(res).await, "Not Found");
}

#[tokio::test]
async fn update_of_missing_product_is_not_found() {
    let srv = TestServer::in_memory().await;
    let res = reqwest::Client::new()
        .put(srv.url("/products/0"))
        .json(&ProductFactory::build().serialize())
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_filters_by_query_parameters() {
    let store = Arc::new(InMemoryProductStore::new());
    let mut products = ProductFactory::build_batch(10);
    for product in &mut products {
        product.create(&*store).await.unwrap();
    }
    let srv = TestServer::spawn(store).await;
    let client = reqwest::Client::new();

    let res = client.get(srv.url("/products")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let all: Vec<serde_json::Value> = res.json().await.unwrap();
    assert_eq!(all.len(), 10);

    let category = products[0].category;
    let expected = products.iter().filter(|p| p.category == category).count();
    let res = client
        .get(srv.url(&format!("/products?category={category}")))
        .send()
        .await
        .unwrap();
    let found: Vec<serde_json::Value> = res.json().await.unwrap();
    assert_eq!(found.len(), expected);
    assert!(found.iter().all(|p| p["category"] == category.as_str()));

    let name = products[0].name.clone();
    let available = products[0].available;
    let expected = products
        .iter()
        .filter(|p| p.name == name && p.available == available)
        .count();
    let res = client
        .get(srv.url(&format!("/products?name={name}&available={available}")))
        .send()
        .await
        .unwrap();
    let found: Vec<serde_json::Value> = res.json().await.unwrap();
    assert_eq!(found.len(), expected);

    let res = client
        .get(srv.url("/products?category=NOPE"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}
