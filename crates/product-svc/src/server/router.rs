//! Axum router construction.

use std::time::Duration;

use axum::{routing::get, Router};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use super::{handlers, middleware, state::AppState};

/// Build the application [`Router`] with all routes and middleware attached.
pub fn build(state: AppState, request_timeout: Duration) -> Router {
    let routes = Router::new()
        .route(
            "/products",
            get(handlers::list_products).post(handlers::create_product),
        )
        .route("/products/:id", get(handlers::get_product))
        .route("/health", get(handlers::health))
        .fallback(handlers::not_found)
        .method_not_allowed_fallback(handlers::method_not_allowed);

    middleware::error_boundary(routes, request_timeout)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum_test::TestServer;
    use common::protocol::{ErrorResponse, HealthResponse, ProductResponse};
    use serde_json::json;
    use uuid::Uuid;

    use crate::product::InMemoryProductStore;

    fn server_with(state: AppState) -> TestServer {
        TestServer::new(build(state, Duration::from_secs(5))).unwrap()
    }

    fn server() -> TestServer {
        server_with(AppState::default())
    }

    #[tokio::test]
    async fn create_then_fetch_product() {
        let server = server();
        let created = server
            .post("/products")
            .json(&json!({"name": "Caneta", "price": 2.5}))
            .await;
        created.assert_status(StatusCode::CREATED);
        let id: Uuid = created.json();

        let fetched = server.get(&format!("/products/{id}")).await;
        fetched.assert_status_ok();
        let body: ProductResponse = fetched.json();
        assert_eq!(body.id, id);
        assert_eq!(body.name, "Caneta");
        assert_eq!(body.price, 2.5);
    }

    #[tokio::test]
    async fn list_returns_products_in_creation_order() {
        let server = server();
        for name in ["Lápis", "Borracha"] {
            server
                .post("/products")
                .json(&json!({"name": name, "price": 1.0}))
                .await
                .assert_status(StatusCode::CREATED);
        }
        let listed: Vec<ProductResponse> = server.get("/products").await.json();
        let names: Vec<_> = listed.into_iter().map(|p| p.name).collect();
        assert_eq!(names, ["Lápis", "Borracha"]);

        let health: HealthResponse = server.get("/health").await.json();
        assert_eq!(health.products, 2);
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let resp = server()
            .post("/products")
            .json(&json!({"name": "  ", "price": 3.0}))
            .await;
        resp.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = resp.json();
        assert_eq!(body.name, "BadRequestException");
        assert!(body.message.contains("'name'"));
    }

    #[tokio::test]
    async fn malformed_json_is_rejected() {
        let resp = server()
            .post("/products")
            .text("{not json")
            .content_type("application/json")
            .await;
        resp.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = resp.json();
        assert_eq!(body.message, "O corpo da requisição não é um JSON válido.");
    }

    #[tokio::test]
    async fn unknown_product_is_not_found() {
        let id = Uuid::new_v4();
        let resp = server().get(&format!("/products/{id}")).await;
        resp.assert_status(StatusCode::NOT_FOUND);
        let body: ErrorResponse = resp.json();
        assert_eq!(body.message, format!("Produto com ID {id} não encontrado."));
    }

    #[tokio::test]
    async fn unknown_route_uses_default_not_found() {
        let resp = server().get("/unknown").await;
        resp.assert_status(StatusCode::NOT_FOUND);
        let body: ErrorResponse = resp.json();
        assert_eq!(body.name, "NotFoundException");
        assert_eq!(body.message, "Não foi possível encontrar este recurso no sistema.");
    }

    #[tokio::test]
    async fn wrong_method_is_method_not_allowed() {
        let resp = server().delete("/products").await;
        resp.assert_status(StatusCode::METHOD_NOT_ALLOWED);
        let body: ErrorResponse = resp.json();
        assert_eq!(body.name, "MethodNotAllowedException");
    }

    #[tokio::test]
    async fn full_store_rejects_creation() {
        let server = server_with(AppState::new(Arc::new(InMemoryProductStore::new(1))));
        server
            .post("/products")
            .json(&json!({"name": "a", "price": 1.0}))
            .await
            .assert_status(StatusCode::CREATED);
        let resp = server
            .post("/products")
            .json(&json!({"name": "b", "price": 1.0}))
            .await;
        resp.assert_status(StatusCode::INSUFFICIENT_STORAGE);
        let body: ErrorResponse = resp.json();
        assert_eq!(body.name, "InsufficientStorageException");
    }
}
