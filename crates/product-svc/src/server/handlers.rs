//! Axum request handlers for all service endpoints.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use common::protocol::{HealthResponse, ProductRequest, ProductResponse};
use common::ErrorVariant;
use tracing::info;
use uuid::Uuid;

use super::responder::ApiError;
use super::state::AppState;
use crate::product::{Product, StoreError};

/// `GET /products` — list every stored product.
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductResponse>>, ApiError> {
    let products = state.products.find_all().await.map_err(store_failure)?;
    Ok(Json(products.iter().map(ProductResponse::from).collect()))
}

/// `GET /products/:id` — fetch a single product.
///
/// A malformed id is a `BadRequest`; an unknown one is a `NotFound` naming the id.
pub async fn get_product(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<ProductResponse>, ApiError> {
    let Path(id) = id.map_err(|_| {
        ErrorVariant::BadRequest.with_message("O ID informado não é um UUID válido.")
    })?;

    let product = state
        .products
        .find_by_id(id)
        .await
        .map_err(store_failure)?
        .ok_or_else(|| {
            ErrorVariant::NotFound.with_message(format!("Produto com ID {id} não encontrado."))
        })?;

    Ok(Json(ProductResponse::from(&product)))
}

/// `POST /products` — validate and store a new product.
///
/// Responds `201 Created` with the new product's id as a JSON string.
pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<ProductRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Uuid>), ApiError> {
    let Json(req) = payload.map_err(rejected_body)?;
    let product = Product::from_request(req)?;
    let saved = state.products.save(product).await.map_err(store_failure)?;

    info!(product_id = %saved.id, "product created");
    Ok((StatusCode::CREATED, Json(saved.id)))
}

/// `GET /health` — liveness check with the current product count.
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    let products = state.products.count().await.map_err(store_failure)?;
    Ok(Json(HealthResponse {
        status: "ok".into(),
        products,
    }))
}

/// Catch-all handler for unknown paths.
pub async fn not_found() -> ApiError {
    ErrorVariant::NotFound.error().into()
}

/// Handler for a known path hit with an unsupported method.
pub async fn method_not_allowed() -> ApiError {
    ErrorVariant::MethodNotAllowed.error().into()
}

// ---------------------------------------------------------------------------
// Error mapping helpers
// ---------------------------------------------------------------------------

/// A full store is reported to the caller; any other store failure stays
/// unclassified.
fn store_failure(err: StoreError) -> ApiError {
    match err {
        StoreError::Full { .. } => ErrorVariant::InsufficientStorage.error().into(),
        other => other.into(),
    }
}

fn rejected_body(rejection: JsonRejection) -> ApiError {
    let message = match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            "O cabeçalho Content-Type deve ser application/json."
        }
        JsonRejection::JsonSyntaxError(_) => "O corpo da requisição não é um JSON válido.",
        JsonRejection::JsonDataError(_) => {
            "O corpo da requisição não corresponde ao formato esperado."
        }
        _ => ErrorVariant::BadRequest.definition().default_message,
    };
    ErrorVariant::BadRequest.with_message(message).into()
}
