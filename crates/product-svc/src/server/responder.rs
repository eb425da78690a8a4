//! The error boundary: turns any error that escaped a handler into a response.
//!
//! Classified failures ([`ApplicationError`]) keep their status and are
//! rendered as [`ErrorResponse`]. Anything else is logged and replaced by the
//! generic `InternalError` body with status 500; its text never reaches the
//! caller.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::protocol::ErrorResponse;
use common::{ApplicationError, Category};
use tracing::{debug, error, warn};

/// Error type returned by every handler.
///
/// Wraps any error so handlers can propagate with `?`; the conversion to a
/// response goes through [`respond`].
#[derive(Debug)]
pub struct ApiError(anyhow::Error);

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        respond(&self.0)
    }
}

/// Render `error` as an HTTP response. Never fails.
pub fn respond(error: &anyhow::Error) -> Response {
    let Some((app, status)) = classify(error) else {
        error!(error = ?error, "unclassified error");
        let body = ErrorResponse::internal();
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response();
    };

    let kind = app.kind();
    let code = app.status_code();
    match app.category() {
        Some(Category::ServerError) => {
            error!(kind, status = code, message = app.message(), "request failed")
        }
        Some(Category::ClientError) => debug!(kind, status = code, "request rejected"),
        None => warn!(kind, status = code, "application error outside 4xx/5xx"),
    }

    (status, Json(ErrorResponse::from(app))).into_response()
}

/// Find the [`ApplicationError`] in `error`'s chain along with a usable status.
fn classify(error: &anyhow::Error) -> Option<(&ApplicationError, StatusCode)> {
    let app = error
        .chain()
        .find_map(|cause| cause.downcast_ref::<ApplicationError>())?;
    let status = StatusCode::from_u16(app.status_code()).ok()?;
    Some((app, status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use axum::body::{to_bytes, Bytes};
    use common::ErrorVariant;

    async fn render(error: anyhow::Error) -> (StatusCode, Bytes) {
        let resp = respond(&error);
        let status = resp.status();
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, body)
    }

    fn divide(a: i32, b: i32) -> anyhow::Result<i32> {
        a.checked_div(b)
            .ok_or_else(|| anyhow::anyhow!("attempt to divide {a} by zero"))
    }

    #[tokio::test]
    async fn not_found_with_message() {
        let err = ErrorVariant::NotFound.with_message("Produto com ID X não encontrado.");
        let (status, body) = render(err.into()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            std::str::from_utf8(&body).unwrap(),
            r#"{"name":"NotFoundException","message":"Produto com ID X não encontrado.","action":"Verifique se os parâmetros enviados na consulta estão certos."}"#
        );
    }

    #[tokio::test]
    async fn not_found_defaults() {
        let (status, body) = render(ErrorVariant::NotFound.error().into()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let body: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(body.name, "NotFoundException");
        assert_eq!(body.message, "Não foi possível encontrar este recurso no sistema.");
    }

    #[tokio::test]
    async fn unclassified_error_is_generic_500() {
        let err = divide(10, 0).unwrap_err();
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let text = std::str::from_utf8(&body).unwrap();
        assert!(!text.contains("divide"), "leaked internals: {text}");
        let body: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(body, ErrorResponse::internal());
    }

    #[tokio::test]
    async fn server_variant_keeps_its_status() {
        let (status, body) = render(ErrorVariant::InsufficientStorage.error().into()).await;
        assert_eq!(status.as_u16(), 507);
        let body: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(body.name, "InsufficientStorageException");
    }

    #[tokio::test]
    async fn classification_survives_context() {
        let err = anyhow::Error::from(ErrorVariant::BadRequest.error()).context("while parsing body");
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(body.name, "BadRequestException");

        let err = Err::<(), _>(ErrorVariant::NotFound.error())
            .context("lookup failed")
            .unwrap_err();
        let (status, _) = render(err).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn invalid_status_is_treated_as_unclassified() {
        let err = ApplicationError::new("odd", 42, "none", "Weird");
        let (status, body) = render(err.into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(body.name, "InternalError");
    }

    #[tokio::test]
    async fn equal_errors_render_identical_bytes() {
        let a = ErrorVariant::NotFound.with_message("Produto com ID 1 não encontrado.");
        let b = a.clone();
        assert_eq!(a, b);
        let (_, first) = render(a.into()).await;
        let (_, second) = render(b.into()).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn api_error_converts_through_respond() {
        let resp = ApiError::from(ErrorVariant::MethodNotAllowed.error()).into_response();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
