//! Request and response bodies exchanged with API callers.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApplicationError;

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

/// Request body for `POST /products`.
///
/// Both fields are optional on the wire so that a missing field surfaces as
/// a validation error rather than a deserialisation failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductRequest {
    /// Display name; must be present and not blank.
    pub name: Option<String>,
    /// Unit price; must be present.
    pub price: Option<f64>,
}

/// Response body describing a single product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
}

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

/// Error body returned on any non-2xx status.
///
/// Field names are part of the public contract and must not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Stable machine-readable error kind, e.g. `"NotFoundException"`.
    pub name: String,
    /// Human-readable description safe to expose to callers.
    pub message: String,
    /// Hint on how to resolve or retry.
    pub action: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from its three fields.
    pub fn new(
        name: impl Into<String>,
        message: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            action: action.into(),
        }
    }

    /// Generic body for failures that were never classified.
    pub fn internal() -> Self {
        Self::new("InternalError", "internal error", "contact support")
    }
}

impl From<&ApplicationError> for ErrorResponse {
    fn from(err: &ApplicationError) -> Self {
        Self::new(err.kind(), err.message(), err.remediation())
    }
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"` while the process is serving.
    pub status: String,
    /// Number of products currently stored.
    pub products: usize,
}
