//! Middleware that routes failures outside handlers through the responder.
//!
//! Handlers report their own errors via [`ApiError`](super::responder::ApiError).
//! This module covers what they cannot: requests that time out and handlers
//! that panic.

use std::any::Any;
use std::time::Duration;

use axum::{
    error_handling::HandleErrorLayer,
    response::Response,
    BoxError, Router,
};
use common::ErrorVariant;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;

use super::responder::respond;

/// Wrap `router` with panic recovery and a per-request `timeout`.
pub fn error_boundary<S>(router: Router<S>, timeout: Duration) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(CatchPanicLayer::custom(handle_panic)).layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(handle_middleware_error))
            .timeout(timeout),
    )
}

/// Timeouts become `ServiceUnavailable`; anything else is unclassified.
async fn handle_middleware_error(err: BoxError) -> Response {
    if err.is::<tower::timeout::error::Elapsed>() {
        return respond(&ErrorVariant::ServiceUnavailable.error().into());
    }
    respond(&anyhow::anyhow!(err))
}

fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else {
        "non-string panic payload"
    };
    respond(&anyhow::anyhow!("handler panicked: {detail}"))
}
