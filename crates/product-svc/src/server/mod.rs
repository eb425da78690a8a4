//! Axum HTTP server: routing, handlers, middleware and the error boundary.
//!
//! # Responsibilities
//! - Define the Axum router with all routes and shared middleware.
//! - Inject shared application state (`AppState`) into handlers.
//! - Convert every failure, whether raised by a handler, a timeout or a
//!   panic, into a uniform error body via [`responder::respond`].

pub mod handlers;
pub mod middleware;
pub mod responder;
pub mod router;
pub mod state;
