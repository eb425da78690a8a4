//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use crate::config::Config;
use crate::product::{InMemoryProductStore, ProductRepository};

/// Application state shared across all request handlers.
///
/// Cloning is cheap: the repository sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Product storage.
    pub products: Arc<dyn ProductRepository>,
}

impl AppState {
    /// Create a new [`AppState`] backed by `products`.
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        Self { products }
    }
}

impl Default for AppState {
    /// Creates an [`AppState`] with an empty in-memory store, suitable for tests.
    fn default() -> Self {
        Self::new(Arc::new(InMemoryProductStore::new(
            Config::default().max_products,
        )))
    }
}
