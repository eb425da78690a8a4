//! [`ProductRepository`]: storage seam for products, and its in-memory implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::Product;

/// Errors produced by a product store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store reached its configured capacity.
    #[error("product store is full ({capacity} products)")]
    Full { capacity: usize },

    /// The backing storage failed.
    #[allow(dead_code)] // Only produced by non-memory backends.
    #[error("product store backend failure: {0}")]
    Backend(String),
}

/// Storage operations the HTTP layer needs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Every product, oldest first.
    async fn find_all(&self) -> Result<Vec<Product>, StoreError>;

    /// The product with `id`, if any.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, StoreError>;

    /// Insert `product`, or replace the stored product with the same id.
    async fn save(&self, product: Product) -> Result<Product, StoreError>;

    /// Number of stored products.
    async fn count(&self) -> Result<usize, StoreError>;
}

#[derive(Debug, Default)]
struct Inner {
    products: Vec<Product>,
    index: HashMap<Uuid, usize>,
}

/// Thread-safe, capacity-bounded in-memory product store.
///
/// Readers share a `tokio::sync::RwLock`; a save takes the write lock only for
/// the duration of the insert.
#[derive(Clone, Debug)]
pub struct InMemoryProductStore {
    inner: Arc<RwLock<Inner>>,
    capacity: usize,
}

impl InMemoryProductStore {
    /// Create an empty store holding at most `capacity` products.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner::default())),
            capacity,
        }
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductStore {
    async fn find_all(&self) -> Result<Vec<Product>, StoreError> {
        Ok(self.inner.read().await.products.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.index.get(&id).map(|&i| inner.products[i].clone()))
    }

    async fn save(&self, product: Product) -> Result<Product, StoreError> {
        let mut inner = self.inner.write().await;
        let existing = inner.index.get(&product.id).copied();
        if let Some(i) = existing {
            inner.products[i] = product.clone();
            return Ok(product);
        }
        if inner.products.len() >= self.capacity {
            return Err(StoreError::Full {
                capacity: self.capacity,
            });
        }
        let position = inner.products.len();
        inner.index.insert(product.id, position);
        inner.products.push(product.clone());
        Ok(product)
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.inner.read().await.products.len())
    }
}
