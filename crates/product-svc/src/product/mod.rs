//! Product model, request validation, and storage.
//!
//! # Module invariants
//!
//! - A [`Product`] only exists after its request passed [`Product::from_request`];
//!   stored names are never blank and prices are always present.
//! - Validation failures surface as [`ErrorVariant::BadRequest`].

pub mod store;

pub use store::{InMemoryProductStore, ProductRepository, StoreError};

use common::protocol::{ProductRequest, ProductResponse};
use common::{ApplicationError, ErrorVariant};
use uuid::Uuid;

/// A stored product.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
}

impl Product {
    /// Validate `req` and build a product with a freshly assigned id.
    ///
    /// Every field problem is reported, in field order, in a single error.
    ///
    /// # Errors
    ///
    /// Returns a `BadRequest` [`ApplicationError`] if `name` is missing or
    /// blank, or if `price` is missing.
    pub fn from_request(req: ProductRequest) -> Result<Self, ApplicationError> {
        let mut problems = Vec::new();

        let name = req.name.filter(|n| !n.trim().is_empty());
        if name.is_none() {
            problems.push("O campo 'name' é obrigatório e não pode estar em branco.");
        }
        if req.price.is_none() {
            problems.push("O campo 'price' é obrigatório.");
        }

        match (name, req.price) {
            (Some(name), Some(price)) => Ok(Self {
                id: Uuid::new_v4(),
                name,
                price,
            }),
            _ => Err(ErrorVariant::BadRequest.with_message(problems.join(" "))),
        }
    }
}

impl From<&Product> for ProductResponse {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
            price: p.price,
        }
    }
}
