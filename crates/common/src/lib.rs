//! Error taxonomy and protocol types shared across `product-svc` crates.

pub mod error;
pub mod protocol;

pub use error::{ApplicationError, Category, ErrorVariant, InvariantViolation};
