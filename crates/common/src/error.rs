//! Application error taxonomy shared across crates.
//!
//! Every [`ApplicationError`] carries a stable machine-readable `kind`, an HTTP
//! status, a human-readable message and a remediation hint. Errors fall into
//! one of two [`Category`] values, and the status code must lie inside the
//! category's range:
//!
//! - [`Category::ClientError`] → 400..=499
//! - [`Category::ServerError`] → 500..=599
//!
//! Concrete variants are listed once in [`ErrorVariant::ALL`]. Their
//! category/status pairs are checked at compile time and again by
//! [`check_variant_table`] at startup, so per-instance construction never has
//! to re-validate.

use std::fmt;
use std::ops::RangeInclusive;

use thiserror::Error;

/// Classification of an [`ApplicationError`] by who caused it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// The caller sent something the service cannot act on (4xx).
    ClientError,
    /// The service failed to act on a valid request (5xx).
    ServerError,
}

impl Category {
    /// Inclusive range of HTTP status codes admitted by this category.
    pub const fn status_range(self) -> RangeInclusive<u16> {
        match self {
            Category::ClientError => 400..=499,
            Category::ServerError => 500..=599,
        }
    }

    /// Returns `true` if `status_code` belongs to this category.
    pub const fn admits(self, status_code: u16) -> bool {
        match self {
            Category::ClientError => status_code >= 400 && status_code <= 499,
            Category::ServerError => status_code >= 500 && status_code <= 599,
        }
    }

    /// The category a status code falls into, if any.
    pub const fn of(status_code: u16) -> Option<Category> {
        if Category::ClientError.admits(status_code) {
            Some(Category::ClientError)
        } else if Category::ServerError.admits(status_code) {
            Some(Category::ServerError)
        } else {
            None
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let range = self.status_range();
        let label = match self {
            Category::ClientError => "client error",
            Category::ServerError => "server error",
        };
        write!(f, "{label} ({}-{})", range.start(), range.end())
    }
}

/// An error variant was defined with a status outside its category's range.
///
/// This is a defect in the variant definition, not a runtime condition. The
/// service refuses to start when [`check_variant_table`] reports one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} is a {category} and cannot use status {status_code}")]
pub struct InvariantViolation {
    /// Kind of the offending error.
    pub kind: String,
    /// Category the error claimed.
    pub category: Category,
    /// Status code that fell outside the category's range.
    pub status_code: u16,
}

/// A classified failure, rendered to callers as `{name, message, action}`.
///
/// Values are immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} ({status_code}): {message}")]
pub struct ApplicationError {
    message: String,
    status_code: u16,
    remediation: String,
    kind: String,
}

impl ApplicationError {
    /// Build an error without checking the status against any category.
    pub fn new(
        message: impl Into<String>,
        status_code: u16,
        remediation: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            status_code,
            remediation: remediation.into(),
            kind: kind.into(),
        }
    }

    /// Build a client error.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantViolation`] if `status_code` is not in 400..=499.
    pub fn client(
        message: impl Into<String>,
        status_code: u16,
        remediation: impl Into<String>,
        kind: impl Into<String>,
    ) -> Result<Self, InvariantViolation> {
        Self::categorized(Category::ClientError, message, status_code, remediation, kind)
    }

    /// Build a server error.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantViolation`] if `status_code` is not in 500..=599.
    pub fn server(
        message: impl Into<String>,
        status_code: u16,
        remediation: impl Into<String>,
        kind: impl Into<String>,
    ) -> Result<Self, InvariantViolation> {
        Self::categorized(Category::ServerError, message, status_code, remediation, kind)
    }

    fn categorized(
        category: Category,
        message: impl Into<String>,
        status_code: u16,
        remediation: impl Into<String>,
        kind: impl Into<String>,
    ) -> Result<Self, InvariantViolation> {
        let kind = kind.into();
        if !category.admits(status_code) {
            return Err(InvariantViolation {
                kind,
                category,
                status_code,
            });
        }
        Ok(Self::new(message, status_code, remediation, kind))
    }

    /// Human-readable description of what went wrong.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status code sent to the caller.
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Hint on how the caller might resolve or retry.
    pub fn remediation(&self) -> &str {
        &self.remediation
    }

    /// Stable machine-readable identifier, exposed to clients as `name`.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Category implied by the status code, or `None` for a non-error status.
    pub fn category(&self) -> Option<Category> {
        Category::of(self.status_code)
    }
}

/// Static definition of a concrete error variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantDefinition {
    pub kind: &'static str,
    pub category: Category,
    pub status_code: u16,
    pub default_message: &'static str,
    pub default_remediation: &'static str,
}

/// The closed set of concrete application errors.
///
/// Category, status and kind are fixed here; callers may only override the
/// message and remediation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorVariant {
    /// The requested resource does not exist.
    NotFound,
    /// The request was malformed or failed validation.
    BadRequest,
    /// The path exists but does not accept this HTTP method.
    MethodNotAllowed,
    /// The store has no room left for a new resource.
    InsufficientStorage,
    /// The request did not complete within the configured timeout.
    ServiceUnavailable,
}

impl ErrorVariant {
    /// Every variant, in definition order.
    pub const ALL: [ErrorVariant; 5] = [
        ErrorVariant::NotFound,
        ErrorVariant::BadRequest,
        ErrorVariant::MethodNotAllowed,
        ErrorVariant::InsufficientStorage,
        ErrorVariant::ServiceUnavailable,
    ];

    /// The variant's fixed definition.
    pub const fn definition(self) -> VariantDefinition {
        match self {
            ErrorVariant::NotFound => VariantDefinition {
                kind: "NotFoundException",
                category: Category::ClientError,
                status_code: 404,
                default_message: "Não foi possível encontrar este recurso no sistema.",
                default_remediation: "Verifique se os parâmetros enviados na consulta estão certos.",
            },
            ErrorVariant::BadRequest => VariantDefinition {
                kind: "BadRequestException",
                category: Category::ClientError,
                status_code: 400,
                default_message: "A requisição enviada é inválida.",
                default_remediation: "Revise os dados enviados e tente novamente.",
            },
            ErrorVariant::MethodNotAllowed => VariantDefinition {
                kind: "MethodNotAllowedException",
                category: Category::ClientError,
                status_code: 405,
                default_message: "Método HTTP não suportado por este recurso.",
                default_remediation: "Verifique o método HTTP utilizado na requisição.",
            },
            ErrorVariant::InsufficientStorage => VariantDefinition {
                kind: "InsufficientStorageException",
                category: Category::ServerError,
                status_code: 507,
                default_message: "Não há espaço disponível para armazenar este recurso.",
                default_remediation: "Tente novamente mais tarde ou contate o suporte.",
            },
            ErrorVariant::ServiceUnavailable => VariantDefinition {
                kind: "ServiceUnavailableException",
                category: Category::ServerError,
                status_code: 503,
                default_message: "O serviço não respondeu a tempo.",
                default_remediation: "Aguarde alguns instantes e tente novamente.",
            },
        }
    }

    /// The variant with its default message and remediation.
    pub fn error(self) -> ApplicationError {
        let def = self.definition();
        self.with_message_and_remediation(def.default_message, def.default_remediation)
    }

    /// The variant with a custom message and the default remediation.
    pub fn with_message(self, message: impl Into<String>) -> ApplicationError {
        self.with_message_and_remediation(message, self.definition().default_remediation)
    }

    /// The variant with a custom message and remediation.
    pub fn with_message_and_remediation(
        self,
        message: impl Into<String>,
        remediation: impl Into<String>,
    ) -> ApplicationError {
        let def = self.definition();
        ApplicationError::new(message, def.status_code, remediation, def.kind)
    }
}

/// Verify every entry of [`ErrorVariant::ALL`] against its category.
///
/// # Errors
///
/// Returns the first [`InvariantViolation`] found.
pub fn check_variant_table() -> Result<(), InvariantViolation> {
    for variant in ErrorVariant::ALL {
        let def = variant.definition();
        if !def.category.admits(def.status_code) {
            return Err(InvariantViolation {
                kind: def.kind.to_owned(),
                category: def.category,
                status_code: def.status_code,
            });
        }
    }
    Ok(())
}

const _: () = {
    let mut i = 0;
    while i < ErrorVariant::ALL.len() {
        let def = ErrorVariant::ALL[i].definition();
        assert!(
            def.category.admits(def.status_code),
            "error variant status outside its category range"
        );
        i += 1;
    }
};
