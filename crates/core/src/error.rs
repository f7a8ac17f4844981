//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every failure in the domain crates is recoverable: the caller is expected
/// to report it and carry on. Retrying with the same input yields the same
/// error since nothing in the domain is time- or IO-dependent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Malformed input: empty name, negative or unparsable price/quantity,
    /// a purchase larger than the stock, an order line the store cannot resolve.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The operation is not defined for this kind of entity
    /// (e.g. setting the quantity of a non-stocked product).
    #[error("unsupported operation: {0}")]
    Unsupported(String),

    /// A requested entity is not present.
    #[error("not found: {0}")]
    NotFound(String),
}

/// Fieldless discriminant of [`DomainError`], for branching without matching
/// on messages.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    Unsupported,
    NotFound,
}

impl DomainError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            DomainError::Unsupported(_) => ErrorKind::Unsupported,
            DomainError::NotFound(_) => ErrorKind::NotFound,
        }
    }

    /// The bare message, without the kind prefix added by `Display`.
    pub fn message(&self) -> &str {
        match self {
            DomainError::InvalidArgument(msg)
            | DomainError::Unsupported(msg)
            | DomainError::NotFound(msg) => msg,
        }
    }
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            ErrorKind::InvalidArgument => "invalid_argument",
            ErrorKind::Unsupported => "unsupported",
            ErrorKind::NotFound => "not_found",
        };
        f.write_str(s)
    }
}
