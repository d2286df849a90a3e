//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::field::FieldKind;
use crate::domain::id::FieldId;

/// Domain errors represent invalid user input against the field model.
///
/// The tree operations themselves never fail; these surface when a caller
/// asks for something that cannot be resolved.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("unknown field kind: {0}")]
    UnknownKind(String),

    #[error("invalid default for {kind} field: {value:?}")]
    InvalidDefault { kind: FieldKind, value: String },

    #[error("field not found: {0}")]
    FieldNotFound(FieldId),

    #[error("field {0} cannot hold children")]
    NotAContainer(FieldId),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
