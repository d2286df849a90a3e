//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("line {line}: {message}")]
    Script { line: usize, message: String },

    #[error("unresolved field reference: {0}")]
    UnresolvedRef(String),

    #[error("config error: {message}")]
    Config { message: String },

    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ApplicationError {
    /// Attach a script line number to an error raised while executing it.
    ///
    /// Errors that already carry a line (non-zero) are returned unchanged.
    pub fn at_line(self, line: usize) -> Self {
        match self {
            ApplicationError::Script { line: 0, message } => ApplicationError::Script { line, message },
            ApplicationError::Script { .. } => self,
            other => ApplicationError::Script {
                line,
                message: other.to_string(),
            },
        }
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
