use thiserror::Error;

/// Errors returned by [`UserStorage`](super::UserStorage) operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The caller supplied something that is not a 24 hex digit object id.
    #[error("invalid user identifier: {id}")]
    InvalidIdentifier { id: String },

    /// Well-formed identifier with no matching record.
    #[error("user not found: {id}")]
    NotFound { id: String },

    /// The store assigned an identifier that is not an object id.
    #[error("failed to convert inserted id: {0}")]
    Conversion(String),

    #[error("failed to {operation}: {message}")]
    Persistence {
        operation: &'static str,
        message: String,
    },
}

impl StorageError {
    pub fn invalid_identifier(id: &str) -> Self {
        Self::InvalidIdentifier { id: id.to_string() }
    }

    pub fn not_found(id: &str) -> Self {
        Self::NotFound { id: id.to_string() }
    }

    pub fn persistence(operation: &'static str, message: impl ToString) -> Self {
        Self::Persistence {
            operation,
            message: message.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
