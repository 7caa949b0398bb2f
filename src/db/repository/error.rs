//! Error types for repository operations.
//!
//! Store failures carry structured context so that callers and logs can tell
//! what operation failed, on which entity, and whether a retry makes sense.

use std::fmt;

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Structured context for repository errors.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The operation being performed (e.g., "insert_entry", "get_class")
    pub operation: Option<String>,
    /// The entity type involved (e.g., "entry", "class", "teacher")
    pub entity: Option<String>,
    /// The entity ID if applicable
    pub entity_id: Option<String>,
    /// Additional details about the error
    pub details: Option<String>,
    /// Whether this error is retryable
    pub retryable: bool,
}

impl ErrorContext {
    /// Create a new error context with an operation name.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: Some(operation.into()),
            ..Default::default()
        }
    }

    /// Set the entity type.
    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    /// Set the entity ID.
    pub fn with_entity_id(mut self, id: impl ToString) -> Self {
        self.entity_id = Some(id.to_string());
        self
    }

    /// Set additional details.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Mark this error as retryable.
    pub fn retryable(mut self) -> Self {
        self.retryable = true;
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(ref op) = self.operation {
            parts.push(format!("operation={}", op));
        }
        if let Some(ref entity) = self.entity {
            parts.push(format!("entity={}", entity));
        }
        if let Some(ref id) = self.entity_id {
            parts.push(format!("id={}", id));
        }
        if let Some(ref details) = self.details {
            parts.push(format!("details={}", details));
        }
        if self.retryable {
            parts.push("retryable=true".to_string());
        }
        write!(f, "[{}]", parts.join(", "))
    }
}

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Database connection errors. Typically transient; safe to retry the
    /// whole call since failed operations leave the store untouched.
    #[error("Connection error: {message} {context}")]
    ConnectionError {
        message: String,
        context: ErrorContext,
    },

    /// Requested entity was not found.
    #[error("Not found: {message} {context}")]
    NotFound {
        message: String,
        context: ErrorContext,
    },

    /// Data validation failed before the store was touched.
    #[error("Data validation error: {message} {context}")]
    ValidationError {
        message: String,
        context: ErrorContext,
    },

    /// Transaction error (the check-then-write unit could not commit).
    #[error("Transaction error: {message} {context}")]
    TransactionError {
        message: String,
        context: ErrorContext,
    },

    /// Timeout waiting for a connection or query.
    #[error("Timeout error: {message} {context}")]
    TimeoutError {
        message: String,
        context: ErrorContext,
    },

    /// Internal/unexpected errors.
    #[error("Internal error: {message} {context}")]
    InternalError {
        message: String,
        context: ErrorContext,
    },
}

impl RepositoryError {
    /// Create a connection error. Always retryable.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::ConnectionError {
            message: message.into(),
            context: ErrorContext::default().retryable(),
        }
    }

    /// Create a connection error with full context.
    pub fn connection_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::ConnectionError {
            message: message.into(),
            context: context.retryable(),
        }
    }

    /// Create a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Create a not found error with context.
    pub fn not_found_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::NotFound {
            message: message.into(),
            context,
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Create a validation error with context.
    pub fn validation_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::ValidationError {
            message: message.into(),
            context,
        }
    }

    /// Create a transaction error. Always retryable.
    pub fn transaction(message: impl Into<String>) -> Self {
        Self::TransactionError {
            message: message.into(),
            context: ErrorContext::default().retryable(),
        }
    }

    /// Create a timeout error. Always retryable.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::TimeoutError {
            message: message.into(),
            context: ErrorContext::default().retryable(),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Whether retrying the whole operation is safe and potentially useful.
    ///
    /// Connection, transaction and timeout failures are transient
    /// infrastructure conditions; the store guarantees no partial writes, so
    /// the caller may re-submit the same request.
    pub fn is_retryable(&self) -> bool {
        match self {
            RepositoryError::ConnectionError { context, .. }
            | RepositoryError::NotFound { context, .. }
            | RepositoryError::ValidationError { context, .. }
            | RepositoryError::TransactionError { context, .. }
            | RepositoryError::TimeoutError { context, .. }
            | RepositoryError::InternalError { context, .. } => context.retryable,
        }
    }

    /// The error message without its context block.
    pub fn message(&self) -> &str {
        match self {
            RepositoryError::ConnectionError { message, .. }
            | RepositoryError::NotFound { message, .. }
            | RepositoryError::ValidationError { message, .. }
            | RepositoryError::TransactionError { message, .. }
            | RepositoryError::TimeoutError { message, .. }
            | RepositoryError::InternalError { message, .. } => message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_display_lists_only_set_fields() {
        let ctx = ErrorContext::new("insert_entry")
            .with_entity("entry")
            .with_entity_id(7);
        let rendered = ctx.to_string();
        assert!(rendered.contains("operation=insert_entry"));
        assert!(rendered.contains("entity=entry"));
        assert!(rendered.contains("id=7"));
        assert!(!rendered.contains("details="));
        assert!(!rendered.contains("retryable"));
    }

    #[test]
    fn connection_and_timeout_errors_are_retryable() {
        assert!(RepositoryError::connection("pool exhausted").is_retryable());
        assert!(RepositoryError::timeout("lock wait").is_retryable());
        assert!(RepositoryError::transaction("serialization failure").is_retryable());
        assert!(!RepositoryError::not_found("entry 3").is_retryable());
        assert!(!RepositoryError::validation("bad name").is_retryable());
        assert!(!RepositoryError::internal("bug").is_retryable());
    }

    #[test]
    fn message_strips_context() {
        let err = RepositoryError::not_found_with_context(
            "entry 3 does not exist",
            ErrorContext::new("get_entry").with_entity("entry").with_entity_id(3),
        );
        assert_eq!(err.message(), "entry 3 does not exist");
        assert!(err.to_string().contains("operation=get_entry"));
    }
}
