//! # Service Error Types
//!
//! Error types for document service operations.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Service Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Caller Input   │  │   Lifecycle     │  │     Storage             │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Validation     │  │  Lifecycle      │  │  Allocation             │ │
//! │  │  Unsupported-   │  │  NotFound       │  │  Database               │ │
//! │  │  Currency       │  │                 │  │  Artifact               │ │
//! │  │                 │  │                 │  │  ArtifactMissing        │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  Validation and Lifecycle are the caller's fault and never retried;    │
//! │  storage failures may be transient (see is_retryable).                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use skrepka_core::{LifecycleError, RenderError, ValidationError};
use skrepka_db::DbError;

/// Result type alias for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Document service error covering the full generation and lifecycle flow.
#[derive(Debug, Error)]
pub enum ServiceError {
    // =========================================================================
    // Caller Input Errors
    // =========================================================================
    /// Payload failed validation before any work started.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// No amount speller registered for the requested currency.
    #[error("unsupported currency: {code}")]
    UnsupportedCurrency { code: String },

    // =========================================================================
    // Lifecycle Errors
    // =========================================================================
    /// Requested status change is not a legal transition.
    #[error("lifecycle violation: {0}")]
    Lifecycle(#[from] LifecycleError),

    /// Document id does not exist.
    #[error("document not found: {id}")]
    NotFound { id: String },

    // =========================================================================
    // Rendering Errors
    // =========================================================================
    /// PDF assembly failed.
    #[error("render failed: {0}")]
    Render(#[from] RenderError),

    // =========================================================================
    // Storage Errors
    // =========================================================================
    /// Claiming the next sequence number failed.
    ///
    /// Separate from [`ServiceError::Database`]: the counter claim rolls
    /// back with its transaction, so the whole generation can be retried
    /// without burning a number.
    #[error("number allocation failed: {0}")]
    Allocation(#[source] DbError),

    /// Database operation failed.
    #[error("database error: {0}")]
    Database(#[from] DbError),

    /// Artifact file I/O failed.
    #[error("artifact storage error: {0}")]
    Artifact(#[from] std::io::Error),

    /// Document row exists but its PDF file is gone from the store.
    #[error("artifact missing for document {document_id}: {key}")]
    ArtifactMissing { document_id: String, key: String },
}

// =============================================================================
// Error Categorization (for retry logic)
// =============================================================================

impl ServiceError {
    /// Returns true if the failed operation can be retried as-is.
    ///
    /// Validation, lifecycle, and not-found errors are deterministic:
    /// the same call fails the same way. Connection-level database
    /// failures may clear up.
    pub fn is_retryable(&self) -> bool {
        match self {
            ServiceError::Allocation(_) => true,
            ServiceError::Database(e) => e.is_retryable(),
            ServiceError::Artifact(_) => true,
            _ => false,
        }
    }

    /// Returns true if the error is the caller's fault (bad input or
    /// an illegal request), as opposed to an infrastructure failure.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            ServiceError::Validation(_)
                | ServiceError::Lifecycle(_)
                | ServiceError::NotFound { .. }
                | ServiceError::UnsupportedCurrency { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(ServiceError::Allocation(DbError::QueryFailed("locked".into())).is_retryable());
        assert!(ServiceError::Database(DbError::PoolExhausted).is_retryable());
        assert!(!ServiceError::Database(DbError::UniqueViolation {
            field: "number".into()
        })
        .is_retryable());
        assert!(!ServiceError::NotFound { id: "x".into() }.is_retryable());
        assert!(!ServiceError::UnsupportedCurrency { code: "USD".into() }.is_retryable());
    }

    #[test]
    fn test_caller_error_classification() {
        assert!(ServiceError::NotFound { id: "x".into() }.is_caller_error());
        assert!(ServiceError::UnsupportedCurrency { code: "USD".into() }.is_caller_error());
        assert!(!ServiceError::Database(DbError::PoolExhausted).is_caller_error());
    }
}
