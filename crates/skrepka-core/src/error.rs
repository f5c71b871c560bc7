//! # Error Types
//!
//! Domain-specific error types for skrepka-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  skrepka-core errors (this file)                                        │
//! │  ├── ValidationError  - Input validation failures (pre-pipeline)       │
//! │  ├── LifecycleError   - Illegal status transitions                     │
//! │  ├── RenderError      - PDF assembly failures (internal bug class)     │
//! │  └── CoreError        - Aggregate of the above                         │
//! │                                                                         │
//! │  skrepka-db errors (separate crate)                                     │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  skrepka-service errors (separate crate)                                │
//! │  └── ServiceError     - What pipeline callers see                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (item index, status names)
//! 3. Errors are enum variants, never String
//! 4. Validation errors happen before any state is created

use thiserror::Error;

use crate::types::DocumentStatus;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when a generation payload does not meet requirements.
/// They are reported synchronously, before a number is allocated or any
/// row is written, so a failed validation leaves no partial state.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required top-level field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// A top-level field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// The payload contains no line items.
    #[error("document must contain at least one line item")]
    EmptyItems,

    /// The payload contains more line items than allowed.
    #[error("document cannot have more than {max} line items")]
    TooManyItems { max: usize },

    /// A required line item field is missing or blank.
    #[error("item {index}: {field} is required")]
    ItemFieldRequired { index: usize, field: &'static str },

    /// A line item field value is too long.
    #[error("item {index}: {field} must be at most {max} characters")]
    ItemFieldTooLong {
        index: usize,
        field: &'static str,
        max: usize,
    },

    /// Line item quantity is zero or negative.
    #[error("item {index}: quantity must be positive")]
    NonPositiveQuantity { index: usize },

    /// Line item unit price is negative.
    #[error("item {index}: unit price cannot be negative")]
    NegativePrice { index: usize },

    /// A numeric line item field is not a representable amount
    /// (non-finite, or outside the fixed-point range).
    #[error("item {index}: {field} is not a valid amount")]
    MalformedAmount { index: usize, field: &'static str },
}

// =============================================================================
// Lifecycle Error
// =============================================================================

/// Status lifecycle violations.
///
/// Kept separate from [`ValidationError`] so callers can distinguish
/// "your input is malformed" from "that transition is not allowed".
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// The requested transition is not in the adjacency allow-list.
    #[error("illegal status transition: {from} -> {to}")]
    IllegalTransition {
        from: DocumentStatus,
        to: DocumentStatus,
    },
}

// =============================================================================
// Render Error
// =============================================================================

/// PDF rendering failures.
///
/// The renderer only sees pre-validated payloads, so anything surfacing
/// here is an internal bug rather than a user error. The caller logs the
/// payload context and rolls the generation back.
#[derive(Debug, Error)]
pub enum RenderError {
    /// PDF object assembly failed.
    #[error("pdf assembly failed: {0}")]
    Pdf(#[from] lopdf::Error),
}

// =============================================================================
// Core Error
// =============================================================================

/// Aggregate error for skrepka-core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Validation error (wraps ValidationError).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Lifecycle error (wraps LifecycleError).
    #[error("lifecycle error: {0}")]
    Lifecycle(#[from] LifecycleError),

    /// Render error (wraps RenderError).
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// No amount speller is registered for the requested currency.
    #[error("no amount speller registered for currency {code}")]
    UnsupportedCurrency { code: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::ItemFieldRequired {
            index: 2,
            field: "unit",
        };
        assert_eq!(err.to_string(), "item 2: unit is required");

        let err = ValidationError::NonPositiveQuantity { index: 0 };
        assert_eq!(err.to_string(), "item 0: quantity must be positive");

        let err = ValidationError::EmptyItems;
        assert_eq!(
            err.to_string(),
            "document must contain at least one line item"
        );
    }

    #[test]
    fn test_lifecycle_error_message() {
        let err = LifecycleError::IllegalTransition {
            from: DocumentStatus::Paid,
            to: DocumentStatus::Cancelled,
        };
        assert_eq!(err.to_string(), "illegal status transition: paid -> cancelled");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "seller.name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
