//! Error types for sqlasm

use crate::predicate::PredicateId;
use thiserror::Error;

/// Result type alias for sqlasm operations
pub type AsmResult<T> = Result<T, AsmError>;

/// Error types for statement assembly
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AsmError {
    /// A condition token references a predicate that was never defined
    #[error("Unresolved predicate reference: {0}")]
    UnresolvedPredicate(PredicateId),

    /// Placeholder markers and bound values are out of step
    #[error("Placeholder mismatch: {markers} marker(s) but {params} value(s)")]
    PlaceholderMismatch { markers: usize, params: usize },

    /// A value with no SQL literal form was inlined
    #[error("Value has no SQL literal form: {0}")]
    UnrepresentableLiteral(String),

    /// Builder state rejected by a generator
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AsmError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a placeholder mismatch error
    pub fn placeholder_mismatch(markers: usize, params: usize) -> Self {
        Self::PlaceholderMismatch { markers, params }
    }

    /// Check if this is an unresolved predicate error
    pub fn is_unresolved_predicate(&self) -> bool {
        matches!(self, Self::UnresolvedPredicate(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
