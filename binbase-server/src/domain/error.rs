//! Domain error types.
//!
//! These errors represent validation failures in the domain layer. They are
//! distinct from provider and storage errors.

/// Domain-level validation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Input is not an acceptable BIN
    #[error("invalid BIN {input:?}: {reason}")]
    InvalidBin { input: String, reason: &'static str },
}
