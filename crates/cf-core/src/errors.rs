//! Cross-cutting error types for CodeFlow.
//!
//! Domain-specific errors (`AuthError`, `SearchError`, ...) live in their own
//! crates. They converge into `anyhow::Error` in `cf-cli`.

use thiserror::Error;

/// Errors that can be raised by any CodeFlow crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// A string did not name a known enum variant.
    #[error("Unknown {kind} '{value}'")]
    UnknownVariant { kind: &'static str, value: String },

    /// Data failed validation (schema, format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
