//! Search error types for cf-search.

/// Errors from parsing filter input and matching listings.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// A field name did not match any filterable field.
    #[error("unknown {kind} field '{value}'")]
    UnknownField { kind: &'static str, value: String },

    /// A price range could not be parsed.
    #[error("invalid price range '{0}': expected MIN-MAX")]
    InvalidPriceRange(String),

    /// Error from the core domain types (unknown enum token, ...).
    #[error(transparent)]
    Core(#[from] cf_core::errors::CoreError),
}
