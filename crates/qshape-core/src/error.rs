//! Error types for the query compiler.

use thiserror::Error;

/// Errors that reject a query configuration before the AST is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// The configuration asks for something the compiler does not implement.
    #[error("query compiler does not support {0}")]
    UnsupportedFeature(String),

    /// A filter value does not have the shape its attribute requires.
    #[error("filter on {attribute} expects {expected} value(s), found {found}")]
    ArityMismatch {
        /// The attribute (or comma-joined composite key) being filtered.
        attribute: String,
        /// Number of values the attribute needs per tuple.
        expected: usize,
        /// Number of values supplied.
        found: usize,
    },

    /// A filter has no well-formed expression.
    #[error("invalid filter: {0}")]
    InvalidFilter(String),
}

/// Result type alias for compiler operations.
pub type Result<T> = std::result::Result<T, CompileError>;
