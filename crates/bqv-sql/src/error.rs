//! Error types for bqv-sql

use thiserror::Error;

/// SQL rewriting errors
#[derive(Error, Debug)]
pub enum SqlError {
    /// Parameter type outside the supported set (S001)
    #[error("[S001] Parameter type not supported: {type_tag}")]
    UnsupportedParameterType { type_tag: String },

    /// Name could not be turned into a match pattern (S002)
    #[error("[S002] Invalid match pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

/// Result type alias for SqlError
pub type SqlResult<T> = Result<T, SqlError>;
