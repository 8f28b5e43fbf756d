//! Error types for bqv-warehouse

use thiserror::Error;

/// Warehouse client errors
#[derive(Error, Debug)]
pub enum WarehouseError {
    /// Connection error (W001)
    #[error("[W001] Warehouse connection failed: {0}")]
    ConnectionError(String),

    /// Non-success API response (W002)
    #[error("[W002] Warehouse request failed with status {status}: {message}")]
    RequestFailed { status: u16, message: String },

    /// Job or dataset not found (W003)
    #[error("[W003] Not found: {0}")]
    NotFound(String),

    /// Response body could not be decoded (W004)
    #[error("[W004] Failed to decode warehouse response: {0}")]
    DecodeError(String),

    /// Access token missing or rejected (W005)
    #[error("[W005] Warehouse authentication failed: {0}")]
    AuthError(String),

    /// Internal error (W006)
    #[error("[W006] Internal warehouse client error: {0}")]
    Internal(String),
}

/// Result type alias for WarehouseError
pub type WarehouseResult<T> = Result<T, WarehouseError>;

impl From<reqwest::Error> for WarehouseError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            WarehouseError::DecodeError(err.to_string())
        } else {
            WarehouseError::ConnectionError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for WarehouseError {
    fn from(err: serde_json::Error) -> Self {
        WarehouseError::DecodeError(err.to_string())
    }
}
