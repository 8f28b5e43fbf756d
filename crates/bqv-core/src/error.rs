//! Error types for bqv-core

use thiserror::Error;

/// Core error type for bq-query-viewer
#[derive(Error, Debug)]
pub enum CoreError {
    /// B001: No job locator was given
    #[error("[B001] Job ID is required")]
    EmptyInput,

    /// B002: Job locator does not match any accepted form
    #[error("[B002] Invalid job locator '{input}'. Please provide a valid [Project ID].[Location].[Job ID] or [Project ID]:[Location].[Job ID]")]
    InvalidJobLocator { input: String },

    /// B003: Target job is not a query job
    #[error("[B003] Job is not a query job (job type: {job_type})")]
    NotAQueryJob { job_type: String },

    /// B004: Query job without a query configuration block
    #[error("[B004] Query job {job_id} has no query configuration")]
    MissingQueryConfig { job_id: String },

    /// B005: Job metadata could not be decoded
    #[error("[B005] Failed to parse job metadata: {0}")]
    MetadataParseError(#[from] serde_json::Error),

    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Failed to parse configuration file
    #[error("[E002] Failed to parse config: {0}")]
    ConfigParseError(#[from] serde_yaml::Error),

    /// E003: Invalid configuration value
    #[error("[E003] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E004: IO error with file path context
    #[error("[E004] IO error at {path}: {source}")]
    IoWithPath {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
