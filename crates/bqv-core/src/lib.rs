//! bqv-core - Core library for bq-query-viewer
//!
//! Shared types describing an executed query job (locator, parameters,
//! referenced tables), the provider's wire shapes, the normalizer that turns
//! one into the other, and the configuration file.

pub mod config;
pub mod error;
pub mod job;
pub mod locator;
pub mod normalize;
pub mod parameter;
pub mod table;

pub use config::Config;
pub use error::{CoreError, CoreResult};
pub use job::{JobMetadata, RawJob};
pub use locator::JobLocator;
pub use normalize::{
    merge_child_tables, normalize, resolve_referenced_tables, retain_default_dataset_tables,
};
pub use parameter::{ArrayParameter, ParameterType, QueryParameter, ScalarParameter};
pub use table::{DefaultDataset, TableRef};
