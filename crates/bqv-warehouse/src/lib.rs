//! bqv-warehouse - Warehouse client layer for bq-query-viewer
//!
//! This crate provides the `Warehouse` trait used to fetch job metadata and
//! dataset listings, a BigQuery REST implementation, and (with the
//! `test-support` feature) an in-memory implementation.

pub mod bigquery;
pub mod error;
#[cfg(feature = "test-support")]
pub mod memory;
pub mod traits;

pub use bigquery::{BigQueryBackend, BigQueryConfig};
pub use error::{WarehouseError, WarehouseResult};
#[cfg(feature = "test-support")]
pub use memory::{MemoryWarehouse, WarehouseCall};
pub use traits::Warehouse;
