//! Warehouse trait definition

use crate::error::WarehouseResult;
use async_trait::async_trait;
use bqv_core::{DefaultDataset, JobLocator, RawJob};

/// Read-only access to job metadata and dataset listings.
///
/// Implementations must be Send + Sync for async operation. Pagination,
/// authentication, and retries are the implementation's concern.
#[async_trait]
pub trait Warehouse: Send + Sync {
    /// Fetch a job resource
    async fn get_job(&self, locator: &JobLocator) -> WarehouseResult<RawJob>;

    /// List the jobs spawned by a parent job (e.g. the statements of a script)
    async fn list_child_jobs(&self, parent: &JobLocator) -> WarehouseResult<Vec<JobLocator>>;

    /// List the ids of all tables in a dataset
    async fn list_tables(&self, dataset: &DefaultDataset) -> WarehouseResult<Vec<String>>;

    /// Backend identifier for logging
    fn backend_name(&self) -> &'static str;
}
