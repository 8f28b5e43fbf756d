//! In-memory warehouse backend for tests.
//!
//! Jobs, child-job lists, and dataset listings are registered up front; every
//! trait call is recorded so tests can check which requests were made.

use crate::error::{WarehouseError, WarehouseResult};
use crate::traits::Warehouse;
use async_trait::async_trait;
use bqv_core::{DefaultDataset, JobLocator, RawJob};
use std::collections::HashMap;
use std::sync::Mutex;

/// A request made against a [`MemoryWarehouse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarehouseCall {
    GetJob(JobLocator),
    ListChildJobs(JobLocator),
    ListTables(DefaultDataset),
}

/// Warehouse backed by in-memory maps.
#[derive(Default)]
pub struct MemoryWarehouse {
    jobs: HashMap<JobLocator, RawJob>,
    children: HashMap<JobLocator, Vec<JobLocator>>,
    tables: HashMap<DefaultDataset, Vec<String>>,
    calls: Mutex<Vec<WarehouseCall>>,
}

impl MemoryWarehouse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a job resource.
    pub fn with_job(mut self, locator: JobLocator, job: RawJob) -> Self {
        self.jobs.insert(locator, job);
        self
    }

    /// Register a child job of `parent`.
    pub fn with_child_job(mut self, parent: &JobLocator, child: JobLocator, job: RawJob) -> Self {
        self.children
            .entry(parent.clone())
            .or_default()
            .push(child.clone());
        self.jobs.insert(child, job);
        self
    }

    /// Register the table listing of a dataset.
    pub fn with_tables(mut self, dataset: DefaultDataset, tables: &[&str]) -> Self {
        self.tables
            .insert(dataset, tables.iter().map(|t| t.to_string()).collect());
        self
    }

    /// Calls recorded so far, in order.
    pub fn calls(&self) -> Vec<WarehouseCall> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    fn record(&self, call: WarehouseCall) -> WarehouseResult<()> {
        self.calls
            .lock()
            .map_err(|e| WarehouseError::Internal(format!("call log poisoned: {e}")))?
            .push(call);
        Ok(())
    }
}

#[async_trait]
impl Warehouse for MemoryWarehouse {
    async fn get_job(&self, locator: &JobLocator) -> WarehouseResult<RawJob> {
        self.record(WarehouseCall::GetJob(locator.clone()))?;
        self.jobs
            .get(locator)
            .cloned()
            .ok_or_else(|| WarehouseError::NotFound(format!("Job {locator}")))
    }

    async fn list_child_jobs(&self, parent: &JobLocator) -> WarehouseResult<Vec<JobLocator>> {
        self.record(WarehouseCall::ListChildJobs(parent.clone()))?;
        Ok(self.children.get(parent).cloned().unwrap_or_default())
    }

    async fn list_tables(&self, dataset: &DefaultDataset) -> WarehouseResult<Vec<String>> {
        self.record(WarehouseCall::ListTables(dataset.clone()))?;
        self.tables
            .get(dataset)
            .cloned()
            .ok_or_else(|| WarehouseError::NotFound(format!("Dataset {dataset}")))
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
