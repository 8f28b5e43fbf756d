//! Rebuild a runnable SQL document from an executed query job.
//!
//! Fetches the job, its child jobs, and the default dataset's table listing,
//! then inlines parameters and qualifies bare table names. The result is the
//! rewritten query under a header comment recording the job, the default
//! dataset, and the bound parameter values.

use anyhow::{Context, Result};
use bqv_core::{normalize, resolve_referenced_tables, Config, JobLocator, JobMetadata};
use bqv_sql::{qualify_tables, substitute_parameters, SkippedParameter};
use bqv_warehouse::Warehouse;
use futures::stream::{self, StreamExt, TryStreamExt};

/// Upper bound on child-job fetches in flight at once.
const CHILD_FETCH_CONCURRENCY: usize = 8;

/// Switches for the rewrite steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ReconstructOptions {
    pub qualify_tables: bool,
    pub include_header: bool,
}

impl Default for ReconstructOptions {
    fn default() -> Self {
        Self {
            qualify_tables: true,
            include_header: true,
        }
    }
}

impl From<&Config> for ReconstructOptions {
    fn from(config: &Config) -> Self {
        Self {
            qualify_tables: config.qualify_tables,
            include_header: config.include_header,
        }
    }
}

/// A rebuilt query document.
#[derive(Debug)]
pub(crate) struct AnnotatedQuery {
    pub locator: JobLocator,
    pub document: String,
    /// Parameters whose placeholders could not be substituted
    pub skipped: Vec<SkippedParameter>,
}

/// Build the annotated query document for a job locator.
///
/// The locator is validated before any warehouse call. Child-job metadata is
/// fetched concurrently and joined before table references are merged.
pub(crate) async fn build_annotated_query(
    warehouse: &dyn Warehouse,
    input: &str,
    options: &ReconstructOptions,
) -> Result<AnnotatedQuery> {
    let input = input.trim();
    let locator = JobLocator::parse(input)?;

    log::info!(
        "Fetching job {} from {}",
        locator.job_id,
        warehouse.backend_name()
    );
    let metadata = fetch_metadata(warehouse, &locator).await?;

    let tables = if options.qualify_tables {
        let child_locators = warehouse
            .list_child_jobs(&locator)
            .await
            .with_context(|| format!("Failed to list child jobs of {locator}"))?;
        let children: Vec<JobMetadata> = stream::iter(&child_locators)
            .map(|child| fetch_metadata(warehouse, child))
            .buffered(CHILD_FETCH_CONCURRENCY)
            .try_collect()
            .await?;

        let listing = match &metadata.default_dataset {
            Some(dataset) => warehouse
                .list_tables(dataset)
                .await
                .with_context(|| format!("Failed to list tables of dataset {dataset}"))?,
            None => Vec::new(),
        };

        resolve_referenced_tables(&metadata, &children, &listing)
    } else {
        Vec::new()
    };

    let substitution = substitute_parameters(&metadata.query, &metadata.parameters);
    let sql = qualify_tables(&substitution.sql, &tables);

    let document = if options.include_header {
        format!("{}\n\n{}", render_header(input, &metadata), sql)
    } else {
        sql
    };

    Ok(AnnotatedQuery {
        locator,
        document,
        skipped: substitution.skipped,
    })
}

async fn fetch_metadata(warehouse: &dyn Warehouse, locator: &JobLocator) -> Result<JobMetadata> {
    let raw = warehouse
        .get_job(locator)
        .await
        .with_context(|| format!("Failed to fetch job {locator}"))?;
    Ok(normalize(&raw)?)
}

/// Render the header comment block.
pub(crate) fn render_header(input: &str, metadata: &JobMetadata) -> String {
    let dataset = metadata
        .default_dataset
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| "(none)".to_string());

    let mut lines = vec![
        "/*".to_string(),
        format!("Job: {input}"),
        format!("Default Dataset: {dataset}"),
        "Parameters:".to_string(),
    ];
    lines.extend(
        metadata
            .parameters
            .iter()
            .map(|p| format!("  {}: {}", p.name(), p.display_value())),
    );
    lines.push("*/".to_string());
    lines.join("\n")
}

#[cfg(test)]
#[path = "reconstruct_test.rs"]
mod tests;
