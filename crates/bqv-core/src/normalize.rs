//! Job metadata normalization.
//!
//! Converts the provider's job resource into [`JobMetadata`], and resolves
//! the set of tables whose bare names may appear unqualified in the query:
//! the parent job's referenced tables, plus those of its child jobs, limited
//! to tables that exist in the default dataset.

use crate::error::{CoreError, CoreResult};
use crate::job::{JobMetadata, RawJob, RawQueryParameter, QUERY_JOB_TYPE};
use crate::parameter::{ParameterType, QueryParameter};
use crate::table::TableRef;
use std::collections::HashSet;

const ARRAY_TYPE_TAG: &str = "ARRAY";

/// Normalize a raw job resource.
///
/// Fails with `NotAQueryJob` unless `configuration.jobType` is `QUERY`.
/// Missing value payloads become unbound parameters instead of errors, since
/// the provider does not return them on every execution path.
pub fn normalize(raw: &RawJob) -> CoreResult<JobMetadata> {
    let job_type = raw.configuration.job_type.as_deref().unwrap_or("<unknown>");
    if job_type != QUERY_JOB_TYPE {
        return Err(CoreError::NotAQueryJob {
            job_type: job_type.to_string(),
        });
    }

    let query = raw
        .configuration
        .query
        .as_ref()
        .ok_or_else(|| CoreError::MissingQueryConfig {
            job_id: raw.job_id().to_string(),
        })?;

    let parameters = query
        .query_parameters
        .iter()
        .filter_map(normalize_parameter)
        .collect();

    let referenced_tables = raw
        .statistics
        .as_ref()
        .and_then(|s| s.query.as_ref())
        .map(|q| q.referenced_tables.clone())
        .unwrap_or_default();

    Ok(JobMetadata {
        default_dataset: query.default_dataset.clone(),
        query: query.query.clone(),
        parameters,
        referenced_tables,
    })
}

fn normalize_parameter(raw: &RawQueryParameter) -> Option<QueryParameter> {
    let Some(name) = raw.name.as_deref().filter(|n| !n.is_empty()) else {
        log::warn!(
            "Skipping positional {} parameter: only named parameters can be substituted",
            raw.parameter_type.type_tag
        );
        return None;
    };

    if raw.parameter_type.type_tag == ARRAY_TYPE_TAG {
        let element_type = raw
            .parameter_type
            .array_type
            .as_deref()
            .map(|t| ParameterType::from_tag(&t.type_tag))
            .unwrap_or_else(|| ParameterType::Other(ARRAY_TYPE_TAG.to_string()));

        // An empty array comes back as a value payload without `arrayValues`.
        let values = raw.parameter_value.as_ref().map(|payload| {
            payload
                .array_values
                .iter()
                .flatten()
                .filter_map(|item| {
                    if item.value.is_none() {
                        log::warn!("Dropping element without a value from array parameter @{name}");
                    }
                    item.value.clone()
                })
                .collect()
        });

        return Some(QueryParameter::array(name, element_type, values));
    }

    let value = raw.parameter_value.as_ref().and_then(|v| v.value.clone());
    Some(QueryParameter::scalar(
        name,
        ParameterType::from_tag(&raw.parameter_type.type_tag),
        value,
    ))
}

/// Append child-job tables to the primary job's list.
///
/// Tables in transient datasets (`_` prefix) are dropped from both the primary
/// list and the children. A child table is also skipped when a table with the
/// same `table_id` is already in the list. The dedup key is the bare table id,
/// so same-named tables from different datasets collapse into whichever was
/// seen first.
pub fn merge_child_tables(primary: &[TableRef], children: &[JobMetadata]) -> Vec<TableRef> {
    let mut merged: Vec<TableRef> = Vec::with_capacity(primary.len());

    let candidates = primary
        .iter()
        .chain(children.iter().flat_map(|c| &c.referenced_tables));
    for table in candidates {
        if table.is_transient() {
            log::debug!("Ignoring table {table} from transient dataset");
            continue;
        }
        if merged.iter().any(|t| t.table_id == table.table_id) {
            continue;
        }
        merged.push(table.clone());
    }

    merged
}

/// Keep only tables whose id appears in the default dataset's table listing.
///
/// Tables outside the default dataset are already written fully qualified in
/// the query text.
pub fn retain_default_dataset_tables(
    tables: Vec<TableRef>,
    default_dataset_tables: &[String],
) -> Vec<TableRef> {
    let listing: HashSet<&str> = default_dataset_tables.iter().map(String::as_str).collect();

    tables
        .into_iter()
        .filter(|t| {
            let keep = listing.contains(t.table_id.as_str());
            if !keep {
                log::debug!("Dropping table {t}: not in the default dataset");
            }
            keep
        })
        .collect()
}

/// Merge child tables into the primary job's list, then filter by the default
/// dataset listing.
pub fn resolve_referenced_tables(
    primary: &JobMetadata,
    children: &[JobMetadata],
    default_dataset_tables: &[String],
) -> Vec<TableRef> {
    let merged = merge_child_tables(&primary.referenced_tables, children);
    retain_default_dataset_tables(merged, default_dataset_tables)
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
