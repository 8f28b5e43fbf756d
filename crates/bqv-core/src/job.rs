//! Job metadata: the provider's wire shape and its normalized form.
//!
//! `RawJob` mirrors the subset of the warehouse's job resource this tool
//! reads (`configuration.jobType`, `configuration.query.*`,
//! `statistics.query.referencedTables`). Every field the provider may omit is
//! optional here; [`crate::normalize`] resolves the gaps into a
//! [`JobMetadata`].

use crate::error::CoreResult;
use crate::parameter::QueryParameter;
use crate::table::{DefaultDataset, TableRef};
use serde::{Deserialize, Serialize};

/// Job type tag of query jobs.
pub const QUERY_JOB_TYPE: &str = "QUERY";

/// Job resource as returned by `jobs.get` / `jobs.list?projection=full`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawJob {
    #[serde(default)]
    pub job_reference: Option<RawJobReference>,
    #[serde(default)]
    pub configuration: RawJobConfiguration,
    #[serde(default)]
    pub statistics: Option<RawJobStatistics>,
}

impl RawJob {
    /// Decode a job resource from its JSON representation.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Job id from the job reference, or `"<unknown>"` when absent.
    pub fn job_id(&self) -> &str {
        self.job_reference
            .as_ref()
            .map(|r| r.job_id.as_str())
            .unwrap_or("<unknown>")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawJobReference {
    pub project_id: String,
    pub job_id: String,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawJobConfiguration {
    #[serde(default)]
    pub job_type: Option<String>,
    #[serde(default)]
    pub query: Option<RawQueryConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQueryConfig {
    #[serde(default)]
    pub default_dataset: Option<DefaultDataset>,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub query_parameters: Vec<RawQueryParameter>,
}

/// A bound parameter. Positional parameters carry no name, and the value
/// payload is not returned on every execution path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQueryParameter {
    #[serde(default)]
    pub name: Option<String>,
    pub parameter_type: RawParameterType,
    #[serde(default)]
    pub parameter_value: Option<RawParameterValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawParameterType {
    #[serde(rename = "type")]
    pub type_tag: String,
    #[serde(default)]
    pub array_type: Option<Box<RawParameterType>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawParameterValue {
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub array_values: Option<Vec<RawParameterValue>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawJobStatistics {
    #[serde(default)]
    pub query: Option<RawQueryStatistics>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQueryStatistics {
    #[serde(default)]
    pub referenced_tables: Vec<TableRef>,
}

/// Normalized metadata of a query job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobMetadata {
    /// `None` when the job ran without a default dataset
    pub default_dataset: Option<DefaultDataset>,
    pub query: String,
    pub parameters: Vec<QueryParameter>,
    pub referenced_tables: Vec<TableRef>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_query_job() {
        let json = r#"{
            "jobReference": {"projectId": "proj", "jobId": "job123", "location": "US"},
            "configuration": {
                "jobType": "QUERY",
                "query": {
                    "query": "SELECT * FROM orders WHERE id = @oid",
                    "defaultDataset": {"projectId": "proj", "datasetId": "sales"},
                    "queryParameters": [
                        {"name": "oid", "parameterType": {"type": "STRING"}, "parameterValue": {"value": "42"}},
                        {"name": "ids", "parameterType": {"type": "ARRAY", "arrayType": {"type": "INT64"}}}
                    ]
                }
            },
            "statistics": {
                "query": {
                    "referencedTables": [{"projectId": "proj", "datasetId": "sales", "tableId": "orders"}]
                }
            }
        }"#;
        let job = RawJob::from_json(json).unwrap();
        assert_eq!(job.job_id(), "job123");
        assert_eq!(job.configuration.job_type.as_deref(), Some("QUERY"));

        let query = job.configuration.query.as_ref().unwrap();
        assert_eq!(query.query_parameters.len(), 2);
        assert_eq!(
            query.query_parameters[1]
                .parameter_type
                .array_type
                .as_ref()
                .unwrap()
                .type_tag,
            "INT64"
        );
        assert!(query.query_parameters[1].parameter_value.is_none());

        let stats = job.statistics.unwrap().query.unwrap();
        assert_eq!(stats.referenced_tables[0].table_id, "orders");
    }

    #[test]
    fn test_decode_minimal_load_job() {
        let job = RawJob::from_json(r#"{"configuration": {"jobType": "LOAD"}}"#).unwrap();
        assert_eq!(job.configuration.job_type.as_deref(), Some("LOAD"));
        assert!(job.configuration.query.is_none());
        assert_eq!(job.job_id(), "<unknown>");
    }

    #[test]
    fn test_decode_invalid_json() {
        let err = RawJob::from_json("{not json").unwrap_err();
        assert!(err.to_string().contains("B005"), "got: {}", err);
    }
}
