//! BigQuery REST backend.
//!
//! Talks to the `bigquery/v2` JSON API with a bearer token. The token is
//! either supplied up front or obtained once, lazily, by running an external
//! command (by default `gcloud auth print-access-token`).

use crate::error::{WarehouseError, WarehouseResult};
use crate::traits::Warehouse;
use async_trait::async_trait;
use bqv_core::job::RawJobReference;
use bqv_core::{Config, DefaultDataset, JobLocator, RawJob, TableRef};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tokio::process::Command;
use tokio::sync::OnceCell;

/// Connection settings for [`BigQueryBackend`].
#[derive(Debug, Clone)]
pub struct BigQueryConfig {
    pub api_base_url: String,
    pub timeout: Duration,
    pub page_size: u32,
    /// Explicit access token; when `None`, `access_token_command` is run
    pub access_token: Option<String>,
    pub access_token_command: Vec<String>,
}

impl BigQueryConfig {
    /// Build connection settings from the tool configuration.
    pub fn from_config(config: &Config, access_token: Option<String>) -> Self {
        Self {
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(config.timeout_secs),
            page_size: config.page_size,
            access_token,
            access_token_command: config.access_token_command.clone(),
        }
    }
}

/// BigQuery warehouse backend over the REST API.
pub struct BigQueryBackend {
    client: Client,
    config: BigQueryConfig,
    token: OnceCell<String>,
}

/// A page of a `list` response.
trait ListPage: DeserializeOwned {
    type Item;

    fn into_parts(self) -> (Vec<Self::Item>, Option<String>);
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct JobListPage {
    #[serde(default)]
    jobs: Vec<JobListEntry>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct JobListEntry {
    #[serde(default)]
    job_reference: Option<RawJobReference>,
}

impl ListPage for JobListPage {
    type Item = RawJobReference;

    fn into_parts(self) -> (Vec<RawJobReference>, Option<String>) {
        let refs = self.jobs.into_iter().filter_map(|j| j.job_reference).collect();
        (refs, self.next_page_token)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TableListPage {
    #[serde(default)]
    tables: Vec<TableListEntry>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TableListEntry {
    table_reference: TableRef,
}

impl ListPage for TableListPage {
    type Item = String;

    fn into_parts(self) -> (Vec<String>, Option<String>) {
        let ids = self
            .tables
            .into_iter()
            .map(|t| t.table_reference.table_id)
            .collect();
        (ids, self.next_page_token)
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Pull the human-readable message out of a Google API error body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

impl BigQueryBackend {
    /// Create a backend. No request is made until the first call.
    pub fn new(config: BigQueryConfig) -> WarehouseResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| WarehouseError::ConnectionError(e.to_string()))?;

        Ok(Self {
            client,
            config,
            token: OnceCell::new(),
        })
    }

    async fn access_token(&self) -> WarehouseResult<&str> {
        let token = self
            .token
            .get_or_try_init(|| async {
                match &self.config.access_token {
                    Some(token) => Ok(token.clone()),
                    None => run_token_command(&self.config.access_token_command).await,
                }
            })
            .await?;
        Ok(token.as_str())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> WarehouseResult<T> {
        let token = self.access_token().await?;
        log::debug!("GET {url} {query:?}");

        let resp = self
            .client
            .get(url)
            .bearer_auth(token)
            .query(query)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;

        if status.is_success() {
            return Ok(serde_json::from_str(&body)?);
        }

        let message = error_message(&body);
        Err(match status {
            StatusCode::NOT_FOUND => WarehouseError::NotFound(message),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => WarehouseError::AuthError(message),
            _ => WarehouseError::RequestFailed {
                status: status.as_u16(),
                message,
            },
        })
    }

    /// Follow `nextPageToken` until the listing is exhausted.
    async fn collect_pages<P: ListPage>(
        &self,
        url: &str,
        base_query: Vec<(&str, String)>,
    ) -> WarehouseResult<Vec<P::Item>> {
        let mut items = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut query = base_query.clone();
            query.push(("maxResults", self.config.page_size.to_string()));
            if let Some(token) = page_token.take() {
                query.push(("pageToken", token));
            }

            let page: P = self.get_json(url, &query).await?;
            let (page_items, next) = page.into_parts();
            items.extend(page_items);

            match next {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        Ok(items)
    }
}

async fn run_token_command(command: &[String]) -> WarehouseResult<String> {
    let (program, args) = command.split_first().ok_or_else(|| {
        WarehouseError::AuthError("no access token and no token command configured".to_string())
    })?;

    log::debug!("Obtaining access token via {program}");
    let output = Command::new(program)
        .args(args)
        .output()
        .await
        .map_err(|e| WarehouseError::AuthError(format!("failed to run {program}: {e}")))?;

    if !output.status.success() {
        return Err(WarehouseError::AuthError(format!(
            "{program} exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() {
        return Err(WarehouseError::AuthError(format!(
            "{program} printed an empty access token"
        )));
    }
    Ok(token)
}

#[async_trait]
impl Warehouse for BigQueryBackend {
    async fn get_job(&self, locator: &JobLocator) -> WarehouseResult<RawJob> {
        let url = self.url(&format!(
            "/projects/{}/jobs/{}",
            locator.project_id, locator.job_id
        ));
        self.get_json(&url, &[("location", locator.location.clone())])
            .await
    }

    async fn list_child_jobs(&self, parent: &JobLocator) -> WarehouseResult<Vec<JobLocator>> {
        let url = self.url(&format!("/projects/{}/jobs", parent.project_id));
        let refs = self
            .collect_pages::<JobListPage>(&url, vec![("parentJobId", parent.job_id.clone())])
            .await?;

        Ok(refs
            .into_iter()
            .map(|r| {
                let location = r.location.unwrap_or_else(|| parent.location.clone());
                JobLocator::new(r.project_id, location, r.job_id)
            })
            .collect())
    }

    async fn list_tables(&self, dataset: &DefaultDataset) -> WarehouseResult<Vec<String>> {
        let url = self.url(&format!(
            "/projects/{}/datasets/{}/tables",
            dataset.project_id, dataset.dataset_id
        ));
        self.collect_pages::<TableListPage>(&url, Vec::new()).await
    }

    fn backend_name(&self) -> &'static str {
        "bigquery"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_from_google_body() {
        let body = r#"{"error": {"code": 404, "message": "Not found: Job proj:US.job1", "status": "NOT_FOUND"}}"#;
        assert_eq!(error_message(body), "Not found: Job proj:US.job1");
    }

    #[test]
    fn test_error_message_falls_back_to_body() {
        assert_eq!(error_message("  upstream timeout \n"), "upstream timeout");
    }

    #[test]
    fn test_config_trims_trailing_slash() {
        let config = Config {
            api_base_url: "http://localhost:9050/bigquery/v2/".to_string(),
            ..Config::default()
        };
        let bq = BigQueryConfig::from_config(&config, Some("t".to_string()));
        assert_eq!(bq.api_base_url, "http://localhost:9050/bigquery/v2");
        assert_eq!(bq.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_job_list_page_skips_entries_without_reference() {
        let page: JobListPage = serde_json::from_str(
            r#"{"jobs": [{"jobReference": {"projectId": "p", "jobId": "c1"}}, {}], "nextPageToken": "n"}"#,
        )
        .unwrap();
        let (refs, next) = page.into_parts();
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].job_id, "c1");
        assert_eq!(next.as_deref(), Some("n"));
    }

    #[tokio::test]
    async fn test_token_command_failure_is_auth_error() {
        let result = run_token_command(&["/nonexistent/bqv-token-helper".to_string()]).await;
        assert!(matches!(result, Err(WarehouseError::AuthError(_))));
    }

    #[tokio::test]
    async fn test_empty_token_command_is_auth_error() {
        assert!(matches!(
            run_token_command(&[]).await,
            Err(WarehouseError::AuthError(_))
        ));
    }
}
