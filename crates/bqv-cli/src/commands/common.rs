//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use bqv_core::Config;
use bqv_warehouse::{BigQueryBackend, BigQueryConfig};
use std::path::Path;

use crate::cli::GlobalArgs;

/// Load bqv.yml from `--config`, or from the working directory if present.
pub(crate) fn load_config(global: &GlobalArgs) -> Result<Config> {
    match &global.config {
        Some(path) => {
            Config::load(Path::new(path)).with_context(|| format!("Failed to load config {path}"))
        }
        None => Config::load_from_dir(Path::new(".")).context("Failed to load config"),
    }
}

/// Build the BigQuery backend from config plus global overrides.
pub(crate) fn build_warehouse(global: &GlobalArgs, config: &Config) -> Result<BigQueryBackend> {
    let mut bq_config = BigQueryConfig::from_config(config, global.access_token.clone());
    if let Some(url) = &global.api_base_url {
        bq_config.api_base_url = url.trim_end_matches('/').to_string();
    }
    BigQueryBackend::new(bq_config).context("Failed to create BigQuery client")
}
