//! Configuration parsing for bqv.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config file names looked up in a directory, in order.
pub const CONFIG_FILE_NAMES: [&str; 2] = ["bqv.yml", "bqv.yaml"];

/// Tool configuration from bqv.yml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the warehouse REST API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Page size for job and table listings
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Command printing an OAuth access token, used when no token is given
    #[serde(default = "default_access_token_command")]
    pub access_token_command: Vec<String>,

    /// Rewrite bare table names to fully qualified ids
    #[serde(default = "default_true")]
    pub qualify_tables: bool,

    /// Prepend the job/dataset/parameter header comment
    #[serde(default = "default_true")]
    pub include_header: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            timeout_secs: default_timeout_secs(),
            page_size: default_page_size(),
            access_token_command: default_access_token_command(),
            qualify_tables: true,
            include_header: true,
        }
    }
}

fn default_api_base_url() -> String {
    "https://bigquery.googleapis.com/bigquery/v2".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_page_size() -> u32 {
    1000
}

fn default_access_token_command() -> Vec<String> {
    vec![
        "gcloud".to_string(),
        "auth".to_string(),
        "print-access-token".to_string(),
    ]
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        // An empty file deserializes to `null`; treat it as all defaults.
        let config: Config = if content.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(&content)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a directory, falling back to defaults when
    /// neither bqv.yml nor bqv.yaml exists.
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        for name in CONFIG_FILE_NAMES {
            let path = dir.join(name);
            if path.exists() {
                log::debug!("Loading config from {}", path.display());
                return Self::load(&path);
            }
        }
        Ok(Self::default())
    }

    /// Validate the configuration
    fn validate(&self) -> CoreResult<()> {
        if self.api_base_url.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "api_base_url cannot be empty".to_string(),
            });
        }
        if self.timeout_secs == 0 {
            return Err(CoreError::ConfigInvalid {
                message: "timeout_secs must be greater than zero".to_string(),
            });
        }
        if self.page_size == 0 {
            return Err(CoreError::ConfigInvalid {
                message: "page_size must be greater than zero".to_string(),
            });
        }
        if self.access_token_command.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "access_token_command must name a program".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
