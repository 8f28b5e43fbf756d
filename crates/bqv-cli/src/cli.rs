//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand};

/// bq-query-viewer - print the SQL an executed query job actually ran
#[derive(Parser, Debug)]
#[command(name = "bqv")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Override config file path (default: ./bqv.yml if present)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// OAuth access token (default: output of the configured token command)
    #[arg(long, global = true, env = "BQV_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// Override the warehouse REST API base URL
    #[arg(long, global = true, env = "BQV_API_BASE_URL")]
    pub api_base_url: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rebuild a job's SQL with parameters inlined and tables qualified
    Print(PrintArgs),
}

/// Arguments for the print command
#[derive(Args, Debug)]
pub struct PrintArgs {
    /// Job locator: PROJECT.LOCATION.JOB_ID or PROJECT:LOCATION.JOB_ID
    /// (prompted for on stdin when omitted)
    pub job: Option<String>,

    /// Write the document to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Open the written document with the default application
    #[arg(long)]
    pub open: bool,

    /// Leave bare table names as they are
    #[arg(long)]
    pub no_qualify: bool,

    /// Omit the job/dataset/parameter header comment
    #[arg(long)]
    pub no_header: bool,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
