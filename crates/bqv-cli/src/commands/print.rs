//! Print command implementation

use anyhow::{Context, Result};
use bqv_core::CoreError;
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::cli::{GlobalArgs, PrintArgs};
use crate::commands::common::{build_warehouse, load_config};
use crate::reconstruct::{build_annotated_query, ReconstructOptions};

const PROMPT: &str =
    "Job ID (e.g. 'your-project-id.asia-northeast1.job_MguwKgVHkZxlZs0CZxP7icPLJrkB'): ";

/// Execute the print command
pub(crate) async fn execute(args: &PrintArgs, global: &GlobalArgs) -> Result<()> {
    let input = match &args.job {
        Some(job) => job.clone(),
        None => prompt_for_job().await?,
    };

    let config = load_config(global)?;
    let warehouse = build_warehouse(global, &config)?;

    let mut options = ReconstructOptions::from(&config);
    options.qualify_tables &= !args.no_qualify;
    options.include_header &= !args.no_header;

    let annotated = build_annotated_query(&warehouse, &input, &options).await?;

    for skipped in &annotated.skipped {
        eprintln!(
            "warning: @{} left unsubstituted: {}",
            skipped.name, skipped.reason
        );
    }

    let target = match (&args.output, args.open) {
        (Some(path), _) => Some(PathBuf::from(path)),
        (None, true) => Some(std::env::temp_dir().join(format!("{}.sql", annotated.locator.job_id))),
        (None, false) => None,
    };

    let Some(path) = target else {
        println!("{}", annotated.document);
        return Ok(());
    };

    std::fs::write(&path, format!("{}\n", annotated.document))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    eprintln!("Wrote {}", path.display());

    if args.open {
        open::that(&path).with_context(|| format!("Failed to open {}", path.display()))?;
    }

    Ok(())
}

/// Ask for a job locator on stdin. End of input or a blank line means the
/// prompt was abandoned.
async fn prompt_for_job() -> Result<String> {
    eprint!("{PROMPT}");
    std::io::stderr().flush()?;

    let mut line = String::new();
    let read = BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await
        .context("Failed to read job ID from stdin")?;

    if read == 0 || line.trim().is_empty() {
        return Err(CoreError::EmptyInput.into());
    }
    Ok(line)
}
