//! Job locator parsing.
//!
//! A job is addressed by project, location, and job id. Two textual forms are
//! accepted: `project.location.job_id` (as shown in the console) and
//! `project:location.job_id` (as printed by the `bq` tool).

use crate::error::{CoreError, CoreResult};
use std::fmt;
use std::str::FromStr;

/// Identifies a single executed job.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobLocator {
    pub project_id: String,
    pub location: String,
    pub job_id: String,
}

impl JobLocator {
    pub fn new(
        project_id: impl Into<String>,
        location: impl Into<String>,
        job_id: impl Into<String>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            location: location.into(),
            job_id: job_id.into(),
        }
    }

    /// Parse free-form user input into a locator.
    ///
    /// Surrounding whitespace is ignored. Blank input is `EmptyInput`; any
    /// shape other than the two accepted forms, or an empty segment, is
    /// `InvalidJobLocator`.
    pub fn parse(input: &str) -> CoreResult<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(CoreError::EmptyInput);
        }

        let invalid = || CoreError::InvalidJobLocator {
            input: input.to_string(),
        };

        let elements: Vec<&str> = input.split('.').collect();
        let (project_id, location, job_id) = match elements.as_slice() {
            [project_and_location, job_id] => {
                let pair: Vec<&str> = project_and_location.split(':').collect();
                match pair.as_slice() {
                    [project_id, location] => (*project_id, *location, *job_id),
                    _ => return Err(invalid()),
                }
            }
            [project_id, location, job_id] => (*project_id, *location, *job_id),
            _ => return Err(invalid()),
        };

        if project_id.is_empty() || location.is_empty() || job_id.is_empty() {
            return Err(invalid());
        }

        Ok(Self::new(project_id, location, job_id))
    }
}

impl FromStr for JobLocator {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for JobLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}.{}", self.project_id, self.location, self.job_id)
    }
}

#[cfg(test)]
#[path = "locator_test.rs"]
mod tests;
