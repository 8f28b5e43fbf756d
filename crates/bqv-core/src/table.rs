//! Table and dataset references as reported by the warehouse.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A fully qualified table: `project.dataset.table`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRef {
    pub project_id: String,
    pub dataset_id: String,
    pub table_id: String,
}

impl TableRef {
    pub fn new(
        project_id: impl Into<String>,
        dataset_id: impl Into<String>,
        table_id: impl Into<String>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            dataset_id: dataset_id.into(),
            table_id: table_id.into(),
        }
    }

    /// Whether the table lives in a system-managed dataset (name prefixed `_`)
    /// holding temporary results, e.g. the anonymous datasets of script jobs.
    pub fn is_transient(&self) -> bool {
        self.dataset_id.starts_with('_')
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.project_id, self.dataset_id, self.table_id)
    }
}

/// The dataset that unqualified table names in a query resolve against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultDataset {
    pub project_id: String,
    pub dataset_id: String,
}

impl DefaultDataset {
    pub fn new(project_id: impl Into<String>, dataset_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            dataset_id: dataset_id.into(),
        }
    }
}

impl fmt::Display for DefaultDataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.project_id, self.dataset_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_dataset() {
        assert!(TableRef::new("p", "_script7f3a", "anon").is_transient());
        assert!(!TableRef::new("p", "sales", "orders").is_transient());
        assert!(!TableRef::new("p", "sales_", "orders").is_transient());
    }

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{"projectId":"proj","datasetId":"sales","tableId":"orders"}"#;
        let table: TableRef = serde_json::from_str(json).unwrap();
        assert_eq!(table, TableRef::new("proj", "sales", "orders"));
        assert_eq!(table.to_string(), "proj.sales.orders");
    }

    #[test]
    fn test_default_dataset_display() {
        assert_eq!(DefaultDataset::new("proj", "sales").to_string(), "proj.sales");
    }
}
