//! Query result schema
//!
//! This is the serialized output of the tool, one value per query.

use serde::{Serialize, Serializer};
use crate::lineage::ColumnInfo;

/// Text emitted in place of a description the service could not produce
pub const FAILED_DESCRIPTION: &str = "Description generation failed.";

/// Outcome of one description request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescriptionOutcome {
    /// Text returned by the generation service
    Generated(String),

    /// The request failed; the reason is kept for logs only
    Failed(String),
}

impl DescriptionOutcome {
    /// Text written to the output for this outcome
    pub fn text(&self) -> &str {
        match self {
            Self::Generated(text) => text,
            Self::Failed(_) => FAILED_DESCRIPTION,
        }
    }

    /// Whether the service produced text
    pub fn is_generated(&self) -> bool {
        matches!(self, Self::Generated(_))
    }
}

impl Serialize for DescriptionOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.text())
    }
}

/// A column with its lineage and generated description
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnDescription {
    /// Qualified as `table.column`
    pub column_name: String,
    pub table_name: String,
    pub source_table: Option<String>,
    pub source_column: String,
    pub has_transformation: bool,
    pub description: DescriptionOutcome,
}

impl ColumnDescription {
    /// Merge extracted column info with its description outcome
    pub fn new(column: &ColumnInfo, description: DescriptionOutcome) -> Self {
        Self {
            column_name: column.qualified_name(),
            table_name: column.table_name.clone(),
            source_table: column.source_table.clone(),
            source_column: column.source_column.clone(),
            has_transformation: column.has_transformation,
            description,
        }
    }
}

/// Result of processing one query
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryResult {
    /// Processing aborted
    Error { error: String },

    /// Every extracted column, in SELECT-list order
    Success {
        sql_query: String,
        columns: Vec<ColumnDescription>,
    },
}

impl QueryResult {
    /// Error record with the given message
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            error: message.into(),
        }
    }

    /// Success record for the processed query
    pub fn success(sql_query: impl Into<String>, columns: Vec<ColumnDescription>) -> Self {
        Self::Success {
            sql_query: sql_query.into(),
            columns,
        }
    }

    /// Whether this is an error record
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// Error message, if this is an error record
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error { error } => Some(error),
            Self::Success { .. } => None,
        }
    }

    /// Described columns, empty for error records
    pub fn columns(&self) -> &[ColumnDescription] {
        match self {
            Self::Error { .. } => &[],
            Self::Success { columns, .. } => columns,
        }
    }

    /// Serialize to a single JSON line
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lineage::TableInfo;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn error_record_shape() {
        let result = QueryResult::error("Invalid or empty SQL query");
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value, json!({"error": "Invalid or empty SQL query"}));
    }

    #[test]
    fn success_record_shape() {
        let tables = TableInfo::new(Some("out".into()), vec!["src".into()]);
        let column = ColumnInfo::new(&tables, "y", "x+1", "x+1 AS y");
        let result = QueryResult::success(
            "CREATE TABLE out AS SELECT x+1 AS y FROM src",
            vec![ColumnDescription::new(&column, DescriptionOutcome::Generated("Adds one.".into()))],
        );

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            json!({
                "sql_query": "CREATE TABLE out AS SELECT x+1 AS y FROM src",
                "columns": [{
                    "column_name": "out.y",
                    "table_name": "out",
                    "source_table": "src",
                    "source_column": "x+1",
                    "has_transformation": true,
                    "description": "Adds one."
                }]
            })
        );
    }

    #[test]
    fn failed_outcome_serializes_as_sentinel() {
        let outcome = DescriptionOutcome::Failed("connection refused".into());
        assert!(!outcome.is_generated());
        assert_eq!(serde_json::to_value(&outcome).unwrap(), json!(FAILED_DESCRIPTION));
    }

    #[test]
    fn missing_source_is_null() {
        let tables = TableInfo::new(Some("out".into()), Vec::new());
        let column = ColumnInfo::new(&tables, "a", "a", "a");
        let described = ColumnDescription::new(&column, DescriptionOutcome::Generated("x".into()));
        let value = serde_json::to_value(&described).unwrap();
        assert!(value["source_table"].is_null());
    }

    #[test]
    fn json_is_one_line() {
        let result = QueryResult::error("multi\nline");
        assert!(!result.to_json().unwrap().contains('\n'));
    }
}
