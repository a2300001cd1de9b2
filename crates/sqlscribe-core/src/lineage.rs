//! Table and column lineage extracted from a single query

use serde::{Deserialize, Serialize};

/// Placeholder target when neither CREATE TABLE nor FROM names a table
pub const UNKNOWN_TABLE: &str = "unknown_table";

/// Target and source tables of a query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableInfo {
    /// Table the query writes to (or the first source table)
    pub target_table: String,

    /// Every `FROM <table>` in order of appearance, duplicates kept
    pub source_tables: Vec<String>,
}

impl TableInfo {
    /// Build table info applying the target fallback policy
    ///
    /// Without an explicit target the first source table is reused; with no
    /// tables at all the target is [`UNKNOWN_TABLE`].
    pub fn new(target_table: Option<String>, source_tables: Vec<String>) -> Self {
        let target_table = target_table
            .or_else(|| source_tables.first().cloned())
            .unwrap_or_else(|| UNKNOWN_TABLE.to_string());

        Self {
            target_table,
            source_tables,
        }
    }

    /// First source table, used as the lineage source of every column
    pub fn primary_source(&self) -> Option<&str> {
        self.source_tables.first().map(String::as_str)
    }
}

/// One selected column and where it comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInfo {
    /// Target table the column belongs to
    pub table_name: String,

    /// Alias if present, otherwise the bare column name
    pub column_name: String,

    /// First source table of the query
    pub source_table: Option<String>,

    /// Expression the column is read from
    pub source_column: String,

    /// Full selected expression, trimmed
    pub full_definition: String,

    /// Whether the definition is anything other than the bare column name
    pub has_transformation: bool,
}

impl ColumnInfo {
    /// Create column info for a select item in the context of `tables`
    pub fn new(
        tables: &TableInfo,
        column_name: impl Into<String>,
        source_column: impl Into<String>,
        full_definition: impl Into<String>,
    ) -> Self {
        let column_name = column_name.into();
        let full_definition = full_definition.into().trim().to_string();
        let has_transformation = full_definition != column_name;

        Self {
            table_name: tables.target_table.clone(),
            column_name,
            source_table: tables.primary_source().map(str::to_string),
            source_column: source_column.into(),
            full_definition,
            has_transformation,
        }
    }

    /// Column name qualified with its table (`table.column`)
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.table_name, self.column_name)
    }
}
