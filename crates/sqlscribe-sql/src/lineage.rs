//! Table and column lineage of one query

use sqlscribe_core::{ColumnInfo, ProcessError, TableInfo};

use crate::columns::ColumnExtractor;
use crate::tables::TableExtractor;

/// Everything extracted from a query before descriptions are requested
#[derive(Debug, Clone, PartialEq)]
pub struct QueryLineage {
    pub tables: TableInfo,
    pub columns: Vec<ColumnInfo>,
}

impl QueryLineage {
    /// Whether no columns were extracted
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Chains table detection and the SELECT-list walk
pub struct LineageExtractor;

impl LineageExtractor {
    /// Extract lineage from a query
    ///
    /// Malformed SQL yields an empty column list, not an error.
    pub fn extract(sql: &str) -> Result<QueryLineage, ProcessError> {
        let tables = TableExtractor::extract(sql)?;
        let columns = ColumnExtractor::extract(sql, &tables);

        tracing::debug!(
            target_table = %tables.target_table,
            columns = columns.len(),
            "Extracted lineage"
        );

        Ok(QueryLineage { tables, columns })
    }
}
