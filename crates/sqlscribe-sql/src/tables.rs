//! Target and source table detection
//!
//! Purely textual: `CREATE TABLE <name>` names the target, every
//! `FROM <name>` names a source.

use regex::Regex;
use sqlscribe_core::TableInfo;

const CREATE_TABLE_PATTERN: &str = r"(?i)CREATE TABLE\s+(\w+)";
const FROM_PATTERN: &str = r"(?i)FROM\s+(\w+)";

/// Extracts target and source tables from SQL text
pub struct TableExtractor;

impl TableExtractor {
    /// Extract table info from a query
    pub fn extract(sql: &str) -> Result<TableInfo, regex::Error> {
        let target = Self::target_table(sql)?;
        let sources = Self::source_tables(sql)?;

        tracing::debug!(target_table = ?target, source_tables = ?sources, "Detected tables");

        Ok(TableInfo::new(target, sources))
    }

    /// Identifier of the first `CREATE TABLE`
    pub fn target_table(sql: &str) -> Result<Option<String>, regex::Error> {
        let create_re = Regex::new(CREATE_TABLE_PATTERN)?;

        Ok(create_re
            .captures(sql)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string()))
    }

    /// Identifiers following every `FROM`, in order, duplicates kept
    pub fn source_tables(sql: &str) -> Result<Vec<String>, regex::Error> {
        let from_re = Regex::new(FROM_PATTERN)?;

        Ok(from_re
            .captures_iter(sql)
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .collect())
    }
}
