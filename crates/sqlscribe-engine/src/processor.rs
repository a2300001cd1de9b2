//! Query processing
//!
//! Every failure that aborts a query ends up as an error record; failures of
//! individual description requests only replace that column's text.

use regex::Regex;
use sqlscribe_core::{ColumnDescription, ProcessError, QueryResult};
use sqlscribe_llm::{describe_column, DescriptionService};
use sqlscribe_sql::LineageExtractor;

const STATEMENT_KEYWORDS: &str = r"(?i)CREATE|INSERT|SELECT";

/// Cheap check that the text mentions CREATE, INSERT or SELECT
pub fn looks_like_sql(sql: &str) -> Result<bool, regex::Error> {
    Ok(!sql.is_empty() && Regex::new(STATEMENT_KEYWORDS)?.is_match(sql))
}

/// Turns SQL text into a described column list
pub struct QueryProcessor {
    service: Box<dyn DescriptionService>,
}

impl QueryProcessor {
    /// Create a processor backed by `service`
    pub fn new(service: Box<dyn DescriptionService>) -> Self {
        Self { service }
    }

    /// Description service in use
    pub fn service(&self) -> &dyn DescriptionService {
        self.service.as_ref()
    }

    /// Process a single query
    pub fn process(&self, sql: &str) -> QueryResult {
        self.try_process(sql).unwrap_or_else(|e| {
            tracing::debug!("Query rejected: {}", e);
            QueryResult::error(e.to_string())
        })
    }

    fn try_process(&self, sql: &str) -> Result<QueryResult, ProcessError> {
        let sql = sql.trim();
        if !looks_like_sql(sql)? {
            return Err(ProcessError::InvalidQuery);
        }

        let lineage = LineageExtractor::extract(sql)?;
        if lineage.is_empty() {
            return Err(ProcessError::NoColumns);
        }

        tracing::info!(
            target_table = %lineage.tables.target_table,
            columns = lineage.columns.len(),
            service = self.service.name(),
            "Generating column descriptions"
        );

        let columns = lineage
            .columns
            .iter()
            .map(|column| {
                let outcome = describe_column(self.service.as_ref(), column, sql);
                ColumnDescription::new(column, outcome)
            })
            .collect();

        Ok(QueryResult::success(sql, columns))
    }
}
