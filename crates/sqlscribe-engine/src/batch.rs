//! Per-file processing
//!
//! Each file holds one query and produces one result line tagged with the
//! file name. A file that cannot be read only fails its own line.

use serde::Serialize;
use sqlscribe_core::{ProcessError, QueryResult};
use std::path::Path;

use crate::processor::QueryProcessor;

/// Result for one input file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileResult {
    pub file_name: String,

    #[serde(flatten)]
    pub result: QueryResult,
}

impl QueryProcessor {
    /// Read and process a SQL file
    pub fn process_file(&self, path: &Path) -> FileResult {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let result = match std::fs::read_to_string(path) {
            Ok(sql) => self.process(&sql),
            Err(e) => {
                tracing::warn!(file = %path.display(), "Failed to read SQL file: {}", e);
                QueryResult::error(ProcessError::from(e).to_string())
            }
        };

        FileResult { file_name, result }
    }

    /// Process several files in order
    pub fn process_files<P: AsRef<Path>>(&self, paths: &[P]) -> Vec<FileResult> {
        paths
            .iter()
            .map(|path| self.process_file(path.as_ref()))
            .collect()
    }
}
