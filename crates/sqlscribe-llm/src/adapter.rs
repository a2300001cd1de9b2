//! Description service trait

use sqlscribe_core::{ColumnInfo, DescriptionOutcome};

use crate::prompt::build_prompt;

/// Errors that can occur when requesting generated text
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("No API key configured")]
    MissingCredential,

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Service returned status {status}: {message}")]
    StatusError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Client error: {0}")]
    ClientError(String),
}

/// A text-generation backend
///
/// Every call is an independent request: no context or cache is shared
/// between prompts.
pub trait DescriptionService {
    /// Service name used in logs (e.g., "HuggingFace")
    fn name(&self) -> &'static str;

    /// Generate text for a prompt
    fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Describe one column, downgrading any failure to a failed outcome
pub fn describe_column(
    service: &dyn DescriptionService,
    column: &ColumnInfo,
    sql: &str,
) -> DescriptionOutcome {
    let prompt = build_prompt(column, sql);

    match service.generate(&prompt) {
        Ok(text) => DescriptionOutcome::Generated(text.trim().to_string()),
        Err(e) => {
            tracing::warn!(
                service = service.name(),
                column = %column.qualified_name(),
                "Description generation failed: {}",
                e
            );
            DescriptionOutcome::Failed(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockService;
    use sqlscribe_core::{TableInfo, FAILED_DESCRIPTION};

    fn column() -> ColumnInfo {
        let tables = TableInfo::new(None, vec!["t".into()]);
        ColumnInfo::new(&tables, "a", "a", "a")
    }

    #[test]
    fn generated_text_is_trimmed() {
        let service = MockService::new().with_reply("  The identifier.\n");
        let outcome = describe_column(&service, &column(), "SELECT a FROM t");
        assert_eq!(outcome, DescriptionOutcome::Generated("The identifier.".into()));
    }

    #[test]
    fn failure_becomes_failed_outcome() {
        let service = MockService::new().with_failure();
        let outcome = describe_column(&service, &column(), "SELECT a FROM t");
        assert!(!outcome.is_generated());
        assert_eq!(outcome.text(), FAILED_DESCRIPTION);
    }

    #[test]
    fn error_display() {
        let err = GenerationError::StatusError { status: 503, message: "loading".into() };
        assert_eq!(err.to_string(), "Service returned status 503: loading");
    }
}
