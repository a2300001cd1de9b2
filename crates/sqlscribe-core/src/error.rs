//! Errors that abort processing of a whole query
//!
//! The `Display` text of each variant is what ends up in the `error` field
//! of the output record.

/// Query processing error
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("Invalid or empty SQL query")]
    InvalidQuery,

    #[error("No columns found in query")]
    NoColumns,

    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ProcessError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_are_stable() {
        assert_eq!(ProcessError::InvalidQuery.to_string(), "Invalid or empty SQL query");
        assert_eq!(ProcessError::NoColumns.to_string(), "No columns found in query");
    }
}
