//! Mock description service for testing
//!
//! Returns canned text without any network access. It can also simulate
//! service failures, either for every prompt or for prompts containing a
//! given substring, and records every prompt it receives.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sqlscribe_llm::{MockService, DescriptionService};
//!
//! let service = MockService::new()
//!     .with_reply("Generic description.")
//!     .with_reply_for("'out.total'", "Sum of order amounts.")
//!     .with_failure_for("'out.broken'");
//!
//! assert_eq!(service.generate("... 'out.total' ...")?, "Sum of order amounts.");
//! ```

use std::sync::Mutex;

use crate::adapter::{DescriptionService, GenerationError};

/// Mock text-generation service
pub struct MockService {
    /// Reply when no scripted reply matches
    default_reply: String,

    /// Replies chosen by prompt substring, first match wins
    replies: Vec<(String, String)>,

    /// Prompt substrings that trigger a failure
    failures: Vec<String>,

    /// Fail every request
    fail_all: bool,

    /// Prompts received, in order
    prompts: Mutex<Vec<String>>,
}

impl MockService {
    /// Create a mock that answers every prompt with a fixed description
    pub fn new() -> Self {
        Self {
            default_reply: "Mock column description.".to_string(),
            replies: Vec::new(),
            failures: Vec::new(),
            fail_all: false,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Set the reply used when no scripted reply matches
    pub fn with_reply(mut self, reply: impl Into<String>) -> Self {
        self.default_reply = reply.into();
        self
    }

    /// Reply with `reply` to prompts containing `needle`
    pub fn with_reply_for(mut self, needle: impl Into<String>, reply: impl Into<String>) -> Self {
        self.replies.push((needle.into(), reply.into()));
        self
    }

    /// Fail prompts containing `needle`
    pub fn with_failure_for(mut self, needle: impl Into<String>) -> Self {
        self.failures.push(needle.into());
        self
    }

    /// Fail every request, as an unreachable service would
    pub fn with_failure(mut self) -> Self {
        self.fail_all = true;
        self
    }

    /// Prompts received so far
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|prompts| prompts.clone())
            .unwrap_or_default()
    }

    /// Number of requests made so far
    pub fn request_count(&self) -> usize {
        self.prompts().len()
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

impl DescriptionService for MockService {
    fn name(&self) -> &'static str {
        "Mock"
    }

    fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        if self.fail_all || self.failures.iter().any(|needle| prompt.contains(needle.as_str())) {
            return Err(GenerationError::NetworkError(
                "Simulated connection failure".to_string(),
            ));
        }

        let reply = self
            .replies
            .iter()
            .find(|(needle, _)| prompt.contains(needle.as_str()))
            .map(|(_, reply)| reply.clone())
            .unwrap_or_else(|| self.default_reply.clone());

        Ok(reply)
    }
}
