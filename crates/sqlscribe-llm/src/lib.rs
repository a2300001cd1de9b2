//! Column description generation
//!
//! This module turns extracted column lineage into a prompt and sends it to
//! a text-generation service, one blocking request per column.
//!
//! ## Example
//!
//! ```rust,ignore
//! use sqlscribe_core::Config;
//! use sqlscribe_llm::{describe_column, HuggingFaceClient};
//!
//! let config = Config::default();
//! let client = HuggingFaceClient::from_config(&config.service, config.api_key())?;
//! let outcome = describe_column(&client, &column, sql);
//! ```

pub mod adapter;
pub mod prompt;
pub mod huggingface;
pub mod mock;

pub use adapter::{describe_column, DescriptionService, GenerationError};
pub use prompt::build_prompt;
pub use huggingface::HuggingFaceClient;
pub use mock::MockService;
