//! sqlscribe Core
//!
//! Column lineage data model, error taxonomy and configuration shared by
//! every sqlscribe crate.
//! The serialized shape of `QueryResult` is the tool's only output contract.

pub mod lineage;
pub mod result;
pub mod error;
pub mod config;

pub use lineage::{TableInfo, ColumnInfo, UNKNOWN_TABLE};
pub use result::{ColumnDescription, DescriptionOutcome, QueryResult, FAILED_DESCRIPTION};
pub use error::ProcessError;
pub use config::{Config, ServiceConfig, ConfigError};
