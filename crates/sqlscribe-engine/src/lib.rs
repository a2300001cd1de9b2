//! sqlscribe Engine
//!
//! Runs one query through validation, lineage extraction and per-column
//! description requests, producing a `QueryResult`.

pub mod processor;
pub mod batch;

pub use processor::{QueryProcessor, looks_like_sql};
pub use batch::FileResult;
