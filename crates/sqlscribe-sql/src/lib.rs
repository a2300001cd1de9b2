//! SQL lineage extraction
//!
//! This crate handles:
//! - Tokenizing SQL using datafusion-sqlparser-rs
//! - Detecting target and source tables with regular expressions
//! - Walking the SELECT list into per-column lineage
//!
//! No semantic validation happens here: malformed SQL degrades to fewer
//! (or no) columns instead of an error.

pub mod parser;
pub mod tables;
pub mod columns;
pub mod lineage;

pub use parser::SqlTokenizer;
pub use tables::TableExtractor;
pub use columns::{ColumnExtractor, ColumnSection, SelectItem};
pub use lineage::{LineageExtractor, QueryLineage};
