//! Domain models for the importer.

pub mod config;
pub mod document;
pub mod field_map;
pub mod payload;
pub mod row;

pub use config::{Config, JiraConfig, LoggingConfig};
pub use document::{Block, Document, DocumentKind, Inline};
pub use field_map::{FieldMap, FieldMapEntry, FieldMapping, FieldRule};
pub use payload::{IssueDefaults, IssuePayload};
pub use row::Row;
