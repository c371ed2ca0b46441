pub mod batch_runner;
pub mod field_mapper;
pub mod issue_creator;

pub use batch_runner::{report_headers, BatchRunner, BatchSummary, RowOutcome};
pub use field_mapper::{parse_labels, FieldMapper};
pub use issue_creator::IssueCreator;
