//! Port trait definitions (Hexagonal Architecture)
//!
//! - IssueTracker: creates issues in the external tracker

pub mod issue_tracker;

pub use issue_tracker::IssueTracker;
