use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::IssuePayload;

/// Port for systems that can create issues.
///
/// Implementations perform exactly one attempt per call; the batch
/// runner decides what to do with a failure.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Create an issue and return its key (e.g. `PROJ-123`).
    async fn create_issue(&self, payload: &IssuePayload) -> DomainResult<String>;
}
