//! Tracker that logs payloads instead of sending them.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tracing::info;

use crate::domain::errors::DomainResult;
use crate::domain::models::IssuePayload;
use crate::domain::ports::IssueTracker;

/// Accepts every payload and hands back a placeholder key
/// `<PROJECT>-DRYRUN-<n>`.
#[derive(Debug)]
pub struct DryRunTracker {
    project_key: String,
    issued: AtomicUsize,
}

impl DryRunTracker {
    pub fn new(project_key: impl Into<String>) -> Self {
        Self {
            project_key: project_key.into(),
            issued: AtomicUsize::new(0),
        }
    }

    pub fn issued(&self) -> usize {
        self.issued.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl IssueTracker for DryRunTracker {
    async fn create_issue(&self, payload: &IssuePayload) -> DomainResult<String> {
        let body = serde_json::to_string_pretty(payload)?;
        let n = self.issued.fetch_add(1, Ordering::Relaxed) + 1;
        info!(n, payload = %body, "dry run: issue not sent");
        Ok(format!("{}-DRYRUN-{n}", self.project_key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_placeholder_keys_count_up() {
        let tracker = DryRunTracker::new("PROJ");
        let payload = IssuePayload::default();
        assert_eq!(tracker.create_issue(&payload).await.unwrap(), "PROJ-DRYRUN-1");
        assert_eq!(tracker.create_issue(&payload).await.unwrap(), "PROJ-DRYRUN-2");
        assert_eq!(tracker.issued(), 2);
    }
}
