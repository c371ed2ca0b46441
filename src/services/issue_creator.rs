//! Issue creation service.
//!
//! Combines the per-run [`IssueDefaults`] with the mapped row fields and
//! hands the resulting payload to an [`IssueTracker`].

use serde_json::{json, Map};
use tracing::{debug, instrument};

use crate::domain::errors::DomainResult;
use crate::domain::models::{IssueDefaults, IssuePayload, Row};
use crate::domain::ports::IssueTracker;

use super::field_mapper::FieldMapper;

/// Builds create-issue payloads and submits them.
pub struct IssueCreator<T: IssueTracker> {
    tracker: T,
    mapper: FieldMapper,
    defaults: IssueDefaults,
}

impl<T: IssueTracker> IssueCreator<T> {
    pub fn new(tracker: T, mapper: FieldMapper, defaults: IssueDefaults) -> Self {
        Self {
            tracker,
            mapper,
            defaults,
        }
    }

    pub fn tracker(&self) -> &T {
        &self.tracker
    }

    /// Build the full request body for `row`.
    ///
    /// Mapped fields are merged over `project`/`issuetype`; `assignee` and
    /// `parent` are applied last when configured.
    pub fn build_payload(&self, row: &Row) -> DomainResult<IssuePayload> {
        let mut fields = Map::new();
        fields.insert(
            "project".to_string(),
            json!({ "key": self.defaults.project_key }),
        );
        fields.insert(
            "issuetype".to_string(),
            json!({ "name": self.defaults.issue_type }),
        );

        fields.extend(self.mapper.map_row(row)?);

        if let Some(account_id) = &self.defaults.assignee_id {
            fields.insert("assignee".to_string(), json!({ "accountId": account_id }));
        }

        if let Some(parent_key) = &self.defaults.parent_key {
            fields.insert("parent".to_string(), json!({ "key": parent_key }));
        }

        Ok(IssuePayload::new(fields))
    }

    /// Create one issue for `row` and return its key.
    #[instrument(skip(self, row), fields(project = %self.defaults.project_key))]
    pub async fn create(&self, row: &Row) -> DomainResult<String> {
        let payload = self.build_payload(row)?;
        debug!(
            fields = payload.fields.len(),
            has_summary = payload.has_field("summary"),
            "submitting issue"
        );
        self.tracker.create_issue(&payload).await
    }
}

impl<T: IssueTracker> std::fmt::Debug for IssueCreator<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssueCreator")
            .field("mapper", &self.mapper)
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::DomainError;
    use crate::domain::models::FieldMap;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records every payload and answers from a fixed script.
    struct ScriptedTracker {
        seen: Mutex<Vec<IssuePayload>>,
        fail_with: Option<u16>,
    }

    impl ScriptedTracker {
        fn ok() -> Self {
            Self {
                seen: Mutex::new(vec![]),
                fail_with: None,
            }
        }
    }

    #[async_trait]
    impl IssueTracker for ScriptedTracker {
        async fn create_issue(&self, payload: &IssuePayload) -> DomainResult<String> {
            let mut seen = self.seen.lock().unwrap();
            seen.push(payload.clone());
            match self.fail_with {
                Some(status) => Err(DomainError::RequestFailed {
                    status,
                    body: "nope".to_string(),
                }),
                None => Ok(format!("PROJ-{}", seen.len())),
            }
        }
    }

    fn defaults() -> IssueDefaults {
        IssueDefaults {
            project_key: "PROJ".to_string(),
            issue_type: "Task".to_string(),
            parent_key: None,
            assignee_id: None,
        }
    }

    fn creator(defaults: IssueDefaults) -> IssueCreator<ScriptedTracker> {
        IssueCreator::new(
            ScriptedTracker::ok(),
            FieldMapper::new(FieldMap::default()),
            defaults,
        )
    }

    fn summary_row(summary: &str) -> Row {
        [("Summary", summary)].into_iter().collect()
    }

    #[test]
    fn test_required_fields_always_present() {
        let payload = creator(defaults()).build_payload(&Row::default()).unwrap();
        assert_eq!(payload.fields["project"], json!({ "key": "PROJ" }));
        assert_eq!(payload.fields["issuetype"], json!({ "name": "Task" }));
        assert!(!payload.has_field("assignee"));
        assert!(!payload.has_field("parent"));
        assert!(!payload.has_field("summary"));
    }

    #[test]
    fn test_assignee_and_parent_links() {
        let defaults = IssueDefaults {
            parent_key: Some("PROJ-1".to_string()),
            assignee_id: Some("abc123".to_string()),
            ..defaults()
        };
        let payload = creator(defaults).build_payload(&summary_row("x")).unwrap();
        assert_eq!(payload.fields["assignee"], json!({ "accountId": "abc123" }));
        assert_eq!(payload.fields["parent"], json!({ "key": "PROJ-1" }));
    }

    #[test]
    fn test_payload_serializes_under_fields() {
        let payload = creator(defaults()).build_payload(&summary_row("Fix bug")).unwrap();
        let body = serde_json::to_value(&payload).unwrap();
        assert_eq!(body["fields"]["summary"], json!("Fix bug"));
        assert_eq!(body["fields"]["project"]["key"], json!("PROJ"));
    }

    #[tokio::test]
    async fn test_create_returns_tracker_key() {
        let creator = creator(defaults());
        assert_eq!(creator.create(&summary_row("a")).await.unwrap(), "PROJ-1");
        assert_eq!(creator.create(&summary_row("b")).await.unwrap(), "PROJ-2");
        assert_eq!(creator.tracker().seen.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_create_propagates_tracker_error() {
        let creator = IssueCreator::new(
            ScriptedTracker {
                seen: Mutex::new(vec![]),
                fail_with: Some(400),
            },
            FieldMapper::new(FieldMap::default()),
            defaults(),
        );
        let err = creator.create(&summary_row("a")).await.unwrap_err();
        assert!(err.to_string().starts_with("400"));
    }
}
