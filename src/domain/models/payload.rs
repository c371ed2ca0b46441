use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Request body for Jira's create-issue endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssuePayload {
    pub fields: Map<String, Value>,
}

impl IssuePayload {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }
}

/// Fixed per-run values applied to every issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueDefaults {
    pub project_key: String,
    pub issue_type: String,
    /// Epic or other parent issue key.
    pub parent_key: Option<String>,
    /// Atlassian account id of the assignee.
    pub assignee_id: Option<String>,
}
