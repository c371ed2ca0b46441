//! Jira REST API v3 response models.
//!
//! Only the parts of the payloads the importer reads are modelled.

use serde::{Deserialize, Serialize};

/// Response from the create-issue endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JiraCreatedIssue {
    /// Numeric issue id, as a string.
    #[serde(default)]
    pub id: Option<String>,
    /// Issue key (e.g., "PROJ-123").
    pub key: String,
    /// REST URL of the created issue.
    #[serde(rename = "self", default)]
    pub self_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_issue_deserialization() {
        let json = r#"{
            "id": "10000",
            "key": "PROJ-24",
            "self": "https://acme.atlassian.net/rest/api/3/issue/10000"
        }"#;
        let created: JiraCreatedIssue = serde_json::from_str(json).unwrap();
        assert_eq!(created.key, "PROJ-24");
        assert_eq!(created.id.as_deref(), Some("10000"));
        assert!(created.self_url.unwrap().ends_with("/issue/10000"));
    }

    #[test]
    fn test_created_issue_key_only() {
        let created: JiraCreatedIssue = serde_json::from_str(r#"{"key":"PROJ-1"}"#).unwrap();
        assert_eq!(created.key, "PROJ-1");
        assert!(created.id.is_none());
    }

    #[test]
    fn test_missing_key_is_an_error() {
        let result = serde_json::from_str::<JiraCreatedIssue>(r#"{"id":"1"}"#);
        assert!(result.is_err());
    }
}
