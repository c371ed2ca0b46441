//! Jira Cloud HTTP client.
//!
//! Wraps the one REST API v3 operation the importer needs: creating an
//! issue. Authentication is HTTP basic with the account email and an API
//! token. Every call is a single attempt bounded by the client timeout.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{IssuePayload, JiraConfig};
use crate::domain::ports::IssueTracker;
use crate::infrastructure::logging::SecretScrubber;

use super::models::JiraCreatedIssue;

/// Path of the create-issue endpoint, relative to the site URL.
pub const CREATE_ISSUE_PATH: &str = "/rest/api/3/issue";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// HTTP client for the Jira Cloud REST API v3.
///
/// All methods return [`DomainResult`]; non-2xx answers become
/// [`DomainError::RequestFailed`] carrying the status and raw body.
#[derive(Clone)]
pub struct JiraClient {
    /// The underlying HTTP client.
    http: Client,
    /// Site URL without a trailing slash.
    base_url: String,
    /// Account email for basic auth.
    email: String,
    /// API token for basic auth.
    api_token: String,
    scrubber: SecretScrubber,
}

impl JiraClient {
    /// Create a client with the default 60 second timeout.
    pub fn new(
        base_url: impl Into<String>,
        email: impl Into<String>,
        api_token: impl Into<String>,
    ) -> DomainResult<Self> {
        Self::with_timeout(base_url, email, api_token, DEFAULT_TIMEOUT)
    }

    /// Create a client with an explicit request timeout.
    pub fn with_timeout(
        base_url: impl Into<String>,
        email: impl Into<String>,
        api_token: impl Into<String>,
        timeout: Duration,
    ) -> DomainResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("jira-csv-import/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DomainError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            email: email.into(),
            api_token: api_token.into(),
            scrubber: SecretScrubber::new(),
        })
    }

    /// Create a client from the loaded configuration.
    pub fn from_config(config: &JiraConfig) -> DomainResult<Self> {
        Self::with_timeout(
            config.base_url.trim(),
            config.email.trim(),
            config.api_token.trim(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of the create-issue endpoint.
    pub fn create_issue_url(&self) -> String {
        format!("{}{}", self.base_url, CREATE_ISSUE_PATH)
    }

    /// POST a create-issue request and return the new issue's key.
    pub async fn post_issue(&self, payload: &IssuePayload) -> DomainResult<String> {
        let url = self.create_issue_url();
        debug!(url = %url, "POST create issue");

        let resp = self
            .http
            .post(&url)
            .basic_auth(&self.email, Some(&self.api_token))
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| DomainError::Transport(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| DomainError::Transport(format!("failed to read response body: {e}")))?;

        if !status.is_success() {
            warn!(
                status = status.as_u16(),
                body = %self.scrubber.scrub_message(&body),
                "Jira create_issue rejected"
            );
            return Err(DomainError::RequestFailed {
                status: status.as_u16(),
                body,
            });
        }

        let created: JiraCreatedIssue =
            serde_json::from_str(&body).map_err(|e| DomainError::InvalidResponse {
                status: status.as_u16(),
                reason: e.to_string(),
            })?;

        Ok(created.key)
    }
}

impl fmt::Debug for JiraClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JiraClient")
            .field("base_url", &self.base_url)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl IssueTracker for JiraClient {
    async fn create_issue(&self, payload: &IssuePayload) -> DomainResult<String> {
        self.post_issue(payload).await
    }
}
