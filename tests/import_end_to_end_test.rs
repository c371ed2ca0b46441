//! End-to-end import: CSV file through the batch runner to a mock Jira.

use std::io::Write;

use jira_csv_import::domain::models::{Config, JiraConfig};
use jira_csv_import::{BatchRunner, CsvSource, FieldMapper, IssueCreator, JiraClient, RowOutcome};
use mockito::{Matcher, Server};
use serde_json::json;
use tempfile::NamedTempFile;

fn write_csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn config_for(base_url: &str) -> Config {
    Config {
        jira: JiraConfig {
            base_url: base_url.to_string(),
            email: "me@acme.test".to_string(),
            api_token: "token".to_string(),
            project_key: "PROJ".to_string(),
            ..Default::default()
        },
        ..Default::default()
    }
}

#[tokio::test]
async fn test_import_reports_each_row_and_continues_after_failure() {
    let mut server = Server::new_async().await;
    let created = server
        .mock("POST", "/rest/api/3/issue")
        .match_body(Matcher::PartialJson(json!({
            "fields": {
                "project": { "key": "PROJ" },
                "issuetype": { "name": "Task" },
                "summary": "Fix bug",
                "labels": ["a", "b"],
                "description": {
                    "type": "doc",
                    "version": 1,
                    "content": [
                        { "type": "paragraph", "content": [{ "type": "text", "text": "Line one" }] },
                        { "type": "paragraph", "content": [{ "type": "text", "text": "Line two" }] }
                    ]
                }
            }
        })))
        .with_status(201)
        .with_body(r#"{"id":"1","key":"PROJ-1","self":"x"}"#)
        .create_async()
        .await;
    let rejected = server
        .mock("POST", "/rest/api/3/issue")
        .match_body(Matcher::Regex(r#""labels":\[\]"#.to_string()))
        .with_status(400)
        .with_body(r#"{"errors":{"summary":"required"}}"#)
        .create_async()
        .await;

    let csv = write_csv("Summary,Labels,Description\nFix bug,\"a, b\",\"Line one\nLine two\"\n,,\n");
    let config = config_for(&server.url());

    let client = JiraClient::from_config(&config.jira).unwrap();
    let creator = IssueCreator::new(
        client,
        FieldMapper::new(config.field_rules()),
        config.issue_defaults(),
    );
    let runner = BatchRunner::new(creator);

    let mut source = CsvSource::open(csv.path()).unwrap();
    let mut out = Vec::new();
    let summary = runner.run(source.rows(), &mut out).await.unwrap();

    let report = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(lines[0], "[1] Created PROJ-1");
    assert!(lines[1].starts_with("[2] ERROR 400"));
    assert_eq!(lines[2], "");
    assert_eq!(lines[3], "Done. Created 1 issues.");

    assert_eq!(summary.created, 1);
    assert_eq!(summary.failed, 1);
    assert!(matches!(summary.rows[0], RowOutcome::Created { row: 1, .. }));

    created.assert_async().await;
    rejected.assert_async().await;
}

#[tokio::test]
async fn test_epic_and_assignee_are_attached() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/rest/api/3/issue")
        .match_body(Matcher::PartialJson(json!({
            "fields": {
                "parent": { "key": "PROJ-100" },
                "assignee": { "accountId": "abc-123" }
            }
        })))
        .with_status(201)
        .with_body(r#"{"key":"PROJ-2"}"#)
        .create_async()
        .await;

    let csv = write_csv("Summary\nChild task\n");
    let mut config = config_for(&server.url());
    config.jira.epic_key = Some("PROJ-100".to_string());
    config.jira.assignee_account_id = Some("abc-123".to_string());

    let creator = IssueCreator::new(
        JiraClient::from_config(&config.jira).unwrap(),
        FieldMapper::new(config.field_rules()),
        config.issue_defaults(),
    );
    let mut source = CsvSource::open(csv.path()).unwrap();
    let mut out = Vec::new();
    let summary = BatchRunner::new(creator)
        .run(source.rows(), &mut out)
        .await
        .unwrap();

    assert_eq!(summary.created, 1);
    assert!(String::from_utf8(out).unwrap().starts_with("[1] Created PROJ-2\n"));
    mock.assert_async().await;
}
