use async_trait::async_trait;
use base64::prelude::{BASE64_STANDARD, Engine as _};
use reqwest::{
    Client,
    header::{ACCEPT, AUTHORIZATION},
};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::domain::card::JiraCard;
use crate::domain::filter::CardQuery;
use crate::domain::jql::build_jql;
use crate::domain::teams::CardScheme;
use crate::error::{AppError, AppResult};
use crate::services::IssueTrackerService;

const MAX_RESULTS: &str = "50";
const SEARCH_FIELDS: &str = "summary,status,priority,assignee,project,issuetype,created,description";

pub struct JiraClient {
    http: Client,
    base_url: String,
    email: Option<String>,
    token: Option<String>,
    scheme: CardScheme,
}

impl JiraClient {
    pub fn new(
        base_url: String,
        email: Option<String>,
        token: Option<String>,
        scheme: CardScheme,
    ) -> Self {
        Self {
            http: Client::new(),
            base_url,
            email,
            token,
            scheme,
        }
    }

    #[cfg(test)]
    fn with_http(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    fn credentials(&self) -> AppResult<(&str, &str)> {
        let email = self
            .email
            .as_deref()
            .ok_or_else(|| AppError::Configuration("Jira email not configured".to_string()))?;
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| AppError::Configuration("Jira API token not configured".to_string()))?;
        Ok((email, token))
    }

    fn auth_header(email: &str, token: &str) -> String {
        let credentials = format!("{email}:{token}");
        let encoded = BASE64_STANDARD.encode(credentials);
        format!("Basic {encoded}")
    }

    fn search_endpoint(base_url: &str) -> String {
        format!("{}/rest/api/3/search", base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl IssueTrackerService for JiraClient {
    async fn search_cards(&self, query: &CardQuery) -> AppResult<Vec<JiraCard>> {
        let (email, token) = self.credentials()?;
        let jql = build_jql(self.scheme, query);
        debug!(%jql, "searching Jira");

        let response = self
            .http
            .get(Self::search_endpoint(&self.base_url))
            .query(&[
                ("jql", jql.as_str()),
                ("maxResults", MAX_RESULTS),
                ("fields", SEARCH_FIELDS),
            ])
            .header(AUTHORIZATION, Self::auth_header(email, token))
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|err| AppError::JiraUnavailable(format!("failed to call Jira: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::JiraUnavailable(format!(
                "Jira responded with {status}: {body}"
            )));
        }

        let payload: JiraSearchResponse = response.json().await.map_err(|err| {
            AppError::JiraUnavailable(format!("failed to parse Jira response: {err}"))
        })?;

        Ok(payload
            .issues
            .into_iter()
            .map(|issue| issue.into_card(self.scheme))
            .collect())
    }

    fn is_configured(&self) -> bool {
        self.credentials().is_ok()
    }
}

#[derive(Deserialize)]
struct JiraSearchResponse {
    #[serde(default)]
    issues: Vec<JiraIssue>,
}

#[derive(Deserialize)]
struct JiraIssue {
    key: String,
    #[serde(default)]
    fields: JiraIssueFields,
}

#[derive(Deserialize, Default)]
struct JiraIssueFields {
    #[serde(default)]
    summary: String,
    status: Option<JiraNamed>,
    priority: Option<JiraNamed>,
    assignee: Option<JiraUser>,
    project: Option<JiraProject>,
    issuetype: Option<JiraNamed>,
    created: Option<String>,
    description: Option<Value>,
}

#[derive(Deserialize)]
struct JiraNamed {
    #[serde(default)]
    name: String,
}

#[derive(Deserialize)]
struct JiraUser {
    #[serde(rename = "displayName")]
    display_name: Option<String>,
}

#[derive(Deserialize)]
struct JiraProject {
    key: String,
}

impl JiraIssue {
    fn into_card(self, scheme: CardScheme) -> JiraCard {
        let fields = self.fields;
        let project = fields
            .project
            .map(|project| project.key)
            .filter(|key| !key.trim().is_empty())
            .unwrap_or_else(|| key_prefix(&self.key));
        let team = scheme.team_for_project(&project).to_string();
        let description = description_text(fields.description.as_ref());

        JiraCard {
            key: self.key,
            summary: fields.summary,
            status: named_or(fields.status, "Unknown"),
            priority: named_or(fields.priority, "Medium"),
            assignee: fields
                .assignee
                .and_then(|user| user.display_name)
                .filter(|name| !name.trim().is_empty()),
            project,
            issue_type: named_or(fields.issuetype, "Task"),
            created: fields.created.unwrap_or_default(),
            team,
            description: (!description.is_empty()).then_some(description),
        }
    }
}

fn named_or(value: Option<JiraNamed>, fallback: &str) -> String {
    value
        .map(|named| named.name)
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

fn key_prefix(key: &str) -> String {
    key.split_once('-')
        .map(|(prefix, _)| prefix)
        .unwrap_or(key)
        .to_string()
}

/// Flattens an Atlassian Document Format tree into newline-separated text.
fn description_text(value: Option<&Value>) -> String {
    fn collect(value: &Value, output: &mut Vec<String>) {
        match value {
            Value::String(text) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    output.push(trimmed.to_string());
                }
            }
            Value::Array(items) => {
                for item in items {
                    collect(item, output);
                }
            }
            Value::Object(map) => {
                if let Some(text) = map.get("text").and_then(Value::as_str) {
                    let trimmed = text.trim();
                    if !trimmed.is_empty() {
                        output.push(trimmed.to_string());
                    }
                }
                if let Some(content) = map.get("content") {
                    collect(content, output);
                }
            }
            _ => {}
        }
    }

    let Some(value) = value else {
        return String::new();
    };

    let mut chunks = Vec::new();
    collect(value, &mut chunks);
    chunks.join("\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;
    use crate::domain::filter::{StatusFilter, TeamFilter};
    use crate::domain::teams::UNKNOWN_TEAM;

    fn issue(value: Value) -> JiraIssue {
        serde_json::from_value(value).unwrap()
    }

    fn loopback_http() -> Client {
        Client::builder().no_proxy().build().unwrap()
    }

    /// Answers a single HTTP request with `response` and hands back what was received.
    async fn one_shot_server(response: String) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 8192];
            let read = socket.read(&mut buf).await.unwrap();
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&buf[..read]).to_string()
        });
        (format!("http://{addr}"), handle)
    }

    #[test]
    fn encodes_basic_auth_header() {
        assert_eq!(
            JiraClient::auth_header("dev@example.com", "secret"),
            "Basic ZGV2QGV4YW1wbGUuY29tOnNlY3JldA=="
        );
    }

    #[test]
    fn maps_issue_fields_into_card() {
        let card = issue(json!({
            "key": "APPS-7",
            "fields": {
                "summary": "Offline mode for drafts",
                "status": {"name": "Ready for Dev"},
                "priority": {"name": "High"},
                "assignee": {"displayName": "Sam Ortiz"},
                "project": {"key": "APPS"},
                "issuetype": {"name": "Story"},
                "created": "2024-06-02T08:00:00.000+0000",
                "description": {
                    "type": "doc",
                    "content": [
                        {"type": "paragraph", "content": [{"type": "text", "text": "Cache drafts locally."}]},
                        {"type": "paragraph", "content": [{"type": "text", "text": "Sync on reconnect."}]}
                    ]
                }
            }
        }))
        .into_card(CardScheme::Portfolio);

        assert_eq!(card.key, "APPS-7");
        assert_eq!(card.team, "apps");
        assert_eq!(card.assignee.as_deref(), Some("Sam Ortiz"));
        assert_eq!(card.issue_type, "Story");
        assert_eq!(
            card.description.as_deref(),
            Some("Cache drafts locally.\nSync on reconnect.")
        );
    }

    #[test]
    fn sparse_issue_gets_defaults_and_unknown_team() {
        let card = issue(json!({"key": "ZZZ-1", "fields": {"summary": "Orphan"}}))
            .into_card(CardScheme::Portfolio);

        assert_eq!(card.project, "ZZZ");
        assert_eq!(card.team, UNKNOWN_TEAM);
        assert_eq!(card.status, "Unknown");
        assert_eq!(card.priority, "Medium");
        assert_eq!(card.issue_type, "Task");
        assert!(card.assignee.is_none());
        assert!(card.description.is_none());
    }

    #[tokio::test]
    async fn unconfigured_client_does_not_search() {
        let client = JiraClient::new(
            "http://127.0.0.1:9".to_string(),
            Some("dev@example.com".to_string()),
            None,
            CardScheme::Portfolio,
        );
        assert!(!client.is_configured());
        let err = client.search_cards(&CardQuery::default()).await.unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[tokio::test]
    async fn searches_with_basic_auth_and_jql() {
        let body = r#"{"issues":[{"key":"ODCD-5","fields":{"summary":"Fix login","project":{"key":"ODCD"}}}]}"#;
        let (base_url, server) = one_shot_server(format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        ))
        .await;
        let client = JiraClient::new(
            base_url,
            Some("dev@example.com".to_string()),
            Some("secret".to_string()),
            CardScheme::Portfolio,
        )
        .with_http(loopback_http());

        let query = CardQuery {
            team: TeamFilter::Team("odyssey".into()),
            status: StatusFilter::ReadyForDev,
        };
        let cards = client.search_cards(&query).await.unwrap();
        let request = server.await.unwrap();

        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].team, "odyssey");
        assert!(request.starts_with("GET /rest/api/3/search?jql="));
        assert!(request.contains("maxResults=50"));
        let expected_auth = format!(
            "authorization: {}",
            JiraClient::auth_header("dev@example.com", "secret")
        );
        assert!(request.to_lowercase().contains(&expected_auth.to_lowercase()));
    }

    #[tokio::test]
    async fn non_success_status_is_jira_unavailable() {
        let (base_url, server) = one_shot_server(
            "HTTP/1.1 500 Internal Server Error\r\nContent-Length: 4\r\nConnection: close\r\n\r\noops"
                .to_string(),
        )
        .await;
        let client = JiraClient::new(
            base_url,
            Some("dev@example.com".to_string()),
            Some("secret".to_string()),
            CardScheme::Portfolio,
        )
        .with_http(loopback_http());

        let err = client.search_cards(&CardQuery::default()).await.unwrap_err();
        server.await.unwrap();
        assert!(matches!(err, AppError::JiraUnavailable(message) if message.contains("500")));
    }
}
