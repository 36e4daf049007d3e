use crate::TaskError;
use async_trait::async_trait;
use inbox_core::{ApiEndpoint, TaskStatus, UserId};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Task record as the backend sends it. Either `id` or `_id` may carry the
/// identifier and every other field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawTask {
    pub id: Option<String>,
    #[serde(rename = "_id")]
    pub mongo_id: Option<String>,
    pub user_id: Option<String>,
    pub sender: Option<String>,
    pub subject: Option<String>,
    pub summary: Option<String>,
    pub context: Option<String>,
    pub actions: Option<Vec<String>>,
    pub status: Option<String>,
    pub action_taken: Option<String>,
    pub email: Option<RawEmail>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawEmail {
    pub id: Option<String>,
    #[serde(rename = "_id")]
    pub mongo_id: Option<String>,
    pub subject: Option<String>,
    pub sender: Option<String>,
    pub body: Option<String>,
    pub recipient: Option<String>,
    pub context: Option<String>,
    pub message_id: Option<String>,
    pub signature: Option<String>,
    pub user_id: Option<String>,
    pub is_spam: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskQuery {
    pub status: String,
    pub include_spam: bool,
}

impl Default for TaskQuery {
    fn default() -> Self {
        Self {
            status: "active".to_string(),
            include_spam: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskUpdate {
    pub status: TaskStatus,
    pub action_taken: String,
}

#[async_trait]
pub trait TaskApi: Send + Sync {
    async fn list_tasks(&self, user: &UserId, query: &TaskQuery)
        -> Result<Vec<RawTask>, TaskError>;

    async fn update_task(
        &self,
        user: &UserId,
        task_id: &str,
        update: &TaskUpdate,
    ) -> Result<(), TaskError>;
}

#[derive(Debug, Clone)]
pub struct HttpTaskApi {
    http: reqwest::Client,
    endpoint: ApiEndpoint,
}

impl HttpTaskApi {
    pub fn new(endpoint: ApiEndpoint, timeout: Duration) -> Result<Self, TaskError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(http, endpoint))
    }

    pub fn with_client(http: reqwest::Client, endpoint: ApiEndpoint) -> Self {
        Self { http, endpoint }
    }

    fn list_url(&self, user: &UserId, query: &TaskQuery) -> Result<Url, TaskError> {
        let spam = if query.include_spam { "true" } else { "false" };
        Ok(self.endpoint.url(
            "/api/v1/tasks/",
            &[
                ("status", query.status.as_str()),
                ("spam", spam),
                ("user_id", user.as_str()),
            ],
        )?)
    }

    fn task_url(&self, user: &UserId, task_id: &str) -> Result<Url, TaskError> {
        let mut url = self.endpoint.url("/api/v1/tasks", &[("user_id", user.as_str())])?;
        url.path_segments_mut()
            .map_err(|_| TaskError::Malformed("endpoint cannot be a base".to_string()))?
            .push(task_id);
        Ok(url)
    }
}

#[async_trait]
impl TaskApi for HttpTaskApi {
    async fn list_tasks(
        &self,
        user: &UserId,
        query: &TaskQuery,
    ) -> Result<Vec<RawTask>, TaskError> {
        let url = self.list_url(user, query)?;
        tracing::debug!(%url, "listing tasks");

        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            return Err(TaskError::Fetch {
                status: response.status().as_u16(),
            });
        }

        let payload = response.text().await?;
        parse_task_list(&payload)
    }

    async fn update_task(
        &self,
        user: &UserId,
        task_id: &str,
        update: &TaskUpdate,
    ) -> Result<(), TaskError> {
        let url = self.task_url(user, task_id)?;
        tracing::debug!(
            %url,
            status = %update.status,
            action = %update.action_taken,
            "updating task"
        );

        let response = self
            .http
            .patch(url)
            .header("Accept", "application/json")
            .json(update)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(TaskError::Update {
                status: response.status().as_u16(),
            });
        }

        Ok(())
    }
}

/// Parses a task listing; anything but a JSON array of records is rejected.
pub(crate) fn parse_task_list(payload: &str) -> Result<Vec<RawTask>, TaskError> {
    serde_json::from_str(payload).map_err(|err| TaskError::Malformed(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn api() -> HttpTaskApi {
        HttpTaskApi::with_client(
            reqwest::Client::new(),
            ApiEndpoint::new("http://localhost:8000"),
        )
    }

    #[test]
    fn builds_listing_url_with_filters() {
        let url = api()
            .list_url(
                &UserId::new("demo1"),
                &TaskQuery {
                    status: "active".to_string(),
                    include_spam: true,
                },
            )
            .expect("url built");
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/api/v1/tasks/?status=active&spam=true&user_id=demo1"
        );
    }

    #[test]
    fn escapes_task_id_in_update_url() {
        let url = api()
            .task_url(&UserId::default(), "abc/123")
            .expect("url built");
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/api/v1/tasks/abc%2F123?user_id=default"
        );
    }

    #[test]
    fn update_body_carries_status_and_action() {
        let body = serde_json::to_value(TaskUpdate {
            status: TaskStatus::Done,
            action_taken: "Archive".to_string(),
        })
        .expect("body serialized");
        assert_eq!(body, serde_json::json!({"status": "done", "action_taken": "Archive"}));
    }

    #[test]
    fn accepts_either_identifier_field() {
        let tasks = parse_task_list(r#"[{"_id":"t1"},{"id":"t2","status":"done"}]"#)
            .expect("listing parsed");
        assert_eq!(tasks[0].mongo_id.as_deref(), Some("t1"));
        assert_eq!(tasks[1].id.as_deref(), Some("t2"));
    }

    #[test]
    fn rejects_non_array_payloads() {
        assert!(matches!(
            parse_task_list(r#"{"data":[]}"#),
            Err(TaskError::Malformed(_))
        ));
        assert!(matches!(
            parse_task_list("<html>oops</html>"),
            Err(TaskError::Malformed(_))
        ));
    }

    /// Answers a single request on an ephemeral port with a canned response.
    async fn serve_once(status_line: &'static str, body: &'static str) -> HttpTaskApi {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral");
        let addr = listener.local_addr().expect("local addr");

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.expect("accept");
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            loop {
                let read = socket.read(&mut buf).await.expect("read request");
                request.extend_from_slice(&buf[..read]);
                if read == 0 || request_complete(&request) {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 {status_line}\r\n\
                 content-type: application/json\r\n\
                 content-length: {}\r\n\
                 connection: close\r\n\r\n{body}",
                body.len()
            );
            socket
                .write_all(response.as_bytes())
                .await
                .expect("write response");
            let _ = socket.shutdown().await;
        });

        HttpTaskApi::with_client(
            reqwest::Client::new(),
            ApiEndpoint::new(format!("http://{addr}")),
        )
    }

    fn request_complete(request: &[u8]) -> bool {
        let Some(end) = request.windows(4).position(|w| w == b"\r\n\r\n") else {
            return false;
        };
        let head = String::from_utf8_lossy(&request[..end]).to_ascii_lowercase();
        let body_len = head
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|value| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        request.len() >= end + 4 + body_len
    }

    #[tokio::test]
    async fn listing_error_status_maps_to_fetch_error() {
        let api = serve_once("503 Service Unavailable", r#"{"detail":"down"}"#).await;
        let err = api
            .list_tasks(&UserId::default(), &TaskQuery::default())
            .await
            .expect_err("listing rejected");
        assert!(matches!(err, TaskError::Fetch { status: 503 }));
        assert_eq!(err.to_string(), "Failed to fetch tasks (503)");
    }

    #[tokio::test]
    async fn listing_with_object_body_is_malformed() {
        let api = serve_once("200 OK", r#"{"tasks":[]}"#).await;
        let err = api
            .list_tasks(&UserId::default(), &TaskQuery::default())
            .await
            .expect_err("body rejected");
        assert!(matches!(err, TaskError::Malformed(_)));
    }

    #[tokio::test]
    async fn listing_success_returns_raw_records() {
        let api = serve_once("200 OK", r#"[{"_id":"t1","status":"pending"}]"#).await;
        let tasks = api
            .list_tasks(&UserId::new("demo1"), &TaskQuery::default())
            .await
            .expect("listing parsed");
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].mongo_id.as_deref(), Some("t1"));
    }

    #[tokio::test]
    async fn rejected_update_maps_to_update_error() {
        let api = serve_once("404 Not Found", r#"{"detail":"no such task"}"#).await;
        let update = TaskUpdate {
            status: TaskStatus::Done,
            action_taken: "Archive".to_string(),
        };
        let err = api
            .update_task(&UserId::default(), "t9", &update)
            .await
            .expect_err("update rejected");
        assert!(matches!(err, TaskError::Update { status: 404 }));
    }
}
