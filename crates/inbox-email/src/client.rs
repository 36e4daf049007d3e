use crate::EmailError;
use inbox_core::{ApiEndpoint, SpamEmail, UserId};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone, Serialize)]
pub struct NewEmail {
    pub subject: String,
    pub sender: String,
    pub body: String,
}

#[derive(Debug, Deserialize)]
struct RawSpamEmail {
    id: Option<String>,
    #[serde(rename = "_id")]
    mongo_id: Option<String>,
    sender: Option<String>,
    subject: Option<String>,
    user_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct EmailClient {
    http: reqwest::Client,
    endpoint: ApiEndpoint,
}

impl EmailClient {
    pub fn new(endpoint: ApiEndpoint, timeout: Duration) -> Result<Self, EmailError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, endpoint })
    }

    /// Emails the backend flagged as spam. Failures are logged and read as an
    /// empty list so the alert simply stays hidden.
    pub async fn list_spam(&self, user: &UserId) -> Vec<SpamEmail> {
        match self.try_list_spam(user).await {
            Ok(emails) => emails,
            Err(err) => {
                tracing::warn!(user = %user, "error fetching spam emails: {err}");
                Vec::new()
            }
        }
    }

    async fn try_list_spam(&self, user: &UserId) -> Result<Vec<SpamEmail>, EmailError> {
        let url = self
            .endpoint
            .url("/api/v1/email/spam", &[("user_id", user.as_str())])?;
        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            return Err(EmailError::Status {
                operation: "spam listing",
                status: response.status().as_u16(),
            });
        }

        let payload: serde_json::Value = response.json().await?;
        Ok(normalize_spam_list(payload, user))
    }

    pub async fn mark_not_spam(&self, user: &UserId, email_id: &str) -> Result<(), EmailError> {
        let url = self.email_action_url(user, email_id, "not-spam")?;
        self.patch(url, "Not spam update").await
    }

    pub async fn archive_spam(&self, user: &UserId, email_id: &str) -> Result<(), EmailError> {
        let url = self.email_action_url(user, email_id, "archive")?;
        self.patch(url, "Archive spam").await
    }

    /// Submits an email directly, bypassing the inbound webhook.
    pub async fn create_email(
        &self,
        user: &UserId,
        email: &NewEmail,
    ) -> Result<serde_json::Value, EmailError> {
        let url = self
            .endpoint
            .url("/api/v1/email", &[("user_id", user.as_str())])?;
        let response = self.http.post(url).json(email).send().await?;
        if !response.status().is_success() {
            return Err(EmailError::Status {
                operation: "Email creation",
                status: response.status().as_u16(),
            });
        }
        Ok(response.json().await?)
    }

    async fn patch(&self, url: Url, operation: &'static str) -> Result<(), EmailError> {
        tracing::debug!(%url, operation, "patching email");
        let response = self.http.patch(url).send().await?;
        if !response.status().is_success() {
            tracing::warn!(operation, status = %response.status(), "email update rejected");
            return Err(EmailError::Status {
                operation,
                status: response.status().as_u16(),
            });
        }
        Ok(())
    }

    fn email_action_url(
        &self,
        user: &UserId,
        email_id: &str,
        action: &str,
    ) -> Result<Url, EmailError> {
        let mut url = self
            .endpoint
            .url("/api/v1/email", &[("user_id", user.as_str())])?;
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(email_id).push(action);
        }
        Ok(url)
    }
}

/// Accepts whatever the spam endpoint returned; anything but an array is an
/// empty list and records without an identifier are skipped.
pub fn normalize_spam_list(payload: serde_json::Value, user: &UserId) -> Vec<SpamEmail> {
    let serde_json::Value::Array(items) = payload else {
        return Vec::new();
    };

    items
        .into_iter()
        .filter_map(|item| serde_json::from_value::<RawSpamEmail>(item).ok())
        .filter_map(|raw| {
            let id = raw
                .id
                .filter(|value| !value.is_empty())
                .or(raw.mongo_id.filter(|value| !value.is_empty()))?;
            Some(SpamEmail {
                id,
                sender: raw.sender,
                subject: raw.subject,
                user_id: raw.user_id.unwrap_or_else(|| user.to_string()),
            })
        })
        .collect()
}
