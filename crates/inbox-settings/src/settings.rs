use crate::SettingsError;
use inbox_core::{ApiEndpoint, UserId, UserSettings};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const UPDATE_FAILED: &str = "Failed to update user settings";

/// Partial settings update; only the fields that are set are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_spam_filtering: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_auto_categorization: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_low_priority_emails: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingToggle {
    SpamFiltering,
    AutoCategorization,
    SkipLowPriority,
}

impl SettingToggle {
    pub const ALL: [Self; 3] = [
        Self::SpamFiltering,
        Self::AutoCategorization,
        Self::SkipLowPriority,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::SpamFiltering => "enable_spam_filtering",
            Self::AutoCategorization => "enable_auto_categorization",
            Self::SkipLowPriority => "skip_low_priority_emails",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::SpamFiltering => "Spam Filtering",
            Self::AutoCategorization => "Auto-categorization",
            Self::SkipLowPriority => "Skip Low-Priority Emails",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::SpamFiltering => "Automatically filter out spam emails",
            Self::AutoCategorization => "Automatically sort emails into categories",
            Self::SkipLowPriority => "Don't notify for emails marked as low priority",
        }
    }

    /// Accepts the wire key or a short alias such as `spam`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "enable_spam_filtering" | "spam" | "spam_filtering" => Some(Self::SpamFiltering),
            "enable_auto_categorization" | "categorization" | "auto_categorization" => {
                Some(Self::AutoCategorization)
            }
            "skip_low_priority_emails" | "low_priority" | "skip_low_priority" => {
                Some(Self::SkipLowPriority)
            }
            _ => None,
        }
    }

    pub fn current(self, settings: &UserSettings) -> bool {
        match self {
            Self::SpamFiltering => settings.enable_spam_filtering,
            Self::AutoCategorization => settings.enable_auto_categorization,
            Self::SkipLowPriority => settings.skip_low_priority_emails,
        }
    }

    /// The update that flips this toggle relative to `settings`.
    pub fn flip(self, settings: &UserSettings) -> SettingsUpdate {
        let next = Some(!self.current(settings));
        match self {
            Self::SpamFiltering => SettingsUpdate {
                enable_spam_filtering: next,
                ..SettingsUpdate::default()
            },
            Self::AutoCategorization => SettingsUpdate {
                enable_auto_categorization: next,
                ..SettingsUpdate::default()
            },
            Self::SkipLowPriority => SettingsUpdate {
                skip_low_priority_emails: next,
                ..SettingsUpdate::default()
            },
        }
    }
}

pub fn mailbox_address_line(settings: &UserSettings) -> String {
    match settings.incoming_email_address.as_deref() {
        Some(address) if !address.trim().is_empty() => {
            format!("Forward emails to: {address}")
        }
        _ => "Your assistant mailbox has not been provisioned yet.".to_string(),
    }
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    detail: Option<serde_json::Value>,
}

fn rejection_message(body: &str) -> String {
    let detail = serde_json::from_str::<ErrorDetail>(body)
        .ok()
        .and_then(|error| error.detail);
    match detail {
        Some(serde_json::Value::String(message)) if !message.is_empty() => message,
        Some(other) if !other.is_null() => other.to_string(),
        _ => UPDATE_FAILED.to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct SettingsClient {
    http: reqwest::Client,
    endpoint: ApiEndpoint,
}

impl SettingsClient {
    pub fn new(endpoint: ApiEndpoint, timeout: Duration) -> Result<Self, SettingsError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, endpoint })
    }

    pub async fn fetch(&self, user: &UserId) -> Result<UserSettings, SettingsError> {
        let url = self
            .endpoint
            .url("/api/v1/settings/email", &[("user_id", user.as_str())])?;
        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            return Err(SettingsError::Status {
                operation: "Fetching user settings",
                status: response.status().as_u16(),
            });
        }
        Ok(response.json().await?)
    }

    pub async fn update(
        &self,
        user: &UserId,
        update: &SettingsUpdate,
    ) -> Result<UserSettings, SettingsError> {
        let url = self
            .endpoint
            .url("/api/v1/settings/email", &[("user_id", user.as_str())])?;
        let response = self.http.patch(url).json(update).send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, "settings update rejected");
            return Err(SettingsError::Rejected(rejection_message(&body)));
        }

        tracing::info!(user = %user, "settings updated");
        Ok(response.json().await?)
    }
}
