use crate::SettingsError;
use inbox_core::{ApiEndpoint, WebhookSecurity};
use std::time::Duration;
use uuid::Uuid;

const SECURITY_PATH: &str = "/api/v1/admin/webhook/security";

#[derive(Debug, Clone)]
pub struct AdminClient {
    http: reqwest::Client,
    endpoint: ApiEndpoint,
}

impl AdminClient {
    pub fn new(endpoint: ApiEndpoint, timeout: Duration) -> Result<Self, SettingsError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, endpoint })
    }

    pub async fn fetch_webhook_security(&self) -> Result<WebhookSecurity, SettingsError> {
        let url = self.endpoint.url(SECURITY_PATH, &[])?;
        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            return Err(SettingsError::Status {
                operation: "Fetching webhook security settings",
                status: response.status().as_u16(),
            });
        }
        Ok(response.json().await?)
    }

    pub async fn update_webhook_security(
        &self,
        security: &WebhookSecurity,
    ) -> Result<WebhookSecurity, SettingsError> {
        let url = self.endpoint.url(SECURITY_PATH, &[])?;
        let response = self.http.post(url).json(security).send().await?;
        if !response.status().is_success() {
            return Err(SettingsError::Status {
                operation: "Updating webhook security settings",
                status: response.status().as_u16(),
            });
        }
        tracing::info!(
            allowed_ips = security.allowed_ips.len(),
            active = security.active,
            "webhook security saved"
        );
        Ok(response.json().await?)
    }
}

/// Local edits to the webhook security settings before they are saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookSecurityDraft {
    security: WebhookSecurity,
}

impl WebhookSecurityDraft {
    pub fn new(security: WebhookSecurity) -> Self {
        Self { security }
    }

    pub fn security(&self) -> &WebhookSecurity {
        &self.security
    }

    /// Returns false when the address was blank or already listed.
    pub fn add_ip(&mut self, ip: &str) -> bool {
        let ip = ip.trim();
        if ip.is_empty() || self.security.allowed_ips.iter().any(|known| known == ip) {
            return false;
        }
        self.security.allowed_ips.push(ip.to_string());
        true
    }

    pub fn remove_ip(&mut self, ip: &str) -> bool {
        let before = self.security.allowed_ips.len();
        self.security.allowed_ips.retain(|known| known != ip.trim());
        self.security.allowed_ips.len() != before
    }

    /// Replaces the key with a locally generated one. The backend remains the
    /// authority; the new key only takes effect once saved.
    pub fn generate_api_key(&mut self) -> &str {
        self.security.api_key = Uuid::new_v4().simple().to_string();
        &self.security.api_key
    }

    pub fn set_active(&mut self, active: bool) {
        self.security.active = active;
    }

    pub fn into_security(self) -> WebhookSecurity {
        self.security
    }
}

#[cfg(test)]
mod tests {
    use super::WebhookSecurityDraft;
    use inbox_core::WebhookSecurity;

    fn draft() -> WebhookSecurityDraft {
        WebhookSecurityDraft::new(WebhookSecurity {
            api_key: "initial".to_string(),
            allowed_ips: vec!["10.0.0.1".to_string()],
            active: true,
        })
    }

    #[test]
    fn ignores_blank_and_duplicate_ips() {
        let mut draft = draft();
        assert!(!draft.add_ip("   "));
        assert!(!draft.add_ip(" 10.0.0.1 "));
        assert!(draft.add_ip("192.168.1.20"));
        assert_eq!(draft.security().allowed_ips, vec!["10.0.0.1", "192.168.1.20"]);
    }

    #[test]
    fn removes_listed_ip() {
        let mut draft = draft();
        assert!(draft.remove_ip("10.0.0.1"));
        assert!(!draft.remove_ip("10.0.0.1"));
        assert!(draft.security().allowed_ips.is_empty());
    }

    #[test]
    fn generated_key_replaces_previous() {
        let mut draft = draft();
        let key = draft.generate_api_key().to_string();
        assert_ne!(key, "initial");
        assert_eq!(key.len(), 32);

        draft.set_active(false);
        let security = draft.into_security();
        assert_eq!(security.api_key, key);
        assert!(!security.active);
    }
}
