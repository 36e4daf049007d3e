use inbox_core::ApiEndpoint;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub version: u32,
    pub api: ApiConfig,
    #[serde(default)]
    pub tasks: TaskListConfig,
    #[serde(default)]
    pub identity: IdentityConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl ApiConfig {
    pub fn endpoint(&self) -> ApiEndpoint {
        ApiEndpoint::new(&self.base_url)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskListConfig {
    pub status_filter: String,
    pub include_spam: bool,
    pub terminal_rule: TerminalRuleConfig,
}

impl Default for TaskListConfig {
    fn default() -> Self {
        Self {
            status_filter: "active".to_string(),
            include_spam: false,
            terminal_rule: TerminalRuleConfig::AlwaysAfterConfirm,
        }
    }
}

/// Which resolved status removes a task from the active list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminalRuleConfig {
    AlwaysAfterConfirm,
    ByClassifiedStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Enables the stored demo identity and the demo user list.
    pub dev_mode: bool,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self { dev_mode: true }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            api: ApiConfig {
                base_url: "http://localhost:8000".to_string(),
                timeout_secs: 30,
            },
            tasks: TaskListConfig::default(),
            identity: IdentityConfig::default(),
        }
    }
}
