use anyhow::Context;
use inbox_config::{AppConfig, ConfigManager, TerminalRuleConfig};
use inbox_core::UserId;
use inbox_email::EmailClient;
use inbox_settings::{AdminClient, SettingsClient};
use inbox_storage::{IdentityStore, LocalStore, TaskCache};
use inbox_tasks::{HttpTaskApi, TaskListController, TaskQuery, TerminalRule};
use std::sync::Arc;

pub struct AppState {
    pub(crate) config: AppConfig,
    pub(crate) identity: IdentityStore,
    pub(crate) user: UserId,
    pub(crate) cache: TaskCache,
    pub(crate) tasks_api: Arc<HttpTaskApi>,
    pub(crate) email: EmailClient,
    pub(crate) settings: SettingsClient,
    pub(crate) admin: AdminClient,
}

impl AppState {
    pub fn initialize(user: Option<&str>, api_base: Option<&str>) -> anyhow::Result<Self> {
        let config_manager = ConfigManager::new().context("initialize config manager")?;
        let mut config = config_manager.load().context("load app config")?;
        if let Some(base) = api_base {
            config.api.base_url = base.to_string();
        }

        let identity_store = LocalStore::open(config_manager.data_dir().join("local"))
            .context("open local identity store")?;
        let identity = IdentityStore::new(identity_store, config.identity.dev_mode);
        let user = identity.resolve(user).context("resolve current user")?;

        let cache_store = LocalStore::open(config_manager.cache_dir().join("local"))
            .context("open local task cache")?;
        let cache = TaskCache::new(cache_store);

        let endpoint = config.api.endpoint();
        let timeout = config.api.timeout();
        let tasks_api = Arc::new(
            HttpTaskApi::new(endpoint.clone(), timeout).context("build task api client")?,
        );
        let email = EmailClient::new(endpoint.clone(), timeout).context("build email client")?;
        let settings =
            SettingsClient::new(endpoint.clone(), timeout).context("build settings client")?;
        let admin = AdminClient::new(endpoint, timeout).context("build admin client")?;

        tracing::debug!(
            user = %user,
            api = %config.api.base_url,
            config = %config_manager.config_path().display(),
            "app state initialized"
        );

        Ok(Self {
            config,
            identity,
            user,
            cache,
            tasks_api,
            email,
            settings,
            admin,
        })
    }

    pub fn terminal_rule(&self) -> TerminalRule {
        match self.config.tasks.terminal_rule {
            TerminalRuleConfig::AlwaysAfterConfirm => TerminalRule::AlwaysAfterConfirm,
            TerminalRuleConfig::ByClassifiedStatus => TerminalRule::ByClassifiedStatus,
        }
    }

    pub fn task_query(&self, status: Option<String>, include_spam: bool) -> TaskQuery {
        TaskQuery {
            status: status.unwrap_or_else(|| self.config.tasks.status_filter.clone()),
            include_spam: include_spam || self.config.tasks.include_spam,
        }
    }

    pub fn task_controller(&self, query: TaskQuery) -> TaskListController {
        TaskListController::new(
            self.tasks_api.clone(),
            self.cache.clone(),
            self.user.clone(),
            query,
            self.terminal_rule(),
        )
    }
}
