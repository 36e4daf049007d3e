use crate::{AppConfig, ConfigError};
use directories::ProjectDirs;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

const ORG: &str = "io";
const AUTHOR: &str = "InboxAssistant";
const APP: &str = "InboxAssistant";

pub const API_BASE_ENV: &str = "INBOX_API_BASE";

#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
    data_dir: PathBuf,
    cache_dir: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, ConfigError> {
        let dirs = ProjectDirs::from(ORG, AUTHOR, APP).ok_or(ConfigError::MissingDirectories)?;
        Self::with_dirs(
            dirs.config_dir().to_path_buf(),
            dirs.data_dir().to_path_buf(),
            dirs.cache_dir().to_path_buf(),
        )
    }

    /// Uses explicit directories instead of the platform ones.
    pub fn with_dirs(
        config_dir: PathBuf,
        data_dir: PathBuf,
        cache_dir: PathBuf,
    ) -> Result<Self, ConfigError> {
        for dir in [&config_dir, &data_dir, &cache_dir] {
            fs::create_dir_all(dir).map_err(ConfigError::io(dir))?;
        }

        let config_path = config_dir.join("config.toml");
        if !config_path.exists() {
            let initial = AppConfig::default();
            let content = toml::to_string_pretty(&initial)?;
            fs::write(&config_path, content).map_err(ConfigError::io(&config_path))?;
            tracing::info!(path = %config_path.display(), "wrote default config");
        }

        Ok(Self {
            config_path,
            data_dir,
            cache_dir,
        })
    }

    /// Loads the config file and applies the `INBOX_API_BASE` override.
    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        let content =
            fs::read_to_string(&self.config_path).map_err(ConfigError::io(&self.config_path))?;
        let mut config: AppConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: self.config_path.clone(),
            source,
        })?;
        if let Ok(base) = env::var(API_BASE_ENV) {
            if !base.trim().is_empty() {
                config.api.base_url = base;
            }
        }
        validate_api_base(&config.api.base_url)?;
        Ok(config)
    }

    pub fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        validate_api_base(&config.api.base_url)?;
        let content = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, content).map_err(ConfigError::io(&self.config_path))?;
        Ok(())
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }
}

fn validate_api_base(value: &str) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidApiBase {
        value: value.to_string(),
        reason,
    };
    let url = Url::parse(value.trim()).map_err(|err| invalid(err.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("unsupported scheme `{other}`"))),
    }
}
