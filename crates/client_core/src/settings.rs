use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::responder::DEFAULT_WEBHOOK_URL;

pub const SETTINGS_FILE_NAME: &str = "mock_chat.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub webhook_url: String,
    pub window_title: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            webhook_url: DEFAULT_WEBHOOK_URL.into(),
            window_title: "Mock Chat".into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    webhook_url: Option<String>,
    window_title: Option<String>,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file '{}': {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse settings file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid webhook url '{url}': {reason}")]
    InvalidWebhookUrl { url: String, reason: String },
}

/// Loads defaults, then the settings file, then environment overrides.
///
/// An explicit `config_path` must exist; the implicit `mock_chat.toml` in
/// the working directory is optional.
pub fn load_settings(config_path: Option<&Path>) -> Result<Settings, SettingsError> {
    let mut settings = Settings::default();

    let file = match config_path {
        Some(path) => Some(read_settings_file(path)?),
        None => {
            let path = Path::new(SETTINGS_FILE_NAME);
            if path.exists() {
                Some(read_settings_file(path)?)
            } else {
                None
            }
        }
    };
    if let Some(file) = file {
        settings.apply_file(file);
    }

    settings.apply_env_overrides(|name| std::env::var(name).ok());
    settings.validate()?;
    Ok(settings)
}

fn read_settings_file(path: &Path) -> Result<SettingsFile, SettingsError> {
    let raw = fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_settings_file(&raw, path)
}

fn parse_settings_file(raw: &str, path: &Path) -> Result<SettingsFile, SettingsError> {
    toml::from_str(raw).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

impl Settings {
    fn apply_file(&mut self, file: SettingsFile) {
        if let Some(v) = file.webhook_url {
            self.webhook_url = v;
        }
        if let Some(v) = file.window_title {
            self.window_title = v;
        }
    }

    fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(v) = non_empty("MOCK_CHAT_WEBHOOK_URL") {
            self.webhook_url = v;
        }
        if let Some(v) = non_empty("APP__WEBHOOK_URL") {
            self.webhook_url = v;
        }
        if let Some(v) = non_empty("APP__WINDOW_TITLE") {
            self.window_title = v;
        }
    }

    /// Replaces the webhook url (command-line flag) and re-validates.
    pub fn with_webhook_url(mut self, webhook_url: impl Into<String>) -> Result<Self, SettingsError> {
        self.webhook_url = webhook_url.into();
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let url = self.webhook_url.trim();
        let parsed = Url::parse(url).map_err(|err| SettingsError::InvalidWebhookUrl {
            url: url.to_string(),
            reason: err.to_string(),
        })?;
        match parsed.scheme() {
            "http" | "https" => Ok(()),
            other => Err(SettingsError::InvalidWebhookUrl {
                url: url.to_string(),
                reason: format!("unsupported scheme '{other}'"),
            }),
        }
    }
}
