//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use wl_core::{Session, User, ValidationError};

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the database file.
    pub database_path: PathBuf,
    /// Path of the feedback outbox (JSON lines).
    pub outbox_path: PathBuf,
    /// Claude API key. Falls back to `ANTHROPIC_API_KEY` when unset.
    pub api_key: Option<String>,
    /// Claude model used by `wl ask`.
    pub model: String,
    /// Display name of the person keeping the log.
    pub user_name: Option<String>,
    /// Email of the person keeping the log.
    pub user_email: Option<String>,
    /// Where feedback is sent.
    pub feedback_recipient: Option<String>,
    /// Width of the activity chart in days.
    pub chart_days: usize,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_path", &self.database_path)
            .field("outbox_path", &self.outbox_path)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("user_name", &self.user_name)
            .field("user_email", &self.user_email)
            .field("feedback_recipient", &self.feedback_recipient)
            .field("chart_days", &self.chart_days)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            database_path: data_dir.join("wl.db"),
            outbox_path: data_dir.join("outbox.jsonl"),
            api_key: None,
            model: wl_llm::DEFAULT_MODEL.to_string(),
            user_name: None,
            user_email: None,
            feedback_recipient: None,
            chart_days: 7,
        }
    }
}

impl Config {
    /// Loads configuration from default locations, then the optional
    /// `config_path` file, then `WL_*` environment variables.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Environment variables (WL_*)
        figment = figment.merge(Env::prefixed("WL_"));

        figment.extract()
    }

    /// The configured API key, or `ANTHROPIC_API_KEY` from the environment.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("ANTHROPIC_API_KEY").ok())
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
    }

    /// Builds the session for this run from the configured identity.
    pub fn session(&self) -> Result<Session, ValidationError> {
        let user = match self.user_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => Some(User::new(name, self.user_email.clone())?),
            _ => None,
        };
        Ok(Session::new(user))
    }
}

/// Returns the platform-specific config directory for wl.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("wl"))
}

/// Returns the platform-specific data directory for wl.
///
/// On Linux: `~/.local/share/wl`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("wl"))
}
