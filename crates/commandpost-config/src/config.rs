//! Configuration management for the daemon.

use crate::error::{CoreError, CoreResult};
use crate::paths::Paths;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use url::Url;

/// Default server name substituted into mail templates.
pub const DEFAULT_SERVER_NAME: &str = "Minecraft Server";
/// Default subject template.
pub const DEFAULT_EMAIL_SUBJECT: &str = "[%serverName%] Command digest for %playerName%";
/// Default body template.
pub const DEFAULT_EMAIL_BODY: &str = "Commands executed by %playerName% on %serverName%:";
/// Default digest window in minutes.
pub const DEFAULT_WINDOW_MINUTES: u64 = 5;
/// Default mail API request timeout in seconds.
pub const DEFAULT_MAIL_TIMEOUT_SECS: u64 = 30;

fn default_server_name() -> String {
    DEFAULT_SERVER_NAME.to_string()
}

fn default_email_subject() -> String {
    DEFAULT_EMAIL_SUBJECT.to_string()
}

fn default_email_body() -> String {
    DEFAULT_EMAIL_BODY.to_string()
}

fn default_window_minutes() -> u64 {
    DEFAULT_WINDOW_MINUTES
}

fn default_mail_timeout_secs() -> u64 {
    DEFAULT_MAIL_TIMEOUT_SECS
}

/// Mail API connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailApiConfig {
    /// Endpoint receiving send requests.
    #[serde(default)]
    pub api_url: String,

    /// Bearer token for the mail API.
    #[serde(default)]
    pub api_token: String,

    /// Request timeout in seconds.
    #[serde(default = "default_mail_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for MailApiConfig {
    fn default() -> Self {
        Self {
            api_url: String::new(),
            api_token: String::new(),
            timeout_secs: DEFAULT_MAIL_TIMEOUT_SECS,
        }
    }
}

/// Daemon configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server name substituted for `%serverName%` in mail templates.
    #[serde(default = "default_server_name")]
    pub server_name: String,

    /// Subject template. `%serverName%` and `%playerName%` are expanded.
    #[serde(default = "default_email_subject")]
    pub email_subject: String,

    /// Body template prepended to the command list.
    #[serde(default = "default_email_body")]
    pub email_body: String,

    /// Recipient address for every digest.
    #[serde(default)]
    pub mail_to: String,

    /// Record commands from server operators too.
    #[serde(default)]
    pub log_ops: bool,

    /// Minutes between a player's first buffered command and their digest.
    #[serde(default = "default_window_minutes")]
    pub window_minutes: u64,

    /// Command prefixes excluded from recording. Ignored while the
    /// blacklist is non-empty.
    #[serde(default)]
    pub whitelist: Vec<String>,

    /// Command prefixes recorded exclusively. When non-empty, only these
    /// are recorded.
    #[serde(default)]
    pub blacklist: Vec<String>,

    /// Mail API connection settings.
    #[serde(default)]
    pub mail: MailApiConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_name: default_server_name(),
            email_subject: default_email_subject(),
            email_body: default_email_body(),
            mail_to: String::new(),
            log_ops: false,
            window_minutes: DEFAULT_WINDOW_MINUTES,
            whitelist: Vec::new(),
            blacklist: Vec::new(),
            mail: MailApiConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// On first run the default config file is written out so operators
    /// have something to edit.
    pub fn load(paths: &Paths) -> CoreResult<Self> {
        let config_path = paths.config_file();
        if config_path.exists() {
            Self::load_from_file(&config_path)
        } else {
            let config = Self::default();
            config.save(paths)?;
            Ok(config)
        }
    }

    /// Load configuration from a file.
    pub fn load_from_file(path: &Path) -> CoreResult<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to the default location.
    pub fn save(&self, paths: &Paths) -> CoreResult<()> {
        paths.ensure_dirs()?;
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(paths.config_file(), contents)?;
        Ok(())
    }

    /// Check the settings the daemon cannot run without.
    ///
    /// The daemon refuses to start (and a reload is rejected) when the
    /// recipient, window, or mail API settings are unusable.
    pub fn validate(&self) -> CoreResult<()> {
        if self.mail_to.trim().is_empty() {
            return Err(CoreError::Config(
                "mail_to is empty; set the digest recipient".to_string(),
            ));
        }
        if self.window_minutes == 0 {
            return Err(CoreError::Config(
                "window_minutes must be at least 1".to_string(),
            ));
        }
        if self.mail.api_url.trim().is_empty() {
            return Err(CoreError::Config(
                "mail.api_url is empty; set the mail API endpoint".to_string(),
            ));
        }
        Url::parse(&self.mail.api_url)?;
        if self.mail.api_token.trim().is_empty() {
            return Err(CoreError::Config(
                "mail.api_token is empty; set the mail API token".to_string(),
            ));
        }
        Ok(())
    }
}
