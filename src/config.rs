use config::{Config, ConfigBuilder, ConfigError, Environment, builder::DefaultState};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

use crate::keywords::KeywordSet;

pub const DEFAULT_TARGET_URL: &str =
    "https://www.bangerhead.pl/curated-by-bangerhead-advent-calender-2025";
pub const DEFAULT_STATE_FILE: &str = "last_status.json";
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 20;
pub const DEFAULT_SMTP_PORT: u16 = 587;
pub const DEFAULT_TELEGRAM_API: &str = "https://api.telegram.org";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36";

/// Immutable settings for one run, loaded once at process start.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub target_url: Url,
    pub state_file: PathBuf,
    pub fetch: FetchConfig,
    pub notifications: NotificationsConfig,
    pub keywords: KeywordSet,
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Default)]
pub struct NotificationsConfig {
    pub telegram: TelegramConfig,
    pub smtp: SmtpConfig,
}

#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: Option<String>,
    pub chat_id: Option<String>,
    pub api_base: String,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            chat_id: None,
            api_base: DEFAULT_TELEGRAM_API.to_string(),
        }
    }
}

impl TelegramConfig {
    /// Token and chat id, only when both are present.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        Some((present(&self.bot_token)?, present(&self.chat_id)?))
    }

    pub fn is_complete(&self) -> bool {
        self.credentials().is_some()
    }
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: Option<String>,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from_address: Option<String>,
    pub to_address: Option<String>,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: None,
            port: DEFAULT_SMTP_PORT,
            username: None,
            password: None,
            from_address: None,
            to_address: None,
        }
    }
}

/// Borrowed view of a fully configured SMTP channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmtpCredentials<'a> {
    pub host: &'a str,
    pub port: u16,
    pub username: &'a str,
    pub password: &'a str,
    pub from_address: &'a str,
    pub to_address: &'a str,
}

impl SmtpConfig {
    /// Every field the channel needs, or `None` if any is missing.
    pub fn credentials(&self) -> Option<SmtpCredentials<'_>> {
        Some(SmtpCredentials {
            host: present(&self.host)?,
            port: self.port,
            username: present(&self.username)?,
            password: present(&self.password)?,
            from_address: present(&self.from_address)?,
            to_address: present(&self.to_address)?,
        })
    }

    pub fn is_complete(&self) -> bool {
        self.credentials().is_some()
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Flat view of the environment, one field per variable.
#[derive(Debug, Deserialize)]
struct RawSettings {
    bh_url: String,
    state_file: PathBuf,
    timeout: u64,
    user_agent: Option<String>,
    tg_bot_token: Option<String>,
    tg_chat_id: Option<String>,
    tg_api_base: String,
    smtp_host: Option<String>,
    smtp_port: u16,
    smtp_user: Option<String>,
    smtp_pass: Option<String>,
    email_to: Option<String>,
    email_from: Option<String>,
    keywords_out: Option<String>,
    keywords_in: Option<String>,
}

impl AppConfig {
    /// Reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(Environment::default())
    }

    /// Same as [`AppConfig::from_env`] but from an explicit variable map.
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::load(Environment::default().source(Some(vars)))
    }

    fn load(environment: Environment) -> Result<Self, ConfigError> {
        let s = Self::defaults()?
            .add_source(environment.ignore_empty(true))
            .build()?;

        let raw: RawSettings = s.try_deserialize()?;
        let config = Self::from_raw(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("bh_url", DEFAULT_TARGET_URL)?
            .set_default("state_file", DEFAULT_STATE_FILE)?
            .set_default("timeout", DEFAULT_FETCH_TIMEOUT_SECS)?
            .set_default("smtp_port", DEFAULT_SMTP_PORT as u64)?
            .set_default("tg_api_base", DEFAULT_TELEGRAM_API)
    }

    fn from_raw(raw: RawSettings) -> Result<Self, ConfigError> {
        let target_url = Url::parse(raw.bh_url.trim()).map_err(|e| {
            ConfigError::Message(format!("Invalid target URL '{}': {}", raw.bh_url, e))
        })?;

        // The sender defaults to the login, as most relays require.
        let from_address = raw.email_from.or_else(|| raw.smtp_user.clone());

        Ok(AppConfig {
            target_url,
            state_file: raw.state_file,
            fetch: FetchConfig {
                timeout_secs: raw.timeout,
                user_agent: raw.user_agent.unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            },
            notifications: NotificationsConfig {
                telegram: TelegramConfig {
                    bot_token: raw.tg_bot_token,
                    chat_id: raw.tg_chat_id,
                    api_base: raw.tg_api_base.trim_end_matches('/').to_string(),
                },
                smtp: SmtpConfig {
                    host: raw.smtp_host,
                    port: raw.smtp_port,
                    username: raw.smtp_user,
                    password: raw.smtp_pass,
                    from_address,
                    to_address: raw.email_to,
                },
            },
            keywords: KeywordSet::from_overrides(
                raw.keywords_out.as_deref(),
                raw.keywords_in.as_deref(),
            ),
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !matches!(self.target_url.scheme(), "http" | "https") {
            return Err(ConfigError::Message("Target URL must use http or https".into()));
        }

        if self.fetch.timeout_secs == 0 {
            return Err(ConfigError::Message("Fetch timeout must be greater than 0".into()));
        }

        if self.notifications.smtp.port == 0 {
            return Err(ConfigError::Message("SMTP port must be greater than 0".into()));
        }

        if Url::parse(&self.notifications.telegram.api_base).is_err() {
            return Err(ConfigError::Message("Invalid Telegram API base URL".into()));
        }

        Ok(())
    }
}
