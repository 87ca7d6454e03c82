use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::teams::CardScheme;
use crate::error::{AppError, AppResult};

pub const DEFAULT_API_BASE: &str = "http://localhost:3000/api";
pub const DEFAULT_JIRA_BASE_URL: &str = "https://your-domain.atlassian.net";
pub const DEFAULT_HEALTH_INTERVAL: Duration = Duration::from_secs(30);

const ENV_API_BASE: &str = "TICKETDESK_API_BASE";
const ENV_JIRA_BASE_URL: &str = "JIRA_BASE_URL";
const ENV_JIRA_EMAIL: &str = "JIRA_EMAIL";
const ENV_JIRA_TOKEN: &str = "JIRA_API_TOKEN";
const ENV_CARD_SCHEME: &str = "TICKETDESK_CARD_SCHEME";
const ENV_EXPORT_DIR: &str = "TICKETDESK_EXPORT_DIR";
const ENV_HEALTH_INTERVAL: &str = "TICKETDESK_HEALTH_INTERVAL_SECS";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base: String,
    pub jira_base_url: String,
    pub jira_email: Option<String>,
    pub jira_token: Option<String>,
    pub card_scheme: CardScheme,
    pub export_dir: PathBuf,
    pub health_interval: Duration,
}

impl AppConfig {
    pub fn load() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source. Empty
    /// values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let card_scheme = match read(ENV_CARD_SCHEME) {
            Some(value) => CardScheme::from_str(&value).ok_or_else(|| {
                AppError::Configuration(format!(
                    "{ENV_CARD_SCHEME} must be 'portfolio' or 'legacy', got '{value}'"
                ))
            })?,
            None => CardScheme::Portfolio,
        };

        let health_interval = match read(ENV_HEALTH_INTERVAL) {
            Some(value) => {
                let secs = value.parse::<u64>().map_err(|_| {
                    AppError::Configuration(format!(
                        "{ENV_HEALTH_INTERVAL} must be a whole number of seconds, got '{value}'"
                    ))
                })?;
                if secs == 0 {
                    return Err(AppError::Configuration(format!(
                        "{ENV_HEALTH_INTERVAL} must be greater than zero"
                    )));
                }
                Duration::from_secs(secs)
            }
            None => DEFAULT_HEALTH_INTERVAL,
        };

        Ok(Self {
            api_base: read(ENV_API_BASE)
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
                .trim_end_matches('/')
                .to_string(),
            jira_base_url: read(ENV_JIRA_BASE_URL)
                .unwrap_or_else(|| DEFAULT_JIRA_BASE_URL.to_string()),
            jira_email: read(ENV_JIRA_EMAIL),
            jira_token: read(ENV_JIRA_TOKEN),
            card_scheme,
            export_dir: read(ENV_EXPORT_DIR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            health_interval,
        })
    }

    pub fn jira_configured(&self) -> bool {
        self.jira_email.is_some() && self.jira_token.is_some()
    }
}
