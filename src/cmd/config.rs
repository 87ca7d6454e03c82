use clap::{Args, Subcommand};

use crate::config::AppConfig;
use crate::error::AppResult;

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Show the effective configuration (secrets masked).
    Show,
}

pub fn run(config: &AppConfig, command: ConfigCommand) -> AppResult<()> {
    match command {
        ConfigCommand::Show => {
            print!("{}", describe(config));
            Ok(())
        }
    }
}

fn describe(config: &AppConfig) -> String {
    let mut lines = vec![
        format!("API base: {}", config.api_base),
        format!("Jira base URL: {}", config.jira_base_url),
        format!("Jira email: {}", display_value(&config.jira_email)),
        format!("Jira API token: {}", mask_secret(&config.jira_token)),
        format!("Card scheme: {}", config.card_scheme.as_str()),
        format!("Export directory: {}", config.export_dir.display()),
        format!("Health interval: {}s", config.health_interval.as_secs()),
    ];
    if !config.jira_configured() {
        lines.push("Jira is not configured; the dashboard will show sample cards.".to_string());
    }
    lines.push(String::new());
    lines.join("\n")
}

fn display_value(value: &Option<String>) -> String {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
        .unwrap_or_else(|| "<not set>".to_string())
}

/// Shows only the last four characters, and only for tokens long enough
/// that those four give little away.
fn mask_secret(value: &Option<String>) -> String {
    match value {
        Some(token) if token.chars().count() >= 12 => {
            let chars: Vec<char> = token.chars().collect();
            let suffix: String = chars[chars.len() - 4..].iter().collect();
            format!("***{suffix}")
        }
        Some(token) if !token.is_empty() => "***".to_string(),
        _ => "<not set>".to_string(),
    }
}
