mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod export;
mod format;
mod infra;
mod render;
mod services;
mod workflow;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::cmd::config::ConfigArgs;
use crate::cmd::dashboard::DashboardArgs;
use crate::cmd::generate::GenerateArgs;
use crate::cmd::health::HealthArgs;
use crate::cmd::ticket::TicketArgs;
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::backend::BackendClient;
use crate::infra::jira::JiraClient;
use crate::workflow::cards::CardSource;

#[derive(Parser)]
#[command(
    name = "ticketdesk",
    author,
    version,
    about = "Jira card dashboard with AI test scenarios, roasts and grooming"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate test scenarios, a roast or a groom analysis for a ticket.
    Generate(GenerateArgs),
    /// List Jira cards by team and status, optionally acting on one.
    Dashboard(DashboardArgs),
    /// Fetch raw ticket details through the backend.
    Ticket(TicketArgs),
    /// Check that the generation backend is reachable.
    Health(HealthArgs),
    /// Inspect CLI configuration.
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;

    match cli.command {
        Commands::Config(args) => cmd::config::run(&config, args.command),
        Commands::Generate(args) => cmd::generate::run(&build_context(config), args).await,
        Commands::Dashboard(args) => cmd::dashboard::run(&build_context(config), args).await,
        Commands::Ticket(args) => cmd::ticket::run(&build_context(config), args).await,
        Commands::Health(args) => cmd::health::run(&build_context(config), args).await,
    }
}

fn build_context(config: AppConfig) -> AppContext {
    let jira = Arc::new(JiraClient::new(
        config.jira_base_url.clone(),
        config.jira_email.clone(),
        config.jira_token.clone(),
        config.card_scheme,
    ));
    let generator = Arc::new(BackendClient::new(config.api_base.clone()));
    let cards = CardSource::new(jira, config.card_scheme);

    AppContext::new(config, generator, cards)
}
