use clap::Args;

use crate::cmd::generate::{parse_kind, report};
use crate::context::AppContext;
use crate::domain::filter::{FilterState, StatusFilter, TeamFilter};
use crate::error::{AppError, AppResult};
use crate::render::render_cards;
use crate::workflow::cards::CardOrigin;
use crate::workflow::panel::Completion;
use crate::workflow::workspace::Workspace;

#[derive(Args, Debug, Clone)]
pub struct DashboardArgs {
    /// Team to show, or "all".
    #[arg(long, default_value = "all")]
    pub team: String,
    /// ready-to-groom, ready-for-dev or all.
    #[arg(long, default_value = "ready-to-groom")]
    pub status: String,
    /// Case-insensitive filter over key, summary and assignee.
    #[arg(short, long)]
    pub search: Option<String>,
    /// Make this card the active ticket.
    #[arg(long)]
    pub select: Option<String>,
    /// Generate an artifact for the selected card.
    #[arg(long, requires = "select")]
    pub generate: Option<String>,
}

pub async fn run(ctx: &AppContext, args: DashboardArgs) -> AppResult<()> {
    let status = StatusFilter::from_str(&args.status).ok_or_else(|| {
        AppError::Configuration(format!(
            "unknown status filter '{}'; expected ready-to-groom, ready-for-dev or all",
            args.status
        ))
    })?;
    let generate = args.generate.as_deref().map(parse_kind).transpose()?;
    let team = TeamFilter::parse(&args.team);
    let scheme = ctx.config.card_scheme;
    if let Some(name) = team.as_team() {
        if !scheme.teams().iter().any(|known| *known == name) {
            eprintln!(
                "Warning: team '{name}' is not in the {} mapping ({}); searching every project.",
                scheme.as_str(),
                scheme.teams().join(", ")
            );
        }
    }

    let mut workspace = Workspace::new(FilterState::default());
    eprintln!("Loading {} cards...", status.as_str());
    workspace.filter_dashboard(team, status, &ctx.cards).await;
    workspace.search_dashboard(args.search.unwrap_or_default());

    let dashboard = workspace.dashboard();
    if let Some(warning) = dashboard.warning() {
        eprintln!("Warning: {warning}");
    }
    let visible = dashboard.visible_cards();
    print!("{}", render_cards(&visible));
    let source = match dashboard.origin() {
        Some(CardOrigin::Live) => "Jira",
        _ => "sample data",
    };
    let refreshed = dashboard
        .last_refreshed()
        .map(|at| at.with_timezone(&chrono::Local).format("%H:%M:%S").to_string())
        .unwrap_or_default();
    println!(
        "{} of {} {} cards from {source}, refreshed {refreshed}",
        visible.len(),
        dashboard.cards().len(),
        dashboard.filter().status.as_str()
    );

    let Some(key) = args.select else {
        return Ok(());
    };
    if !workspace.select_card(&key) {
        return Err(AppError::Configuration(format!(
            "card '{key}' is not on the dashboard"
        )));
    }
    println!("Active ticket: {}", workspace.active_ticket().unwrap_or(key.as_str()));

    if let Some(kind) = generate {
        println!();
        let completion = workspace.submit(kind, ctx.generator.as_ref()).await?;
        if completion == Completion::Applied {
            report(ctx, workspace.panel(kind), false, false).await?;
        }
    }

    Ok(())
}
