use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;

use crate::context::AppContext;
use crate::domain::envelope::{FailureKind, ShareOutcome};
use crate::domain::generation::{GenerationKind, GroomLevel, RoastLevel, RoastTheme};
use crate::error::{AppError, AppResult};
use crate::render::render_blocks;
use crate::workflow::panel::{Completion, PanelController, PanelOptions, PanelState};

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// What to generate: test-scenarios, roast or groom.
    pub kind: String,
    /// Jira ticket key, e.g. ODCD-33741.
    #[arg(short, long)]
    pub ticket: Option<String>,
    /// Ticket content to send instead of (or alongside) the key.
    #[arg(short, long, conflicts_with = "content_file")]
    pub content: Option<String>,
    /// Read ticket content from a file.
    #[arg(long)]
    pub content_file: Option<PathBuf>,
    /// Roast theme: default, pirate, shakespeare or genz.
    #[arg(long)]
    pub theme: Option<String>,
    /// Roast level (light, savage, extra_crispy) or groom level.
    #[arg(short, long)]
    pub level: Option<String>,
    /// Write the raw result to `<kind>-<ticket>.md` in the export directory.
    #[arg(long)]
    pub export: bool,
    /// Post the result to the team channel.
    #[arg(long)]
    pub share: bool,
}

pub fn parse_kind(value: &str) -> AppResult<GenerationKind> {
    GenerationKind::from_str(value).ok_or_else(|| {
        AppError::Configuration(format!(
            "unknown artifact '{value}'; expected test-scenarios, roast or groom"
        ))
    })
}

pub fn parse_options(
    kind: GenerationKind,
    theme: Option<&str>,
    level: Option<&str>,
) -> AppResult<PanelOptions> {
    let invalid = |field: &str, value: &str| {
        AppError::Configuration(format!("invalid {field} '{value}' for {}", kind.as_str()))
    };

    match kind {
        GenerationKind::TestScenario => {
            if theme.is_some() || level.is_some() {
                return Err(AppError::Configuration(
                    "test scenarios take no theme or level".to_string(),
                ));
            }
            Ok(PanelOptions::None)
        }
        GenerationKind::Roast => Ok(PanelOptions::Roast {
            theme: match theme {
                Some(value) => RoastTheme::from_str(value).ok_or_else(|| invalid("theme", value))?,
                None => RoastTheme::default(),
            },
            level: match level {
                Some(value) => RoastLevel::from_str(value).ok_or_else(|| invalid("level", value))?,
                None => RoastLevel::default(),
            },
        }),
        GenerationKind::Groom => {
            if theme.is_some() {
                return Err(AppError::Configuration(
                    "groom analysis takes no theme".to_string(),
                ));
            }
            Ok(PanelOptions::Groom {
                level: match level {
                    Some(value) => {
                        GroomLevel::from_str(value).ok_or_else(|| invalid("level", value))?
                    }
                    None => GroomLevel::default(),
                },
            })
        }
    }
}

pub async fn run(ctx: &AppContext, args: GenerateArgs) -> AppResult<()> {
    let kind = parse_kind(&args.kind)?;
    let options = parse_options(kind, args.theme.as_deref(), args.level.as_deref())?;
    let content = match (&args.content, &args.content_file) {
        (Some(content), _) => content.clone(),
        (None, Some(path)) => fs::read_to_string(path)?,
        (None, None) => String::new(),
    };

    let mut panel = PanelController::for_kind(kind);
    panel.set_ticket_id(args.ticket.unwrap_or_default());
    panel.set_content(content);
    panel.set_options(options)?;

    // A validation failure leaves the panel idle with the error recorded;
    // `report` surfaces it.
    if let Ok(Completion::Stale) = panel.submit(ctx.generator.as_ref(), |_| {}).await {
        return Ok(());
    }
    report(ctx, &panel, args.export, args.share).await
}

/// Prints a finished panel and runs the requested follow-ups.
pub async fn report(
    ctx: &AppContext,
    panel: &PanelController,
    export: bool,
    share: bool,
) -> AppResult<()> {
    if let Some(err) = panel.validation_error() {
        return Err(err.clone().into());
    }
    if panel.state() != PanelState::Success {
        if let Some(suggestion) = panel.suggestion() {
            eprintln!("Suggestion: {suggestion}");
        }
        return Err(panel.failure().unwrap_or(AppError::NoResult));
    }
    let result = panel.result().ok_or(AppError::NoResult)?;

    let marker = if panel.success_indicator_visible(Instant::now()) {
        " ✓"
    } else {
        ""
    };
    println!("{}{marker}", panel.config().title);
    println!();
    print!("{}", render_blocks(&result.blocks));

    if export {
        let path = panel.export(&ctx.config.export_dir)?;
        println!();
        println!("Saved to {}", path.display());
    }

    if share {
        let request = panel.share_request().ok_or(AppError::NoResult)?;
        match ctx.generator.share(&request).await {
            ShareOutcome::Shared => println!("Shared with the team."),
            ShareOutcome::Failure {
                kind: FailureKind::Network,
                message,
            } => return Err(AppError::Network(message)),
            ShareOutcome::Failure {
                kind: FailureKind::Service,
                message,
            } => {
                return Err(AppError::Service {
                    message,
                    suggestion: None,
                });
            }
        }
    }

    Ok(())
}
