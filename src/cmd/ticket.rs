use clap::Args;

use crate::context::AppContext;
use crate::domain::envelope::{FailureKind, TicketLookup};
use crate::error::{AppError, AppResult};

#[derive(Args, Debug, Clone)]
pub struct TicketArgs {
    /// Ticket key, e.g. ODCD-33741.
    pub key: String,
}

pub async fn run(ctx: &AppContext, args: TicketArgs) -> AppResult<()> {
    match ctx.generator.fetch_ticket(&args.key).await {
        TicketLookup::Found(data) => {
            println!("{}", serde_json::to_string_pretty(&data)?);
            Ok(())
        }
        TicketLookup::Failure {
            kind: FailureKind::Network,
            message,
        } => Err(AppError::Network(message)),
        TicketLookup::Failure {
            kind: FailureKind::Service,
            message,
        } => Err(AppError::Service {
            message,
            suggestion: None,
        }),
    }
}
