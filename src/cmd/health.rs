use std::sync::Arc;

use clap::Args;

use crate::context::AppContext;
use crate::error::{AppError, AppResult};
use crate::workflow::health::spawn_health_monitor;

#[derive(Args, Debug, Clone)]
pub struct HealthArgs {
    /// Keep polling on the configured interval until interrupted.
    #[arg(long)]
    pub watch: bool,
}

pub async fn run(ctx: &AppContext, args: HealthArgs) -> AppResult<()> {
    if !args.watch {
        let status = ctx.generator.health_check().await;
        if status.success {
            println!("Backend is healthy ({})", ctx.config.api_base);
            return Ok(());
        }
        return Err(AppError::Network(format!(
            "backend at {} is not healthy",
            ctx.config.api_base
        )));
    }

    let api_base = ctx.config.api_base.clone();
    let monitor = spawn_health_monitor(
        Arc::clone(&ctx.generator),
        ctx.config.health_interval,
        move |status| {
            let now = chrono::Local::now().format("%H:%M:%S");
            let label = if status.success { "healthy" } else { "unreachable" };
            println!("[{now}] {api_base}: {label}");
        },
    );

    let interrupted = tokio::signal::ctrl_c().await;
    monitor.abort();
    interrupted?;
    Ok(())
}
