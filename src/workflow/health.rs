use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::info;

use crate::domain::envelope::HealthStatus;
use crate::services::GenerationService;

/// Polls the backend health endpoint every `period`. Each tick spawns its own
/// check, so a slow response can overlap the next one. Abort the returned
/// handle to stop polling.
pub fn spawn_health_monitor<F>(
    service: Arc<dyn GenerationService>,
    period: Duration,
    on_status: F,
) -> JoinHandle<()>
where
    F: Fn(HealthStatus) + Send + Sync + 'static,
{
    let on_status = Arc::new(on_status);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            let service = Arc::clone(&service);
            let on_status = Arc::clone(&on_status);
            tokio::spawn(async move {
                let status = service.health_check().await;
                info!(healthy = status.success, "backend health check");
                on_status(status);
            });
        }
    })
}
