use async_trait::async_trait;

use crate::domain::envelope::{GenerationOutcome, HealthStatus, ShareOutcome, TicketLookup};
use crate::domain::generation::GenerationRequest;

/// Backend calls never fail at the type level; every error is folded into the
/// returned outcome so callers must handle both branches.
#[async_trait]
pub trait GenerationService: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> GenerationOutcome;
    async fn health_check(&self) -> HealthStatus;
    async fn fetch_ticket(&self, ticket_number: &str) -> TicketLookup;
    async fn share(&self, request: &ShareRequest) -> ShareOutcome;
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ShareRequest {
    #[serde(rename = "type")]
    pub artifact_type: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_number: Option<String>,
}
