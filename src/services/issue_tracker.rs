use async_trait::async_trait;

use crate::domain::card::JiraCard;
use crate::domain::filter::CardQuery;
use crate::error::AppResult;

#[async_trait]
pub trait IssueTrackerService: Send + Sync {
    /// Fails with `AppError::JiraUnavailable` on any transport or status error.
    async fn search_cards(&self, query: &CardQuery) -> AppResult<Vec<JiraCard>>;

    fn is_configured(&self) -> bool;
}
