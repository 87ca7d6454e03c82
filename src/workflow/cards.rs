use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::card::JiraCard;
use crate::domain::filter::CardQuery;
use crate::domain::teams::CardScheme;
use crate::infra::sample_cards::sample_cards;
use crate::services::IssueTrackerService;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardOrigin {
    Live,
    Sample,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardFetch {
    pub cards: Vec<JiraCard>,
    pub origin: CardOrigin,
    pub warning: Option<String>,
}

/// Dashboard-facing card loader. Never fails: when Jira is unconfigured or
/// unreachable it serves the fixed sample set and explains why.
#[derive(Clone)]
pub struct CardSource {
    tracker: Arc<dyn IssueTrackerService>,
    scheme: CardScheme,
}

impl CardSource {
    pub fn new(tracker: Arc<dyn IssueTrackerService>, scheme: CardScheme) -> Self {
        Self { tracker, scheme }
    }

    pub async fn fetch_cards(&self, query: &CardQuery) -> CardFetch {
        if !self.tracker.is_configured() {
            warn!("jira credentials missing; serving sample cards");
            return CardFetch {
                cards: sample_cards(self.scheme),
                origin: CardOrigin::Sample,
                warning: Some(
                    "JIRA_EMAIL or JIRA_API_TOKEN not set; showing sample cards.".to_string(),
                ),
            };
        }

        match self.tracker.search_cards(query).await {
            Ok(cards) => {
                info!(count = cards.len(), "loaded Jira cards");
                CardFetch {
                    cards,
                    origin: CardOrigin::Live,
                    warning: None,
                }
            }
            Err(err) => {
                warn!(error = %err, "falling back to sample cards");
                CardFetch {
                    cards: sample_cards(self.scheme),
                    origin: CardOrigin::Sample,
                    warning: Some(format!("Could not load cards from Jira ({err}); showing sample cards.")),
                }
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::error::{AppError, AppResult};

    pub(crate) struct FakeTracker {
        pub configured: bool,
        pub result: Mutex<Option<AppResult<Vec<JiraCard>>>>,
        pub calls: AtomicUsize,
    }

    impl FakeTracker {
        pub(crate) fn returning(result: AppResult<Vec<JiraCard>>) -> Self {
            Self {
                configured: true,
                result: Mutex::new(Some(result)),
                calls: AtomicUsize::new(0),
            }
        }

        pub(crate) fn unconfigured() -> Self {
            Self {
                configured: false,
                result: Mutex::new(None),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl IssueTrackerService for FakeTracker {
        async fn search_cards(&self, _query: &CardQuery) -> AppResult<Vec<JiraCard>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Ok(Vec::new()))
        }

        fn is_configured(&self) -> bool {
            self.configured
        }
    }

    #[tokio::test]
    async fn unconfigured_tracker_serves_samples_without_calling() {
        let tracker = Arc::new(FakeTracker::unconfigured());
        let source = CardSource::new(tracker.clone(), CardScheme::Portfolio);

        let fetch = source.fetch_cards(&CardQuery::default()).await;

        assert_eq!(fetch.cards, sample_cards(CardScheme::Portfolio));
        assert_eq!(fetch.origin, CardOrigin::Sample);
        assert_eq!(
            fetch.warning.as_deref(),
            Some("JIRA_EMAIL or JIRA_API_TOKEN not set; showing sample cards.")
        );
        assert_eq!(tracker.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn jira_failure_falls_back_with_warning() {
        let tracker = Arc::new(FakeTracker::returning(Err(AppError::JiraUnavailable(
            "Jira responded with 503 Service Unavailable".to_string(),
        ))));
        let source = CardSource::new(tracker, CardScheme::Legacy);

        let fetch = source.fetch_cards(&CardQuery::default()).await;

        assert_eq!(fetch.cards, sample_cards(CardScheme::Legacy));
        assert_eq!(fetch.origin, CardOrigin::Sample);
        assert!(fetch.warning.unwrap().contains("503"));
    }

    #[tokio::test]
    async fn live_cards_pass_through() {
        let live = sample_cards(CardScheme::Portfolio)[..2].to_vec();
        let tracker = Arc::new(FakeTracker::returning(Ok(live.clone())));
        let source = CardSource::new(tracker, CardScheme::Portfolio);

        let fetch = source.fetch_cards(&CardQuery::default()).await;

        assert_eq!(fetch.cards, live);
        assert_eq!(fetch.origin, CardOrigin::Live);
        assert!(fetch.warning.is_none());
    }
}
