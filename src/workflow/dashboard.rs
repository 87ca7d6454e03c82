use chrono::{DateTime, Utc};

use crate::domain::card::JiraCard;
use crate::domain::filter::{FilterState, StatusFilter, TeamFilter};
use crate::workflow::cards::{CardOrigin, CardSource};

#[derive(Debug, Clone, Default)]
pub struct DashboardController {
    cards: Vec<JiraCard>,
    filter: FilterState,
    warning: Option<String>,
    origin: Option<CardOrigin>,
    last_refreshed: Option<DateTime<Utc>>,
}

impl DashboardController {
    pub fn new(filter: FilterState) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    pub fn cards(&self) -> &[JiraCard] {
        &self.cards
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    pub fn origin(&self) -> Option<CardOrigin> {
        self.origin
    }

    pub fn last_refreshed(&self) -> Option<DateTime<Utc>> {
        self.last_refreshed
    }

    /// Reloads with the current team/status filter and replaces the whole set.
    pub async fn refresh(&mut self, source: &CardSource) {
        let fetch = source.fetch_cards(&self.filter.query()).await;
        self.cards = fetch.cards;
        self.warning = fetch.warning;
        self.origin = Some(fetch.origin);
        self.last_refreshed = Some(Utc::now());
    }

    /// Returns whether the filter changed and a refresh is due.
    pub fn set_team(&mut self, team: TeamFilter) -> bool {
        if self.filter.team == team {
            return false;
        }
        self.filter.team = team;
        true
    }

    pub fn set_status(&mut self, status: StatusFilter) -> bool {
        if self.filter.status == status {
            return false;
        }
        self.filter.status = status;
        true
    }

    /// Sets both filters and refetches once if either changed or nothing has
    /// been loaded yet. Returns whether a fetch happened.
    pub async fn apply_filter(
        &mut self,
        team: TeamFilter,
        status: StatusFilter,
        source: &CardSource,
    ) -> bool {
        let team_changed = self.set_team(team);
        let status_changed = self.set_status(status);
        if !team_changed && !status_changed && self.last_refreshed.is_some() {
            return false;
        }
        self.refresh(source).await;
        true
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.filter.search_term = term.into();
    }

    pub fn visible_cards(&self) -> Vec<&JiraCard> {
        self.cards
            .iter()
            .filter(|card| card.matches_search(&self.filter.search_term))
            .collect()
    }

    /// Publishes `key` when it names a loaded card.
    pub fn select<F>(&self, key: &str, publish: F) -> bool
    where
        F: FnOnce(&str),
    {
        match self
            .cards
            .iter()
            .find(|card| card.key.eq_ignore_ascii_case(key.trim()))
        {
            Some(card) => {
                publish(&card.key);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::domain::teams::CardScheme;
    use crate::infra::sample_cards::sample_cards;
    use crate::workflow::cards::tests::FakeTracker;

    fn source_with(tracker: Arc<FakeTracker>) -> CardSource {
        CardSource::new(tracker, CardScheme::Portfolio)
    }

    async fn loaded_dashboard() -> DashboardController {
        let source = source_with(Arc::new(FakeTracker::unconfigured()));
        let mut dashboard = DashboardController::default();
        dashboard.refresh(&source).await;
        dashboard
    }

    #[tokio::test]
    async fn refresh_replaces_cards_and_stamps_time() {
        let dashboard = loaded_dashboard().await;

        assert_eq!(dashboard.cards().len(), 5);
        assert_eq!(dashboard.origin(), Some(CardOrigin::Sample));
        assert!(dashboard.warning().is_some());
        assert!(dashboard.last_refreshed().is_some());
    }

    #[tokio::test]
    async fn search_matches_single_summary() {
        let mut dashboard = loaded_dashboard().await;

        dashboard.set_search("SKELETON loaders");
        let visible = dashboard.visible_cards();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].key, "ODWEB-1187");

        dashboard.set_search("no such phrase");
        assert!(dashboard.visible_cards().is_empty());

        dashboard.set_search("");
        assert_eq!(dashboard.visible_cards().len(), 5);
    }

    #[tokio::test]
    async fn search_covers_key_and_assignee() {
        let mut dashboard = loaded_dashboard().await;

        dashboard.set_search("plat-22");
        assert_eq!(dashboard.visible_cards().len(), 1);

        dashboard.set_search("ortiz");
        assert_eq!(dashboard.visible_cards()[0].key, "MOB-778");
    }

    #[tokio::test]
    async fn filter_change_triggers_a_single_refetch() {
        let tracker = Arc::new(FakeTracker::returning(Ok(sample_cards(
            CardScheme::Portfolio,
        ))));
        let source = source_with(tracker.clone());
        let mut dashboard = DashboardController::default();

        assert!(
            dashboard
                .apply_filter(TeamFilter::All, StatusFilter::ReadyForDev, &source)
                .await
        );
        assert!(
            !dashboard
                .apply_filter(TeamFilter::All, StatusFilter::ReadyForDev, &source)
                .await
        );
        assert_eq!(tracker.calls.load(Ordering::SeqCst), 1);

        dashboard
            .apply_filter(
                TeamFilter::Team("mobile".into()),
                StatusFilter::ReadyForDev,
                &source,
            )
            .await;
        assert_eq!(tracker.calls.load(Ordering::SeqCst), 2);
        assert_eq!(dashboard.filter().team, TeamFilter::Team("mobile".into()));
        // The fake hands out its cards once; the second refresh replaced them.
        assert!(dashboard.cards().is_empty());
    }

    #[tokio::test]
    async fn first_apply_loads_even_with_default_filter() {
        let tracker = Arc::new(FakeTracker::returning(Ok(sample_cards(
            CardScheme::Portfolio,
        ))));
        let source = source_with(tracker.clone());
        let mut dashboard = DashboardController::default();

        assert!(
            dashboard
                .apply_filter(TeamFilter::All, StatusFilter::ReadyToGroom, &source)
                .await
        );
        assert_eq!(tracker.calls.load(Ordering::SeqCst), 1);
        assert_eq!(dashboard.origin(), Some(CardOrigin::Live));
    }

    #[tokio::test]
    async fn selecting_a_loaded_card_publishes_its_key() {
        let dashboard = loaded_dashboard().await;

        let mut published = None;
        assert!(dashboard.select("apps-412", |key| published = Some(key.to_string())));
        assert_eq!(published.as_deref(), Some("APPS-412"));

        assert!(!dashboard.select("NOPE-1", |_| panic!("unknown card published")));
    }
}
