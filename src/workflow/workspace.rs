use crate::domain::filter::{FilterState, StatusFilter, TeamFilter};
use crate::domain::generation::GenerationKind;
use crate::error::ValidationError;
use crate::services::GenerationService;
use crate::workflow::cards::CardSource;
use crate::workflow::dashboard::DashboardController;
use crate::workflow::panel::{Completion, PanelController};

/// Owns the panels, the dashboard and the one piece of state they share: the
/// active ticket key. Panels never hold it themselves; they report it through
/// a callback and receive it back as a plain value.
pub struct Workspace {
    panels: [PanelController; 3],
    dashboard: DashboardController,
    active_ticket: Option<String>,
}

impl Workspace {
    pub fn new(filter: FilterState) -> Self {
        Self {
            panels: GenerationKind::ALL.map(PanelController::for_kind),
            dashboard: DashboardController::new(filter),
            active_ticket: None,
        }
    }

    fn panel_index(kind: GenerationKind) -> usize {
        GenerationKind::ALL
            .iter()
            .position(|candidate| *candidate == kind)
            .unwrap_or_default()
    }

    pub fn panel(&self, kind: GenerationKind) -> &PanelController {
        &self.panels[Self::panel_index(kind)]
    }

    pub fn panel_mut(&mut self, kind: GenerationKind) -> &mut PanelController {
        &mut self.panels[Self::panel_index(kind)]
    }

    pub fn dashboard(&self) -> &DashboardController {
        &self.dashboard
    }

    pub fn active_ticket(&self) -> Option<&str> {
        self.active_ticket.as_deref()
    }

    /// Last writer wins. Every panel whose ticket input differs picks up the key.
    pub fn publish_ticket(&mut self, ticket: &str) {
        let ticket = ticket.trim();
        if ticket.is_empty() {
            return;
        }
        self.active_ticket = Some(ticket.to_string());
        for panel in &mut self.panels {
            if panel.ticket().ticket_id.trim() != ticket {
                panel.set_ticket_id(ticket);
            }
        }
    }

    /// Returns whether the dashboard refetched.
    pub async fn filter_dashboard(
        &mut self,
        team: TeamFilter,
        status: StatusFilter,
        source: &CardSource,
    ) -> bool {
        self.dashboard.apply_filter(team, status, source).await
    }

    pub fn search_dashboard(&mut self, term: impl Into<String>) {
        self.dashboard.set_search(term);
    }

    pub fn select_card(&mut self, key: &str) -> bool {
        let mut selected = None;
        let found = self
            .dashboard
            .select(key, |key| selected = Some(key.to_string()));
        if let Some(key) = selected {
            self.publish_ticket(&key);
        }
        found
    }

    pub async fn submit(
        &mut self,
        kind: GenerationKind,
        service: &dyn GenerationService,
    ) -> Result<Completion, ValidationError> {
        let mut published = None;
        let completion = self
            .panel_mut(kind)
            .submit(service, |ticket| published = Some(ticket.to_string()))
            .await?;
        if let Some(ticket) = published {
            self.publish_ticket(&ticket);
        }
        Ok(completion)
    }
}
