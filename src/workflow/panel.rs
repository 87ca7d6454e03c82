//! Generation panel state machine.
//!
//! One [`PanelController`] drives every artifact kind; what differs between
//! test scenarios, roasts and grooming lives in [`PanelConfig`] and
//! [`PanelOptions`].
//!
//! ```text
//! Idle -> Validating -> Loading -> Success | Failure
//!   ^         |                        |
//!   +---------+  (missing input)       +--> Idle on the next edit
//! ```

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::domain::envelope::{FailureKind, GenerationOutcome};
use crate::domain::generation::{
    GenerationKind, GenerationRequest, GroomLevel, RoastLevel, RoastTheme,
};
use crate::domain::ticket::TicketReference;
use crate::error::{AppError, AppResult, ValidationError};
use crate::export::write_export;
use crate::format::{DisplayBlock, Formatter};
use crate::services::{GenerationService, ShareRequest};
use crate::workflow::validation::validate;

pub const SUCCESS_INDICATOR_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelConfig {
    pub kind: GenerationKind,
    pub title: &'static str,
    pub export_prefix: &'static str,
    pub formatter: Formatter,
}

impl PanelConfig {
    pub fn for_kind(kind: GenerationKind) -> Self {
        match kind {
            GenerationKind::TestScenario => Self {
                kind,
                title: "Test Scenarios",
                export_prefix: "test-scenarios",
                formatter: Formatter::Lines,
            },
            GenerationKind::Roast => Self {
                kind,
                title: "Epic Roast",
                export_prefix: "epic-roast",
                formatter: Formatter::Lines,
            },
            GenerationKind::Groom => Self {
                kind,
                title: "Groom Room",
                export_prefix: "groom-room",
                formatter: Formatter::Markdown,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelOptions {
    None,
    Roast { theme: RoastTheme, level: RoastLevel },
    Groom { level: GroomLevel },
}

impl PanelOptions {
    pub fn default_for(kind: GenerationKind) -> Self {
        match kind {
            GenerationKind::TestScenario => PanelOptions::None,
            GenerationKind::Roast => PanelOptions::Roast {
                theme: RoastTheme::default(),
                level: RoastLevel::default(),
            },
            GenerationKind::Groom => PanelOptions::Groom {
                level: GroomLevel::default(),
            },
        }
    }

    fn fits(&self, kind: GenerationKind) -> bool {
        matches!(
            (self, kind),
            (PanelOptions::None, GenerationKind::TestScenario)
                | (PanelOptions::Roast { .. }, GenerationKind::Roast)
                | (PanelOptions::Groom { .. }, GenerationKind::Groom)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Idle,
    Validating,
    Loading,
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    pub raw: String,
    pub blocks: Vec<DisplayBlock>,
    pub ticket_id: Option<String>,
}

/// A request that passed validation. The token ties its response back to the
/// submission that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    token: u64,
    pub request: GenerationRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// A newer submission was issued; the response was dropped.
    Stale,
}

#[derive(Debug, Clone)]
pub struct PanelController {
    config: PanelConfig,
    ticket: TicketReference,
    options: PanelOptions,
    state: PanelState,
    validation_error: Option<ValidationError>,
    error: Option<String>,
    failure_kind: Option<FailureKind>,
    suggestion: Option<String>,
    result: Option<GeneratedArtifact>,
    succeeded_at: Option<Instant>,
    latest_token: u64,
}

impl PanelController {
    pub fn new(config: PanelConfig) -> Self {
        Self {
            config,
            ticket: TicketReference::default(),
            options: PanelOptions::default_for(config.kind),
            state: PanelState::Idle,
            validation_error: None,
            error: None,
            failure_kind: None,
            suggestion: None,
            result: None,
            succeeded_at: None,
            latest_token: 0,
        }
    }

    pub fn for_kind(kind: GenerationKind) -> Self {
        Self::new(PanelConfig::for_kind(kind))
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn ticket(&self) -> &TicketReference {
        &self.ticket
    }

    pub fn validation_error(&self) -> Option<&ValidationError> {
        self.validation_error.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn suggestion(&self) -> Option<&str> {
        self.suggestion.as_deref()
    }

    /// The failed outcome as an error, for callers that need an exit status.
    pub fn failure(&self) -> Option<AppError> {
        let message = self.error()?.to_string();
        GenerationOutcome::Failure {
            kind: self.failure_kind.unwrap_or(FailureKind::Service),
            message,
            suggestion: self.suggestion.clone(),
        }
        .into_result()
        .err()
    }

    pub fn result(&self) -> Option<&GeneratedArtifact> {
        self.result.as_ref()
    }

    pub fn set_ticket_id(&mut self, ticket_id: impl Into<String>) {
        self.ticket.ticket_id = ticket_id.into();
        self.after_edit();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.ticket.content = content.into();
        self.after_edit();
    }

    pub fn set_options(&mut self, options: PanelOptions) -> AppResult<()> {
        if !options.fits(self.config.kind) {
            return Err(AppError::Configuration(format!(
                "options {options:?} do not apply to {}",
                self.config.kind.as_str()
            )));
        }
        self.options = options;
        self.after_edit();
        Ok(())
    }

    fn after_edit(&mut self) {
        if matches!(self.state, PanelState::Success | PanelState::Failure) {
            self.state = PanelState::Idle;
        }
        if self.validation_error.is_some()
            && validate(&self.ticket.ticket_id, &self.ticket.content).is_ok()
        {
            self.validation_error = None;
        }
    }

    fn build_request(&self) -> GenerationRequest {
        let ticket = self.ticket.clone();
        match self.options {
            PanelOptions::Roast { theme, level } => GenerationRequest::Roast {
                ticket,
                theme,
                level,
            },
            PanelOptions::Groom { level } => GenerationRequest::Groom { ticket, level },
            PanelOptions::None => GenerationRequest::TestScenario { ticket },
        }
    }

    /// Validates the current input and, if it passes, moves to `Loading` and
    /// hands back the request to send. Does not lock out a second submit
    /// while one is in flight; the later submission simply wins.
    pub fn begin_submit(&mut self) -> Result<PendingRequest, ValidationError> {
        self.state = PanelState::Validating;
        if let Err(err) = validate(&self.ticket.ticket_id, &self.ticket.content) {
            self.state = PanelState::Idle;
            self.validation_error = Some(err.clone());
            return Err(err);
        }

        self.validation_error = None;
        self.error = None;
        self.failure_kind = None;
        self.suggestion = None;
        self.result = None;
        self.succeeded_at = None;
        self.state = PanelState::Loading;
        self.latest_token += 1;

        Ok(PendingRequest {
            token: self.latest_token,
            request: self.build_request(),
        })
    }

    /// Applies a response. `publish` receives the ticket id of a successful
    /// request so the owner can share it with sibling panels.
    pub fn complete<F>(
        &mut self,
        pending: PendingRequest,
        outcome: GenerationOutcome,
        now: Instant,
        publish: F,
    ) -> Completion
    where
        F: FnOnce(&str),
    {
        if pending.token != self.latest_token {
            debug!(
                kind = self.config.kind.as_str(),
                token = pending.token,
                latest = self.latest_token,
                "dropping stale response"
            );
            return Completion::Stale;
        }

        match outcome {
            GenerationOutcome::Success(raw) => {
                let ticket_id = pending.request.ticket().ticket_id().map(str::to_string);
                let blocks = self.config.formatter.apply(&raw);
                self.result = Some(GeneratedArtifact {
                    raw,
                    blocks,
                    ticket_id: ticket_id.clone(),
                });
                self.state = PanelState::Success;
                self.succeeded_at = Some(now);
                if let Some(ticket_id) = ticket_id {
                    publish(&ticket_id);
                }
            }
            GenerationOutcome::Failure {
                kind,
                message,
                suggestion,
            } => {
                self.error = Some(message);
                self.failure_kind = Some(kind);
                self.suggestion = suggestion;
                self.state = PanelState::Failure;
            }
        }
        Completion::Applied
    }

    pub async fn submit<F>(
        &mut self,
        service: &dyn GenerationService,
        publish: F,
    ) -> Result<Completion, ValidationError>
    where
        F: FnOnce(&str),
    {
        let pending = self.begin_submit()?;
        let outcome = service.generate(&pending.request).await;
        Ok(self.complete(pending, outcome, Instant::now(), publish))
    }

    pub fn success_indicator_visible(&self, now: Instant) -> bool {
        self.state == PanelState::Success
            && self
                .succeeded_at
                .is_some_and(|at| now.saturating_duration_since(at) < SUCCESS_INDICATOR_TTL)
    }

    pub fn export(&self, dir: &Path) -> AppResult<PathBuf> {
        let result = self.result.as_ref().ok_or(AppError::NoResult)?;
        write_export(
            dir,
            self.config.export_prefix,
            result.ticket_id.as_deref(),
            &result.raw,
        )
    }

    pub fn share_request(&self) -> Option<ShareRequest> {
        self.result.as_ref().map(|result| ShareRequest {
            artifact_type: self.config.kind.as_str().to_string(),
            content: result.raw.clone(),
            ticket_number: result.ticket_id.clone(),
        })
    }
}
