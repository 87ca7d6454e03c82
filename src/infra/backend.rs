use async_trait::async_trait;
use reqwest::{
    Client, RequestBuilder, Response,
    header::{ACCEPT, CACHE_CONTROL, EXPIRES, PRAGMA},
};
use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::envelope::{
    FailureKind, GenerationOutcome, HealthStatus, ResponseEnvelope, ShareOutcome, TicketLookup,
};
use crate::domain::generation::{
    GenerationKind, GenerationRequest, GroomLevel, RoastLevel, RoastTheme,
};
use crate::services::{GenerationService, ShareRequest};

/// Client for the artifact generation backend. Every call resolves to an
/// outcome value; transport and decoding failures never escape as errors.
pub struct BackendClient {
    http: Client,
    api_base: String,
}

impl BackendClient {
    pub fn new(api_base: String) -> Self {
        Self {
            http: Client::new(),
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    #[cfg(test)]
    fn with_http(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.api_base)
    }

    fn network_message(kind: GenerationKind) -> String {
        format!("network error: could not reach the {}", kind.service_name())
    }

    fn build_generate(&self, request: &GenerationRequest) -> RequestBuilder {
        let kind = request.kind();
        let builder = self
            .http
            .post(self.endpoint(kind.endpoint()))
            .header(ACCEPT, "application/json");

        match request {
            GenerationRequest::TestScenario { ticket } => builder.json(&TestScenarioBody {
                ticket_number: ticket.ticket_id().unwrap_or_default(),
                acceptance_criteria: &ticket.content,
            }),
            GenerationRequest::Roast {
                ticket,
                theme,
                level,
            } => builder.json(&RoastBody {
                ticket_number: ticket.ticket_id().unwrap_or_default(),
                ticket_content: &ticket.content,
                theme: *theme,
                level: *level,
            }),
            GenerationRequest::Groom { ticket, level } => builder
                .header(CACHE_CONTROL, "no-cache, no-store, must-revalidate")
                .header(PRAGMA, "no-cache")
                .header(EXPIRES, "0")
                .json(&GroomBody {
                    ticket_number: ticket.ticket_id().unwrap_or_default(),
                    ticket_content: &ticket.content,
                    level: *level,
                    timestamp: chrono::Utc::now().timestamp_millis(),
                }),
        }
    }
}

/// Decodes an envelope from any status code; backends report failures in
/// the body as often as in the status line.
async fn read_envelope(response: Response) -> Result<ResponseEnvelope, String> {
    let status = response.status();
    match response.json::<ResponseEnvelope>().await {
        Ok(envelope) => Ok(envelope),
        Err(err) if status.is_success() => Err(format!("failed to parse response: {err}")),
        Err(_) => Err(format!("service responded with {status}")),
    }
}

#[async_trait]
impl GenerationService for BackendClient {
    async fn generate(&self, request: &GenerationRequest) -> GenerationOutcome {
        let kind = request.kind();
        debug!(kind = kind.as_str(), "sending generation request");

        let response = match self.build_generate(request).send().await {
            Ok(response) => response,
            Err(err) => {
                warn!(kind = kind.as_str(), error = %err, "generation request failed");
                return GenerationOutcome::network_failure(Self::network_message(kind));
            }
        };

        match read_envelope(response).await {
            Ok(envelope) => GenerationOutcome::from_envelope(kind, envelope),
            Err(message) => {
                warn!(kind = kind.as_str(), %message, "unreadable generation response");
                GenerationOutcome::service_failure(message)
            }
        }
    }

    async fn health_check(&self) -> HealthStatus {
        let response = match self.http.get(self.endpoint("/health")).send().await {
            Ok(response) => response,
            Err(err) => {
                debug!(error = %err, "health check failed");
                return HealthStatus { success: false };
            }
        };

        let success = read_envelope(response)
            .await
            .map(|envelope| envelope.success)
            .unwrap_or(false);
        HealthStatus { success }
    }

    async fn fetch_ticket(&self, ticket_number: &str) -> TicketLookup {
        let ticket_number = ticket_number.trim();
        if ticket_number.is_empty() {
            return TicketLookup::Failure {
                kind: FailureKind::Service,
                message: "a ticket number is required".to_string(),
            };
        }

        let mut url = match reqwest::Url::parse(&self.endpoint("/jira/ticket")) {
            Ok(url) => url,
            Err(err) => {
                return TicketLookup::Failure {
                    kind: FailureKind::Network,
                    message: format!("invalid API base: {err}"),
                };
            }
        };
        match url.path_segments_mut() {
            // Percent-encodes anything that would change the route.
            Ok(mut segments) => {
                segments.push(ticket_number);
            }
            Err(()) => {
                return TicketLookup::Failure {
                    kind: FailureKind::Network,
                    message: format!("invalid API base: {}", self.api_base),
                };
            }
        }

        let response = match self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                warn!(ticket = ticket_number, error = %err, "ticket lookup failed");
                return TicketLookup::Failure {
                    kind: FailureKind::Network,
                    message: "network error: could not reach the ticket service".to_string(),
                };
            }
        };

        match read_envelope(response).await {
            Ok(ResponseEnvelope {
                success: true,
                data: Some(data),
                ..
            }) => TicketLookup::Found(data),
            Ok(envelope) => TicketLookup::Failure {
                kind: FailureKind::Service,
                message: envelope
                    .error
                    .unwrap_or_else(|| format!("ticket {ticket_number} not found")),
            },
            Err(message) => TicketLookup::Failure {
                kind: FailureKind::Service,
                message,
            },
        }
    }

    async fn share(&self, request: &ShareRequest) -> ShareOutcome {
        let response = match self
            .http
            .post(self.endpoint("/teams/share"))
            .header(ACCEPT, "application/json")
            .json(request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, "share request failed");
                return ShareOutcome::Failure {
                    kind: FailureKind::Network,
                    message: "network error: could not reach the share service".to_string(),
                };
            }
        };

        match read_envelope(response).await {
            Ok(envelope) if envelope.success => ShareOutcome::Shared,
            Ok(envelope) => ShareOutcome::Failure {
                kind: FailureKind::Service,
                message: envelope
                    .error
                    .unwrap_or_else(|| "share failed".to_string()),
            },
            Err(message) => ShareOutcome::Failure {
                kind: FailureKind::Service,
                message,
            },
        }
    }
}

#[derive(Serialize)]
struct TestScenarioBody<'a> {
    ticket_number: &'a str,
    acceptance_criteria: &'a str,
}

#[derive(Serialize)]
struct RoastBody<'a> {
    ticket_number: &'a str,
    ticket_content: &'a str,
    theme: RoastTheme,
    level: RoastLevel,
}

#[derive(Serialize)]
struct GroomBody<'a> {
    ticket_number: &'a str,
    ticket_content: &'a str,
    level: GroomLevel,
    timestamp: i64,
}
