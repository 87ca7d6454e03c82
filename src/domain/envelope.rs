use serde::Deserialize;
use serde_json::Value;

use crate::domain::generation::GenerationKind;
use crate::error::AppError;

/// Wire shape shared by every backend response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub suggestion: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Network,
    Service,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    Success(String),
    Failure {
        kind: FailureKind,
        message: String,
        suggestion: Option<String>,
    },
}

impl GenerationOutcome {
    pub fn service_failure(message: impl Into<String>) -> Self {
        GenerationOutcome::Failure {
            kind: FailureKind::Service,
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn network_failure(message: impl Into<String>) -> Self {
        GenerationOutcome::Failure {
            kind: FailureKind::Network,
            message: message.into(),
            suggestion: None,
        }
    }

    /// Normalizes a decoded envelope. A `success` envelope without the
    /// kind's payload field is treated as a service failure.
    pub fn from_envelope(kind: GenerationKind, envelope: ResponseEnvelope) -> Self {
        if !envelope.success {
            return GenerationOutcome::Failure {
                kind: FailureKind::Service,
                message: envelope
                    .error
                    .filter(|message| !message.trim().is_empty())
                    .unwrap_or_else(|| "request failed".to_string()),
                suggestion: envelope.suggestion,
            };
        }

        let field = kind.data_field();
        match envelope
            .data
            .as_ref()
            .and_then(|data| data.get(field))
            .and_then(payload_text)
        {
            Some(text) => GenerationOutcome::Success(text),
            None => Self::service_failure(format!("response did not include {field}")),
        }
    }

    pub fn into_result(self) -> Result<String, AppError> {
        match self {
            GenerationOutcome::Success(text) => Ok(text),
            GenerationOutcome::Failure {
                kind: FailureKind::Network,
                message,
                ..
            } => Err(AppError::Network(message)),
            GenerationOutcome::Failure {
                kind: FailureKind::Service,
                message,
                suggestion,
            } => Err(AppError::Service {
                message,
                suggestion,
            }),
        }
    }
}

fn payload_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        Value::Array(items) if items.iter().all(Value::is_string) => Some(
            items
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join("\n"),
        ),
        other => serde_json::to_string_pretty(other).ok(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketLookup {
    Found(Value),
    Failure {
        kind: FailureKind,
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared,
    Failure {
        kind: FailureKind,
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthStatus {
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn envelope(value: Value) -> ResponseEnvelope {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn success_takes_kind_specific_field() {
        let outcome = GenerationOutcome::from_envelope(
            GenerationKind::TestScenario,
            envelope(json!({"success": true, "data": {"scenarios": "# Title\n- item one"}})),
        );
        assert_eq!(
            outcome,
            GenerationOutcome::Success("# Title\n- item one".to_string())
        );
    }

    #[test]
    fn success_without_payload_is_a_failure() {
        let outcome = GenerationOutcome::from_envelope(
            GenerationKind::Roast,
            envelope(json!({"success": true, "data": {"scenarios": "wrong field"}})),
        );
        assert_eq!(
            outcome,
            GenerationOutcome::service_failure("response did not include roast")
        );
    }

    #[test]
    fn failure_forwards_error_and_suggestion() {
        let outcome = GenerationOutcome::from_envelope(
            GenerationKind::Groom,
            envelope(json!({
                "success": false,
                "error": "Ticket not found",
                "suggestion": "Paste the ticket content instead"
            })),
        );
        assert_eq!(
            outcome,
            GenerationOutcome::Failure {
                kind: FailureKind::Service,
                message: "Ticket not found".to_string(),
                suggestion: Some("Paste the ticket content instead".to_string()),
            }
        );
    }

    #[test]
    fn failure_without_message_gets_a_generic_one() {
        let outcome =
            GenerationOutcome::from_envelope(GenerationKind::Roast, envelope(json!({"success": false})));
        assert_eq!(outcome, GenerationOutcome::service_failure("request failed"));
    }

    #[test]
    fn string_arrays_are_joined_by_line() {
        let outcome = GenerationOutcome::from_envelope(
            GenerationKind::TestScenario,
            envelope(json!({"success": true, "data": {"scenarios": ["- one", "- two"]}})),
        );
        assert_eq!(outcome, GenerationOutcome::Success("- one\n- two".to_string()));
    }

    #[test]
    fn into_result_maps_failure_kinds() {
        let err = GenerationOutcome::network_failure("offline")
            .into_result()
            .unwrap_err();
        assert!(matches!(err, AppError::Network(message) if message == "offline"));
    }
}
