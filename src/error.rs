use std::io;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing input: provide a ticket number or paste ticket content")]
    MissingInput,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    Network(String),
    #[error("{message}")]
    Service {
        message: String,
        suggestion: Option<String>,
    },
    #[error("no generated result available")]
    NoResult,
    #[error("jira unavailable: {0}")]
    JiraUnavailable(String),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
