//! Error types for cronograma.

use thiserror::Error;

/// Errors that can occur while loading, persisting or configuring the schedule.
#[derive(Error, Debug)]
pub enum CronogramaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Schedule source answered with HTTP {0}")]
    HttpStatus(u16),

    #[error("Invalid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid schedule shape: {0}")]
    Shape(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for CronogramaError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => CronogramaError::HttpStatus(status.as_u16()),
            None => CronogramaError::Transport(e.to_string()),
        }
    }
}

/// Result type alias for cronograma operations.
pub type CronogramaResult<T> = Result<T, CronogramaError>;
