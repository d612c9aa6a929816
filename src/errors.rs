//! Error types for the smarttask engine
//!
//! Errors here cover the edges only: file I/O, request envelopes,
//! configuration, and the server itself. Task validation never fails;
//! malformed task fields become warnings and defaults instead.

use thiserror::Error;

/// Main error type for the task analysis pipeline
#[derive(Error, Debug)]
pub enum TaskError {
    /// Request envelope rejected before analysis ran
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// HTTP server errors
    #[error("Server error: {0}")]
    ServerError(String),

    /// Generic errors with context
    #[error("Task error: {0}")]
    Generic(String),
}

/// Result type alias for task operations
pub type Result<T> = std::result::Result<T, TaskError>;

/// Convert anyhow errors to TaskError
impl From<anyhow::Error> for TaskError {
    fn from(err: anyhow::Error) -> Self {
        TaskError::Generic(err.to_string())
    }
}
