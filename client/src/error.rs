//! Error types for the newsfeed client
//!
//! - `ClientError`: backend HTTP client errors
//! - `AppError`: controller errors, each of which ends up as a notification
//! - `ParseError`: text command parsing errors

use thiserror::Error;

/// Newsfeed backend client errors
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The backend answered `{"success": false, "message": ...}`
    #[error("{0}")]
    Rejected(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),
}

impl ClientError {
    /// Text suitable for the notification banner
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Rejected(msg) => msg.clone(),
            ClientError::Api { status, message } if !message.trim().is_empty() => {
                format!("Server error ({}): {}", status, message.trim())
            }
            ClientError::Api { status, .. } => format!("Server error ({})", status),
            ClientError::Request(_) => "Could not reach the server".to_string(),
            ClientError::Deserialization(_) => "Unexpected response from the server".to_string(),
            ClientError::InvalidConfig(msg) => msg.clone(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Api { status: 404, .. })
    }
}

/// Controller errors
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error(transparent)]
    Client(#[from] ClientError),
}

impl AppError {
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) | AppError::Forbidden(msg) => msg.clone(),
            AppError::Client(e) => e.user_message(),
        }
    }
}

/// Parse error for text commands
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Missing argument for: {0}")]
    MissingArgument(String),
}
