//! Client-side error taxonomy.
//!
//! Transport failures, server-reported failures and local validation all end
//! up here so the UI can surface them the same way (a toast plus, for form
//! validation, inline field messages).

use shared::{RecordId, ValidationError};
use thiserror::Error;

pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Error)]
pub enum ClientError {
    /// Network failure, timeout or connection refused
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response
    #[error("Server error {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Server {
        status: u16,
        message: Option<String>,
    },

    /// 2xx response whose envelope says `success: false`
    #[error("Request rejected: {}", .message.as_deref().unwrap_or("no message"))]
    Rejected { message: Option<String> },

    /// Envelope claimed success but carried no `data`
    #[error("Response is missing its data payload")]
    MissingData,

    #[error("Failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Validation failed: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join(", "))]
    Validation(Vec<ValidationError>),

    #[error("No more pages to load")]
    NoMorePages,

    #[error("A page is already being loaded")]
    AlreadyLoading,

    #[error("Record {0} already has a request in flight")]
    RecordBusy(RecordId),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Text suitable for a toast notification
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Server {
                message: Some(message),
                ..
            }
            | ClientError::Rejected {
                message: Some(message),
            } => message.clone(),
            ClientError::Validation(errors) => errors
                .first()
                .map(|e| e.to_string())
                .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string()),
            ClientError::Transport(_) => {
                "Unable to reach the server. Check your connection.".to_string()
            }
            ClientError::NoMorePages
            | ClientError::AlreadyLoading
            | ClientError::RecordBusy(_) => self.to_string(),
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }

    /// Guard rejections that never reached the network
    pub fn is_guard(&self) -> bool {
        matches!(
            self,
            ClientError::NoMorePages | ClientError::AlreadyLoading | ClientError::RecordBusy(_)
        )
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
