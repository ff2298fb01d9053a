// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client error types with consistent user-facing messages.

use reqwest::StatusCode;
use serde::Deserialize;

/// Error returned by every API call and screen in the client.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {message}")]
    Api {
        status: StatusCode,
        /// Server-provided `message`/`detail`, or the raw body.
        message: String,
        /// True when `message` came from a `message` or `detail` field.
        from_server: bool,
    },

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Invalid or missing token: {0}")]
    InvalidToken(String),

    #[error("Missing required fields: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("Session expired")]
    SessionExpired,

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Error body shapes the backend is known to send.
#[derive(Deserialize, Default)]
struct ErrorBody {
    message: Option<String>,
    detail: Option<String>,
}

impl AppError {
    /// Build an `Api` error from a non-2xx status and its raw body.
    ///
    /// `message` is preferred over `detail`; bodies that are not JSON are kept
    /// verbatim for logging but never shown to the user.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
        match parsed.message.or(parsed.detail) {
            Some(message) => AppError::Api {
                status,
                message,
                from_server: true,
            },
            None => AppError::Api {
                status,
                message: body.to_string(),
                from_server: false,
            },
        }
    }

    /// Text to show in an alert, falling back to `fallback` when the server
    /// gave nothing usable.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            AppError::Api {
                message,
                from_server: true,
                ..
            } => message.clone(),
            AppError::Auth(reason) => format!("{fallback} {reason}"),
            AppError::Validation(_) => "Please fill in all required fields.".to_string(),
            AppError::SessionExpired => {
                "Your session has expired. Please log in again.".to_string()
            }
            _ => fallback.to_string(),
        }
    }

    /// Whether the error means the user must log in again.
    pub fn is_session_error(&self) -> bool {
        matches!(self, AppError::SessionExpired | AppError::InvalidToken(_))
            || matches!(self, AppError::Api { status, .. } if *status == StatusCode::UNAUTHORIZED)
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::Decode(err.to_string())
        } else {
            AppError::Network(err.to_string())
        }
    }
}

/// Request structs that fail `validator` checks report the offending fields.
impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|name| name.to_string())
            .collect();
        fields.sort();
        AppError::Validation(fields)
    }
}

/// Result type alias for API calls and screens
pub type Result<T> = std::result::Result<T, AppError>;
