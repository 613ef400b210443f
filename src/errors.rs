//! Error handling for list-view fetches.
//!
//! Fetch failures are surfaced to the view in place of the table; the query
//! state and URL are deliberately left untouched so the user's filters
//! survive a failed request. Internal details (connection errors, body
//! snippets) are logged via `tracing` and never included in user-facing
//! messages.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::fmt;

/// Error from the data-fetch collaborator.
#[derive(Debug)]
pub enum ListError {
    /// The backend answered with a non-success status.
    Upstream {
        /// Status returned by the backend.
        status: StatusCode,
        /// User-facing message.
        message: String,
    },

    /// The backend could not be reached.
    Transport {
        /// User-facing generic message.
        message: String,
        /// Internal error (logged, not sent to the user).
        internal: Option<String>,
    },

    /// The backend's reply could not be decoded into a page of rows.
    Decode {
        /// User-facing generic message.
        message: String,
        /// Internal error (logged, not sent to the user).
        internal: Option<String>,
    },
}

impl ListError {
    /// Create an error for a non-success backend status.
    pub fn upstream(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
        }
    }

    /// Create a transport error with optional internal details.
    ///
    /// # Example
    /// ```rust,ignore
    /// let page = client.get(url).send().await
    ///     .map_err(|err| ListError::transport("Could not load the list", Some(err.to_string())))?;
    /// ```
    pub fn transport(message: impl Into<String>, internal: Option<String>) -> Self {
        Self::Transport {
            message: message.into(),
            internal,
        }
    }

    /// Create a decode error with optional internal details.
    pub fn decode(message: impl Into<String>, internal: Option<String>) -> Self {
        Self::Decode {
            message: message.into(),
            internal,
        }
    }

    /// HTTP status used when this error is converted into a response.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Upstream { status, .. } => *status,
            Self::Transport { .. } => StatusCode::BAD_GATEWAY,
            Self::Decode { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The user-facing message (sanitized).
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Upstream { message, .. }
            | Self::Transport { message, .. }
            | Self::Decode { message, .. } => message,
        }
    }

    /// Log internal error details. Only the sanitized message is ever sent
    /// to the user.
    pub fn log_internal(&self) {
        match self {
            Self::Upstream { status, message } => {
                tracing::error!(status = %status, message = %message, "upstream list fetch failed");
            }
            Self::Transport {
                internal: Some(details),
                ..
            } => {
                tracing::error!(details = %details, "list fetch transport error");
            }
            Self::Decode {
                internal: Some(details),
                ..
            } => {
                tracing::error!(details = %details, "list reply decode error");
            }
            _ => {
                tracing::error!(error = %self.user_message(), "list fetch failed");
            }
        }
    }
}

/// Error body sent to users (sanitized).
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ListError {
    fn into_response(self) -> Response {
        self.log_internal();
        let response = ErrorResponse {
            error: self.user_message().to_string(),
        };
        (self.status_code(), Json(response)).into_response()
    }
}

impl fmt::Display for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl std::error::Error for ListError {}
