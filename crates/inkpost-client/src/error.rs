use inkpost_shared::ValidationError;
use inkpost_store::StoreError;
use reqwest::StatusCode;
use thiserror::Error;

/// Message shown for transport failures on user-triggered actions.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please try again.";

/// Message shown when an action needs a session and there is none.
pub const LOGIN_REQUIRED_MESSAGE: &str = "Please login to continue.";

#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport failure: connection refused, timeout, TLS, ...
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API responded {status}{}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Api {
        status: StatusCode,
        /// The `message` field of the error body, when there was one.
        message: Option<String>,
    },

    /// The response body did not have the expected shape.
    #[error("Invalid response: {0}")]
    Decode(String),

    /// Client-side validation blocked the request.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No token in the session; the caller should send the user to login.
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Session store error: {0}")]
    Store(#[from] StoreError),
}

impl ClientError {
    /// Text for an inline message or toast: the server's own message when
    /// it sent one, otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Api {
                message: Some(message),
                ..
            } if !message.is_empty() => message.clone(),
            ClientError::Network(_) => NETWORK_ERROR_MESSAGE.to_string(),
            ClientError::NotAuthenticated => LOGIN_REQUIRED_MESSAGE.to_string(),
            ClientError::Validation(errors) => errors
                .fields()
                .next()
                .map(|(_, message)| message.to_string())
                .unwrap_or_else(|| fallback.to_string()),
            _ => fallback.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Api { status, .. } if *status == StatusCode::NOT_FOUND)
    }

    /// Whether the API refused the caller's identity: 401, 403, or 404 for
    /// a user lookup keyed on the session's own email.
    pub fn is_session_rejected(&self) -> bool {
        matches!(
            self,
            ClientError::Api { status, .. }
                if matches!(
                    *status,
                    StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND
                )
        )
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ClientError>;
