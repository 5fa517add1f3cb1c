//! API client error types
//!
//! Every failure the inventory API can produce maps onto one recoverable
//! kind that the front-end can explain to the user. Nothing is retried
//! automatically.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when talking to the inventory API
#[derive(Error, Debug)]
pub enum ClientError {
    /// Could not connect to the API
    #[error("Inventory API unavailable")]
    Unavailable,

    #[error("Request timeout")]
    Timeout,

    /// Any other transport failure
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Missing, invalid or expired credentials (401/403)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Input rejected, locally or by the API (400/422)
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body did not match the expected shape
    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// The stored token is older than its lifetime
    #[error("Session expired, please log in again")]
    SessionExpired,
}

impl ClientError {
    /// Map a transport error onto the distinct connectivity kinds
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_connect() {
            ClientError::Unavailable
        } else {
            ClientError::Request(err)
        }
    }

    /// Map a non-success response onto an error kind
    ///
    /// `body` is the raw response text; the API's `detail` field is used as
    /// the message when present.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = extract_detail(body).unwrap_or_else(|| {
            if body.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string()
            } else {
                body.trim().to_string()
            }
        });

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ClientError::Unauthorized(message),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ClientError::Validation(message)
            }
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            _ => ClientError::Api {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// True when the user has to log in again
    pub fn requires_login(&self) -> bool {
        matches!(
            self,
            ClientError::Unauthorized(_) | ClientError::SessionExpired
        )
    }
}

/// Pull the human-readable message out of an API error body
///
/// Handles `{"detail": "..."}` and the request-validation shape
/// `{"detail": [{"loc": [...], "msg": "..."}]}`.
fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Array(items) => {
            let messages: Vec<String> = items
                .iter()
                .filter_map(|item| {
                    let msg = item.get("msg")?.as_str()?;
                    let field = item
                        .get("loc")
                        .and_then(|loc| loc.as_array())
                        .and_then(|loc| loc.last())
                        .and_then(|f| f.as_str());
                    Some(match field {
                        Some(f) => format!("{}: {}", f, msg),
                        None => msg.to_string(),
                    })
                })
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        _ => None,
    }
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;
