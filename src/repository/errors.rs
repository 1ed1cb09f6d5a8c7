use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Entity not found")]
    NotFound,

    #[error("Backend error: {0}")]
    BackendError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Access denied: {0}")]
    Unauthorized(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Pulls a human readable message out of an API error body.
///
/// Looks at `detail`, then `message`, then the first entry of a Laravel style
/// `errors` map.
pub fn extract_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;

    for key in ["detail", "message"] {
        if let Some(text) = value.get(key).and_then(Value::as_str) {
            let text = text.trim();
            if !text.is_empty() {
                return Some(text.to_string());
            }
        }
    }

    let first_error = match value.get("errors")? {
        Value::Object(fields) => fields.values().next().cloned(),
        Value::Array(items) => items.first().cloned(),
        _ => None,
    }?;

    match first_error {
        Value::String(text) => Some(text),
        Value::Array(messages) => messages
            .first()
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}

impl RepositoryError {
    /// Maps a non-success response to an error, preferring the message the
    /// backend supplied.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let message = extract_error_message(body)
            .unwrap_or_else(|| format!("Unexpected error (status {})", status.as_u16()));

        match status {
            StatusCode::NOT_FOUND => RepositoryError::NotFound,
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                RepositoryError::ValidationError(message)
            }
            StatusCode::CONFLICT => RepositoryError::ConstraintViolation(message),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                RepositoryError::Unauthorized(message)
            }
            _ => RepositoryError::BackendError(message),
        }
    }
}

impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() {
            RepositoryError::ConnectionError(format!("Connection error: {err}"))
        } else if err.is_decode() {
            RepositoryError::ValidationError(format!("Malformed response: {err}"))
        } else if let Some(status) = err.status() {
            RepositoryError::from_response(status, "")
        } else {
            RepositoryError::Unexpected(format!("Unexpected HTTP client error: {err}"))
        }
    }
}
