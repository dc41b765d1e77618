//! Error taxonomy for calls against the demo backend.

use thiserror::Error;

use crate::session::StorageError;

/// Errors that can occur while talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Backend answered with a non-2xx status
    #[error("Request failed with status {status}: {message}")]
    Request { status: u16, message: String },

    /// Response body was not the JSON we expected
    #[error("Failed to parse response body: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
    },

    /// Request body could not be encoded
    #[error("Failed to encode request body: {source}")]
    Encode {
        #[source]
        source: serde_json::Error,
    },

    /// Failed to reach the backend at all
    #[error("Connection failed to '{url}': {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Configured base URL plus path does not form a URL
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Sign-in succeeded but no usable token came back
    #[error("Login response carried no access token")]
    MissingToken,

    /// Credential could not be persisted or removed
    #[error("Session storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// HTTP status carried by a `Request` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Request { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Get error type string for logs and notifications
    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::Request { .. } => "request_error",
            ApiError::Parse { .. } => "parse_error",
            ApiError::Encode { .. } => "encode_error",
            ApiError::Transport { .. } => "transport_error",
            ApiError::InvalidUrl { .. } => "invalid_url",
            ApiError::MissingToken => "missing_token",
            ApiError::Storage(_) => "storage_error",
        }
    }
}

/// Pull a human-readable message out of an error body.
///
/// The backend answers failures with `{"message": "..."}`; anything else
/// falls back to the raw body text.
pub(crate) fn error_message(body: &[u8]) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        message: String,
    }

    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(parsed) => parsed.message,
        Err(_) => String::from_utf8_lossy(body).trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_error_carries_status() {
        let err = ApiError::Request {
            status: 404,
            message: "Product with id '9999' not found".to_string(),
        };
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.error_type(), "request_error");
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn parse_error_has_no_status() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ApiError::Parse { source };
        assert_eq!(err.status(), None);
        assert_eq!(err.error_type(), "parse_error");
    }

    #[test]
    fn message_extracted_from_json_body() {
        let body = br#"{"message": "Invalid credentials"}"#;
        assert_eq!(error_message(body), "Invalid credentials");
    }

    #[test]
    fn message_falls_back_to_raw_text() {
        assert_eq!(error_message(b"  Bad Gateway \n"), "Bad Gateway");
    }
}
