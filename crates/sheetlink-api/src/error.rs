//! Error types for the REST transport.

use thiserror::Error;

/// Errors that can occur talking to the remote spreadsheet service.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// A structured error returned by the service itself
    /// (the `{"error": {code, message, status}}` envelope).
    #[error("service error {code} [{status}]: {message}")]
    Service {
        /// HTTP status code, e.g. 429.
        code: u16,
        /// Canonical status string, e.g. "RESOURCE_EXHAUSTED".
        status: String,
        message: String,
    },

    #[error("failed to decode service response: {0}")]
    Decode(String),

    #[error("failed to acquire access token: {0}")]
    Auth(String),
}

impl ApiError {
    /// Whether this error is the service telling us to slow down.
    ///
    /// Classification is structured first (HTTP 429, or the canonical
    /// `RESOURCE_EXHAUSTED` status); the "Quota exceeded" message
    /// substring is kept only as a fallback for proxies that mangle the
    /// status fields.
    pub fn is_quota(&self) -> bool {
        match self {
            ApiError::Service {
                code,
                status,
                message,
            } => *code == 429 || status == "RESOURCE_EXHAUSTED" || message.contains("Quota exceeded"),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn service(code: u16, status: &str, message: &str) -> ApiError {
        ApiError::Service {
            code,
            status: status.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn quota_by_http_code() {
        assert!(service(429, "", "too many requests").is_quota());
    }

    #[test]
    fn quota_by_canonical_status() {
        assert!(service(403, "RESOURCE_EXHAUSTED", "rate limit").is_quota());
    }

    #[test]
    fn quota_by_message_fallback() {
        assert!(service(503, "UNAVAILABLE", "Quota exceeded for quota metric").is_quota());
    }

    #[test]
    fn non_quota_errors() {
        assert!(!service(404, "NOT_FOUND", "Requested entity was not found").is_quota());
        assert!(!service(400, "INVALID_ARGUMENT", "Unable to parse range").is_quota());
        assert!(!ApiError::Decode("truncated body".into()).is_quota());
    }
}
