use thiserror::Error;

/// Failures talking to the remote translation provider.
///
/// The variants exist so the retry layer can tell transient failures
/// (network errors, 429, 5xx) apart from permanent ones (other 4xx).
/// None of these ever reach a `resolve` caller; the orchestrator
/// degrades to the source text instead.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Request never completed: connect failure, timeout, or a body
    /// that could not be decoded.
    #[error("Provider request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Provider answered with a non-success status.
    #[error("Provider returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// Response decoded but did not carry the expected fields.
    #[error("Malformed provider response: {0}")]
    Payload(String),
}

impl ProviderError {
    /// Whether another attempt could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            // Network errors and timeouts are transient
            ProviderError::Request(_) => true,
            ProviderError::Status { status, .. } => {
                status.as_u16() == 429 || status.is_server_error()
            }
            // A malformed payload might be a transient upstream hiccup
            ProviderError::Payload(_) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    fn status_error(status: StatusCode) -> ProviderError {
        ProviderError::Status {
            status,
            body: "test body".to_string(),
        }
    }

    #[test]
    fn test_server_errors_are_retryable() {
        assert!(status_error(StatusCode::INTERNAL_SERVER_ERROR).is_retryable());
        assert!(status_error(StatusCode::SERVICE_UNAVAILABLE).is_retryable());
        assert!(status_error(StatusCode::BAD_GATEWAY).is_retryable());
    }

    #[test]
    fn test_rate_limit_is_retryable() {
        assert!(status_error(StatusCode::TOO_MANY_REQUESTS).is_retryable());
    }

    #[test]
    fn test_client_errors_are_not_retryable() {
        assert!(!status_error(StatusCode::BAD_REQUEST).is_retryable());
        assert!(!status_error(StatusCode::UNAUTHORIZED).is_retryable());
        assert!(!status_error(StatusCode::FORBIDDEN).is_retryable());
        assert!(!status_error(StatusCode::NOT_FOUND).is_retryable());
    }

    #[test]
    fn test_payload_errors_are_retryable() {
        assert!(ProviderError::Payload("missing field".to_string()).is_retryable());
    }

    #[test]
    fn test_status_error_display() {
        let err = status_error(StatusCode::BAD_GATEWAY);
        let msg = err.to_string();
        assert!(msg.contains("502"));
        assert!(msg.contains("test body"));
    }
}
