/// Error types for the Machine Translation module
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MtError {
    /// Transport failure: connection, DNS, TLS, or the call ran past its deadline
    #[error("Network error: {0}")]
    NetworkError(String),
    /// The provider answered, but with an error status or an unusable payload
    #[error("Service error: {0}")]
    ServiceError(String),
    /// Provider is misconfigured locally (missing key, bad endpoint URL)
    #[error("Configuration error: {0}")]
    ConfigError(String),
    /// Locale code failed validation before any request was made
    #[error("Invalid locale: {0}")]
    InvalidLocale(String),
}

impl From<reqwest::Error> for MtError {
    /// The request URL is stripped so query parameters never reach error text
    fn from(err: reqwest::Error) -> Self {
        let err = err.without_url();
        if err.is_timeout() {
            MtError::NetworkError(format!("Request timed out: {}", err))
        } else if err.is_decode() {
            MtError::ServiceError(format!("Failed to decode response: {}", err))
        } else {
            MtError::NetworkError(err.to_string())
        }
    }
}

impl MtError {
    /// Whether the failure happened on the wire rather than at the provider
    pub fn is_network(&self) -> bool {
        matches!(self, MtError::NetworkError(_))
    }
}

/// Result type for MT operations
pub type MtResult<T> = Result<T, MtError>;
