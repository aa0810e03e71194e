//! Common error type for all ports

use thiserror::Error;

/// Common result type for port operations
pub type PortResult<T> = Result<T, PortError>;

/// Error hierarchy for port operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PortError {
    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Network/communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Upstream answered with something we cannot use
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Authentication/authorization error
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Query or connection failure
    #[error("Database error: {0}")]
    Database(String),
}

impl From<reqwest::Error> for PortError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            PortError::Serialization(e.to_string())
        } else {
            PortError::Communication(e.to_string())
        }
    }
}

impl From<sqlx::Error> for PortError {
    fn from(e: sqlx::Error) -> Self {
        PortError::Database(e.to_string())
    }
}

impl From<serde_json::Error> for PortError {
    fn from(e: serde_json::Error) -> Self {
        PortError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            PortError::Communication("connection reset".into()).to_string(),
            "Communication error: connection reset"
        );
        assert_eq!(PortError::RateLimitExceeded.to_string(), "Rate limit exceeded");
        assert_eq!(
            PortError::Database("pool timed out".into()).to_string(),
            "Database error: pool timed out"
        );
    }

    #[test]
    fn test_from_json_error() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        assert!(matches!(PortError::from(err), PortError::Serialization(_)));
    }
}
