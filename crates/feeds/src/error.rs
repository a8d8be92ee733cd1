//! Error types for feed operations.

use thiserror::Error;

/// Errors that can occur while fetching tickers.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("request failed: {0}")]
    ConnectionFailed(String),

    #[error("unexpected HTTP status: {0}")]
    BadStatus(u16),

    #[error("failed to parse response: {0}")]
    ParseError(String),
}

impl From<reqwest::Error> for FeedError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FeedError::ParseError(err.to_string())
        } else {
            FeedError::ConnectionFailed(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(err: serde_json::Error) -> Self {
        FeedError::ParseError(err.to_string())
    }
}

impl FeedError {
    /// Returns true if this error is transient and likely to clear on the
    /// next polling cycle. Parse errors mean the endpoint changed shape and
    /// will keep failing until the parser is fixed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            FeedError::ConnectionFailed(_) | FeedError::BadStatus(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(FeedError::ConnectionFailed("timeout".to_string()).is_transient());
        assert!(FeedError::BadStatus(503).is_transient());
        assert!(!FeedError::ParseError("bad json".to_string()).is_transient());
    }

    #[test]
    fn test_error_display() {
        let err = FeedError::BadStatus(429);
        assert_eq!(err.to_string(), "unexpected HTTP status: 429");
    }
}
