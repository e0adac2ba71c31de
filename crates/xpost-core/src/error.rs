//! ============================================================================
//! Errors - Failure kinds surfaced to the user
//! ============================================================================
//! Validation and URL errors are rendered inline next to the form, remote
//! errors carry the posting client's message, config errors stop startup.
//! ============================================================================

use thiserror::Error;

/// Every failure a user action or startup step can produce
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum XpostError {
    /// Quote reference looked like a URL but is not a post URL
    #[error("Invalid URL or does not contain a valid post ID: {0}")]
    InvalidUrl(String),

    /// Draft or resolved quote id failed validation
    #[error("{0}")]
    Validation(String),

    /// The posting API client failed
    #[error("{0}")]
    RemoteApi(String),

    /// Required configuration or credential missing at startup
    #[error("configuration error: {0}")]
    Config(String),

    /// Wrong password, or a protected action on a locked session
    #[error("Incorrect password")]
    AccessDenied,
}

impl XpostError {
    /// True for errors caused by the user's input rather than the remote side
    pub fn is_validation(&self) -> bool {
        matches!(self, XpostError::InvalidUrl(_) | XpostError::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, XpostError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_url_message_includes_input() {
        let err = XpostError::InvalidUrl("https://example.com/x".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid URL or does not contain a valid post ID: https://example.com/x"
        );
    }

    #[test]
    fn test_validation_grouping() {
        assert!(XpostError::InvalidUrl("x".into()).is_validation());
        assert!(XpostError::Validation("x".into()).is_validation());
        assert!(!XpostError::RemoteApi("x".into()).is_validation());
        assert!(!XpostError::AccessDenied.is_validation());
    }
}
