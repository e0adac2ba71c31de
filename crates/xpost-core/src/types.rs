//! ============================================================================
//! Shared Types for xpost
//! ============================================================================

use serde::{Deserialize, Serialize};

// ============================================================================
// Session Types
// ============================================================================

/// Per-session authentication state, threaded through every request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    authenticated: bool,
}

impl Session {
    /// A fresh, locked session
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub(crate) fn set_authenticated(&mut self, authenticated: bool) {
        self.authenticated = authenticated;
    }
}

// ============================================================================
// Post Types
// ============================================================================

/// A post being composed, alive for one submit action
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDraft {
    pub text: String,
    /// URL or bare id of the post to quote
    pub quote: Option<String>,
}

impl PostDraft {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            quote: None,
        }
    }

    /// Attach a quote reference; blank references mean no quote
    pub fn with_quote(mut self, quote: impl Into<String>) -> Self {
        let quote = quote.into();
        self.quote = if quote.trim().is_empty() {
            None
        } else {
            Some(quote)
        };
        self
    }
}

/// Result of a successful post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostResult {
    pub post_id: String,
    pub url: String,
}

impl PostResult {
    pub fn new(post_id: impl Into<String>) -> Self {
        let post_id = post_id.into();
        let url = format!("https://x.com/i/status/{}", post_id);
        Self { post_id, url }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_locked() {
        assert!(!Session::new().is_authenticated());
    }

    #[test]
    fn test_blank_quote_is_dropped() {
        let draft = PostDraft::new("hi").with_quote("   ");
        assert_eq!(draft.quote, None);

        let draft = PostDraft::new("hi").with_quote("123");
        assert_eq!(draft.quote.as_deref(), Some("123"));
    }

    #[test]
    fn test_post_result_url() {
        let result = PostResult::new("42");
        assert_eq!(result.url, "https://x.com/i/status/42");
    }
}
