//! ============================================================================
//! Quote Resolution - Post URL to numeric post id
//! ============================================================================
//! Accepts either a post URL (x.com / twitter.com, optional www.) or a bare
//! numeric id, and yields a validated digit-only id.
//! ============================================================================

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::error::{Result, XpostError};

/// Prefix match: anything after the id is tolerated
static POST_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://(?:www\.)?(?:x\.com|twitter\.com)/[^/]+/status/([0-9]+)").unwrap()
});

fn is_post_id(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Extract the post id from a post URL
///
/// `https://x.com/user/status/123456789` -> `123456789`
pub fn extract_post_id(url: &str) -> Result<String> {
    POST_URL_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|id| is_post_id(id))
        .map(str::to_string)
        .ok_or_else(|| XpostError::InvalidUrl(url.to_string()))
}

/// Resolve a user-supplied quote reference (URL or id) to a post id
pub fn resolve_quote(reference: &str) -> Result<String> {
    let reference = reference.trim();

    let id = if reference.starts_with("http") {
        extract_post_id(reference)?
    } else {
        reference.to_string()
    };

    if !is_post_id(&id) {
        return Err(XpostError::Validation(
            "quote post id must be a string representing a valid numeric ID.".to_string(),
        ));
    }

    debug!("Resolved quote reference to post {}", id);
    Ok(id)
}
