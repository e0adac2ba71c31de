//! ============================================================================
//! Auth Module - Request signing for the posting API
//! ============================================================================
//! - OAuth 1.0a user context (consumer key/secret + access token/secret)
//! ============================================================================

mod oauth1;

pub use oauth1::OAuth1Signer;
