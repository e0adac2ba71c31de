//! ============================================================================
//! Executor Module - Posting API clients
//! ============================================================================
//! - TwitterExecutor: post and quote-post via X API v2
//! ============================================================================

mod twitter;

pub use twitter::TwitterExecutor;
